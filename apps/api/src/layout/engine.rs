//! Pipeline orchestration — runs the full layout/annotation engine on one
//! source text + keyword list and produces both artifacts.
//!
//! The pipeline is a pure, single-pass, single-threaded transformation with
//! no I/O: locate → reflow → place → highlight → compose, plus the
//! independent grid artifact. CPU-bound — handlers run it inside
//! `tokio::task::spawn_blocking`.
//!
//! Recoverable conditions (keyword not found, label pushed past a page
//! bottom) are absorbed into warnings returned alongside the artifacts.
//! Contract violations (bad dimensions, zero columns, duplicate keywords)
//! abort the run; no partial artifact is ever emitted.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::layout::annotate::place_annotations;
use crate::layout::compose::{compose_document, compose_grid, DocumentArtifact, GridArtifact};
use crate::layout::flow::reflow;
use crate::layout::font_metrics::LayoutConfig;
use crate::layout::grid::distribute;
use crate::layout::highlight::render_runs;
use crate::layout::locate::{locate_keywords, Keyword, SourceText};

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// A non-fatal condition surfaced alongside the artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineWarning {
    /// Keyword absent from the text: excluded from annotation and
    /// highlighting, still listed in the grid artifact.
    KeywordNotFound { keyword: String },
    /// Margin label re-anchored (or kept past the nominal page bottom, when
    /// `from_page == to_page`) because it was pushed past the page bottom.
    AnnotationOverflow {
        keyword: String,
        from_page: usize,
        to_page: usize,
    },
}

impl std::fmt::Display for EngineWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineWarning::KeywordNotFound { keyword } => {
                write!(f, "keyword '{keyword}' not found in text")
            }
            EngineWarning::AnnotationOverflow {
                keyword,
                from_page,
                to_page,
            } if from_page == to_page => {
                write!(
                    f,
                    "label '{keyword}' overflows the bottom of page {from_page}"
                )
            }
            EngineWarning::AnnotationOverflow {
                keyword,
                from_page,
                to_page,
            } => {
                write!(
                    f,
                    "label '{keyword}' re-anchored from page {from_page} to page {to_page}"
                )
            }
        }
    }
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub document: DocumentArtifact,
    pub grid: GridArtifact,
    pub keywords: Vec<Keyword>,
    pub warnings: Vec<EngineWarning>,
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Runs the whole engine on one immutable input set.
///
/// Deterministic: identical inputs and configuration produce a structurally
/// identical `PipelineOutput`.
pub fn run_pipeline(
    text: &SourceText,
    keyword_texts: &[String],
    config: &LayoutConfig,
) -> Result<PipelineOutput, AppError> {
    validate_config(config)?;
    let keywords = build_keywords(keyword_texts)?;

    let occurrences = locate_keywords(text, &keywords);
    let mut warnings: Vec<EngineWarning> = Vec::new();
    for (keyword, occurrence) in keywords.iter().zip(&occurrences) {
        if occurrence.is_none() {
            warn!(keyword = %keyword.text, "keyword not found in source text");
            warnings.push(EngineWarning::KeywordNotFound {
                keyword: keyword.text.clone(),
            });
        }
    }

    let lines = reflow(text, config);
    let (annotations, overflow_warnings) =
        place_annotations(&keywords, &occurrences, &lines, config);
    warnings.extend(overflow_warnings);

    let styled = render_runs(text, &lines, &occurrences);
    let document = compose_document(styled, annotations);

    let cells = distribute(&keywords, config.grid_columns)?;
    let grid = compose_grid(cells, config.grid_columns);

    Ok(PipelineOutput {
        document,
        grid,
        keywords,
        warnings,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Contract validation
// ────────────────────────────────────────────────────────────────────────────

fn validate_config(config: &LayoutConfig) -> Result<(), AppError> {
    if config.content_width_pt <= 0.0 || config.content_height_pt <= 0.0 {
        return Err(AppError::Validation(format!(
            "content area must be positive, got {}x{} pt",
            config.content_width_pt, config.content_height_pt
        )));
    }
    if config.font_size_pt <= 0.0 || config.line_height_pt <= 0.0 {
        return Err(AppError::Validation(
            "font size and line height must be positive".to_string(),
        ));
    }
    if config.min_label_gap_pt <= 0.0 {
        return Err(AppError::Validation(
            "minimum label gap must be positive".to_string(),
        ));
    }
    if config.grid_columns == 0 {
        return Err(AppError::Validation(
            "grid column count must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Assigns ordinals in caller order and rejects duplicates after
/// case-insensitive whitespace normalization.
fn build_keywords(keyword_texts: &[String]) -> Result<Vec<Keyword>, AppError> {
    let keywords: Vec<Keyword> = keyword_texts
        .iter()
        .enumerate()
        .map(|(ordinal, text)| Keyword {
            text: text.clone(),
            ordinal,
        })
        .collect();

    let mut seen = std::collections::HashSet::new();
    for keyword in &keywords {
        if !seen.insert(keyword.normalized()) {
            return Err(AppError::Validation(format!(
                "duplicate keyword after normalization: '{}'",
                keyword.text
            )));
        }
    }
    Ok(keywords)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
