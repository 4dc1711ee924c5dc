//! Text flow — reflows the source text into lines and pages.
//!
//! Greedy word-wrap: words accumulate onto a line while the projected width
//! stays within the content width; the line breaks before the word that
//! would overflow. A single word wider than the content area occupies its
//! own line (forced overflow, never split mid-word). Paragraph boundaries
//! always force a line break. Each line is stamped with its resolved page
//! index and vertical position — the only contract the annotation placer
//! depends on.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::{get_metrics, FontMetricTable, LayoutConfig};
use crate::layout::locate::SourceText;

/// One wrapped line of body text.
///
/// `start`/`end` are byte offsets into the paragraph (char boundaries,
/// trailing whitespace excluded). `y` is the distance from the top of the
/// content area to the top of the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub paragraph_index: usize,
    pub start: usize,
    pub end: usize,
    pub page_index: usize,
    pub y: f32,
}

/// Reflows the whole source text into page-stamped lines.
///
/// Lines are returned in global reading order. The vertical cursor advances
/// by `line_height_pt` per line plus `paragraph_spacing_pt` between
/// paragraphs; when the next line would exceed `content_height_pt` a new
/// page starts and the cursor resets to the top.
pub fn reflow(text: &SourceText, config: &LayoutConfig) -> Vec<Line> {
    let metrics = get_metrics(&config.font);
    let max_em = config.content_width_em();

    let mut lines: Vec<Line> = Vec::new();
    let mut page_index = 0usize;
    let mut y = 0.0_f32;
    let mut first_paragraph = true;

    for (paragraph_index, paragraph) in text.paragraphs.iter().enumerate() {
        let spans = wrap_paragraph(paragraph, metrics, max_em);
        if spans.is_empty() {
            continue;
        }
        if !first_paragraph {
            y += config.paragraph_spacing_pt;
        }
        first_paragraph = false;

        for (start, end) in spans {
            if y + config.line_height_pt > config.content_height_pt {
                page_index += 1;
                y = 0.0;
            }
            lines.push(Line {
                paragraph_index,
                start,
                end,
                page_index,
                y,
            });
            y += config.line_height_pt;
        }
    }

    lines
}

/// Greedy word-wrap of a single paragraph. Returns `(start, end)` byte spans,
/// one per line.
fn wrap_paragraph(
    paragraph: &str,
    metrics: &FontMetricTable,
    max_width_em: f32,
) -> Vec<(usize, usize)> {
    let words = word_spans(paragraph);
    let Some(&(first_start, first_end)) = words.first() else {
        return Vec::new();
    };

    let mut spans: Vec<(usize, usize)> = Vec::new();
    let mut line_start = first_start;
    let mut line_end = first_end;
    let mut current_width = metrics.measure_str(&paragraph[first_start..first_end]);

    for &(start, end) in &words[1..] {
        let word_w = metrics.measure_str(&paragraph[start..end]);
        if current_width + metrics.space_width + word_w > max_width_em {
            spans.push((line_start, line_end));
            line_start = start;
            line_end = end;
            current_width = word_w;
        } else {
            current_width += metrics.space_width + word_w;
            line_end = end;
        }
    }
    spans.push((line_start, line_end));
    spans
}

/// Byte spans of the whitespace-separated words in a paragraph.
fn word_spans(paragraph: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut word_start: Option<usize> = None;

    for (i, c) in paragraph.char_indices() {
        if c.is_whitespace() {
            if let Some(start) = word_start.take() {
                spans.push((start, i));
            }
        } else if word_start.is_none() {
            word_start = Some(i);
        }
    }
    if let Some(start) = word_start {
        spans.push((start, paragraph.len()));
    }
    spans
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
