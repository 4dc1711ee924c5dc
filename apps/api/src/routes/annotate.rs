//! POST /api/v1/annotate — the single end-to-end operation.
//!
//! Accepts a multipart upload (`file` field, PDF or plain text), extracts
//! keywords via the configured source, runs the layout pipeline on a
//! blocking thread, and returns both rendered artifacts base64-encoded.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract;
use crate::layout::{run_pipeline, LayoutConfig, SourceText};
use crate::render::{render_document_pdf, render_grid_pdf};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnnotateQuery {
    /// Overrides the keyword grid column count.
    pub columns: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct AnnotateResponse {
    pub run_id: Uuid,
    pub keywords: Vec<String>,
    pub warnings: Vec<String>,
    pub page_count: usize,
    /// Annotated document, base64-encoded PDF.
    pub annotated_pdf: String,
    /// Keyword index grid, base64-encoded PDF.
    pub keyword_index_pdf: String,
}

struct Upload {
    filename: String,
    bytes: Vec<u8>,
}

impl Upload {
    fn is_pdf(&self) -> bool {
        std::path::Path::new(&self.filename)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
    }
}

pub async fn handle_annotate(
    State(state): State<AppState>,
    Query(params): Query<AnnotateQuery>,
    mut multipart: Multipart,
) -> Result<Json<AnnotateResponse>, AppError> {
    let run_id = Uuid::new_v4();

    let upload = read_upload(&mut multipart).await?;
    info!(%run_id, filename = %upload.filename, bytes = upload.bytes.len(), "annotate request");

    let text = source_text(&upload).await?;

    let mut layout = state.layout.clone();
    if let Some(columns) = params.columns {
        layout.grid_columns = columns;
    }

    let keywords = state
        .keyword_source
        .extract(&text, layout.min_keywords, layout.max_keywords)
        .await?;

    let (response, warning_count) =
        run_blocking_pipeline(run_id, text, keywords, layout).await?;

    info!(
        %run_id,
        pages = response.page_count,
        warnings = warning_count,
        "annotate request complete"
    );
    Ok(Json(response))
}

/// Pulls the `file` field out of the multipart body.
async fn read_upload(multipart: &mut Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload.txt").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?
            .to_vec();
        if bytes.is_empty() {
            return Err(AppError::Validation("uploaded file is empty".to_string()));
        }
        return Ok(Upload { filename, bytes });
    }
    Err(AppError::Validation(
        "multipart body must contain a 'file' field".to_string(),
    ))
}

/// Turns the upload into paragraphs. PDF extraction is CPU-bound, so it
/// runs on the blocking pool.
async fn source_text(upload: &Upload) -> Result<SourceText, AppError> {
    if upload.is_pdf() {
        let bytes = upload.bytes.clone();
        tokio::task::spawn_blocking(move || extract::from_pdf_bytes(&bytes))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task panicked: {e}")))?
    } else {
        let raw = std::str::from_utf8(&upload.bytes)
            .map_err(|_| AppError::Validation("text upload is not valid UTF-8".to_string()))?;
        let text = extract::from_plain_text(raw);
        if text.is_empty() {
            return Err(AppError::Validation(
                "upload contains no paragraphs".to_string(),
            ));
        }
        Ok(text)
    }
}

/// Runs the layout pipeline and both PDF renders on the blocking pool.
async fn run_blocking_pipeline(
    run_id: Uuid,
    text: SourceText,
    keywords: Vec<String>,
    layout: LayoutConfig,
) -> Result<(AnnotateResponse, usize), AppError> {
    tokio::task::spawn_blocking(move || -> Result<(AnnotateResponse, usize), AppError> {
        let output = run_pipeline(&text, &keywords, &layout)?;

        let annotated_pdf = render_document_pdf(&output.document, &layout)?;
        let keyword_index_pdf = render_grid_pdf(&output.grid, &layout)?;

        let warning_count = output.warnings.len();
        let response = AnnotateResponse {
            run_id,
            keywords: output.keywords.into_iter().map(|k| k.text).collect(),
            warnings: output.warnings.iter().map(|w| w.to_string()).collect(),
            page_count: output.document.pages.len(),
            annotated_pdf: BASE64.encode(annotated_pdf),
            keyword_index_pdf: BASE64.encode(keyword_index_pdf),
        };
        Ok((response, warning_count))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("pipeline task panicked: {e}")))?
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
