//! Artifact sink — serializes the two engine artifacts to PDF with `lopdf`.
//!
//! The engine's artifacts are format-agnostic; everything page-format
//! specific (US-letter media box, base-14 font dictionaries, WinAnsi
//! encoding, color choices) lives here.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::errors::AppError;
use crate::layout::font_metrics::LayoutConfig;

pub mod document;
pub mod grid;

pub use document::render_document_pdf;
pub use grid::render_grid_pdf;

pub(crate) const PAGE_WIDTH: f32 = 612.0;
pub(crate) const PAGE_HEIGHT: f32 = 792.0;
pub(crate) const PAGE_MARGIN: f32 = 54.0;
/// Gap between the margin annotation column and the body text.
pub(crate) const MARGIN_GAP: f32 = 18.0;

pub(crate) const BLACK: (f32, f32, f32) = (0.0, 0.0, 0.0);
/// Emphasis runs (first keyword occurrences).
pub(crate) const HIGHLIGHT_RED: (f32, f32, f32) = (0.8, 0.0, 0.0);
/// Margin annotation labels.
pub(crate) const MARGIN_BLUE: (f32, f32, f32) = (0.0, 0.4, 0.8);

/// Assembles a PDF from per-page operation lists. Fonts `F1` (regular) and
/// `F2` (bold) are registered for the configured family, WinAnsi-encoded.
pub(crate) fn build_pdf(
    page_ops: Vec<Vec<Operation>>,
    config: &LayoutConfig,
) -> Result<Vec<u8>, AppError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => config.font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => config.font.bold_base_font(),
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_regular,
            "F2" => font_bold,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(page_ops.len());
    for operations in page_ops {
        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| AppError::Pdf(format!("content stream encoding failed: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| AppError::Pdf(format!("saving PDF failed: {e}")))?;
    Ok(buffer)
}

/// Appends one positioned text show. `font` is the resource name (F1/F2),
/// `(x, y)` is the baseline origin in PDF coordinates.
pub(crate) fn show_text(
    ops: &mut Vec<Operation>,
    font: &str,
    size: f32,
    color: (f32, f32, f32),
    x: f32,
    y: f32,
    text: &str,
) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), size.into()]));
    ops.push(Operation::new(
        "rg",
        vec![color.0.into(), color.1.into(), color.2.into()],
    ));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(
            encode_win_ansi(text),
            lopdf::StringFormat::Literal,
        )],
    ));
    ops.push(Operation::new("ET", vec![]));
}

/// Encodes text for a WinAnsi-encoded base-14 font. Latin-1 maps directly;
/// the bullet gets its WinAnsi slot; everything else degrades to '?'.
pub(crate) fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '•' => 0x95,
            c if (c as u32) < 0x100 => c as u8,
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
