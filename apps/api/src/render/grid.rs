//! Renders the keyword index artifact: a titled, column-major bulleted grid.

use lopdf::content::Operation;

use crate::errors::AppError;
use crate::layout::compose::GridArtifact;
use crate::layout::font_metrics::LayoutConfig;
use crate::render::{build_pdf, show_text, BLACK, PAGE_HEIGHT, PAGE_MARGIN, PAGE_WIDTH};

const TITLE: &str = "Keywords (in order of appearance)";
const TITLE_FONT_SIZE: f32 = 14.0;
/// Horizontal gap between grid columns (0.5").
const COLUMN_GAP: f32 = 36.0;
/// Vertical advance per grid row (0.25").
const ROW_HEIGHT: f32 = 18.0;
/// Space between the title baseline and the first row.
const TITLE_GAP: f32 = 36.0;

/// Serializes a `GridArtifact` to a single-page PDF.
pub fn render_grid_pdf(artifact: &GridArtifact, config: &LayoutConfig) -> Result<Vec<u8>, AppError> {
    let mut ops = Vec::new();

    let title_baseline = PAGE_HEIGHT - PAGE_MARGIN - TITLE_FONT_SIZE;
    show_text(
        &mut ops,
        "F2",
        TITLE_FONT_SIZE,
        BLACK,
        PAGE_MARGIN,
        title_baseline,
        TITLE,
    );

    let usable_width = PAGE_WIDTH - 2.0 * PAGE_MARGIN;
    let columns = artifact.columns.max(1) as f32;
    let column_width = (usable_width - (columns - 1.0) * COLUMN_GAP) / columns;
    let first_row_baseline = title_baseline - TITLE_GAP;

    for cell in &artifact.cells {
        let x = PAGE_MARGIN + cell.column as f32 * (column_width + COLUMN_GAP);
        let y = first_row_baseline - cell.row as f32 * ROW_HEIGHT;
        let entry = format!("• {}", cell.keyword.text);
        show_text(&mut ops, "F1", config.font_size_pt, BLACK, x, y, &entry);
    }

    build_pdf(vec![ops], config)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compose::compose_grid;
    use crate::layout::font_metrics::{default_layout_config, FontFamily};
    use crate::layout::grid::distribute;
    use crate::layout::locate::Keyword;

    fn make_keywords(texts: &[&str]) -> Vec<Keyword> {
        texts
            .iter()
            .enumerate()
            .map(|(ordinal, text)| Keyword {
                text: text.to_string(),
                ordinal,
            })
            .collect()
    }

    #[test]
    fn test_render_grid_produces_single_page_pdf() {
        let config = default_layout_config(FontFamily::Helvetica);
        let keywords = make_keywords(&["alpha", "beta", "gamma", "delta"]);
        let cells = distribute(&keywords, 3).unwrap();
        let artifact = compose_grid(cells, 3);

        let bytes = render_grid_pdf(&artifact, &config).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_render_grid_empty_still_renders_title_page() {
        let config = default_layout_config(FontFamily::Helvetica);
        let artifact = compose_grid(vec![], 3);
        let bytes = render_grid_pdf(&artifact, &config).unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
