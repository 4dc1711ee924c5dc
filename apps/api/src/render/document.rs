//! Renders the annotated-document artifact: body text with emphasized runs
//! in the content column, keyword labels in the left margin.

use lopdf::content::Operation;

use crate::errors::AppError;
use crate::layout::compose::{DocumentArtifact, PageArtifact};
use crate::layout::font_metrics::{get_metrics, LayoutConfig};
use crate::render::{
    build_pdf, show_text, BLACK, HIGHLIGHT_RED, MARGIN_BLUE, MARGIN_GAP, PAGE_HEIGHT, PAGE_MARGIN,
};

/// Serializes a `DocumentArtifact` to PDF bytes.
///
/// Engine y-coordinates grow downward from the top of the content area;
/// PDF baselines grow upward from the bottom of the page, so each line's
/// baseline is `page_top - y - font_size`.
pub fn render_document_pdf(
    artifact: &DocumentArtifact,
    config: &LayoutConfig,
) -> Result<Vec<u8>, AppError> {
    let page_ops = artifact
        .pages
        .iter()
        .map(|page| page_operations(page, config))
        .collect();
    build_pdf(page_ops, config)
}

fn page_operations(page: &PageArtifact, config: &LayoutConfig) -> Vec<Operation> {
    let metrics = get_metrics(&config.font);
    let content_x = PAGE_MARGIN + config.margin_width_pt + MARGIN_GAP;
    let page_top = PAGE_HEIGHT - PAGE_MARGIN;

    let mut ops = Vec::new();

    for line in &page.lines {
        let baseline = page_top - line.y - config.font_size_pt;
        let mut x = content_x;
        for run in &line.runs {
            let (font, color) = if run.emphasis {
                ("F2", HIGHLIGHT_RED)
            } else {
                ("F1", BLACK)
            };
            show_text(&mut ops, font, config.font_size_pt, color, x, baseline, &run.text);
            x += metrics.measure_pt(&run.text, config.font_size_pt);
        }
    }

    for annotation in &page.annotations {
        let baseline = page_top - annotation.anchor_y - config.label_font_size_pt;
        show_text(
            &mut ops,
            "F2",
            config.label_font_size_pt,
            MARGIN_BLUE,
            PAGE_MARGIN,
            baseline,
            &annotation.keyword.text,
        );
    }

    ops
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::annotate::Annotation;
    use crate::layout::font_metrics::{default_layout_config, FontFamily};
    use crate::layout::highlight::{StyledLine, TextRun};
    use crate::layout::locate::Keyword;

    fn make_artifact() -> DocumentArtifact {
        DocumentArtifact {
            pages: vec![PageArtifact {
                index: 0,
                lines: vec![StyledLine {
                    paragraph_index: 0,
                    page_index: 0,
                    y: 0.0,
                    runs: vec![
                        TextRun {
                            text: "plain ".to_string(),
                            emphasis: false,
                        },
                        TextRun {
                            text: "emphasized".to_string(),
                            emphasis: true,
                        },
                    ],
                }],
                annotations: vec![Annotation {
                    keyword: Keyword {
                        text: "emphasized".to_string(),
                        ordinal: 0,
                    },
                    page_index: 0,
                    anchor_y: 0.0,
                }],
            }],
        }
    }

    #[test]
    fn test_render_document_produces_pdf() {
        let config = default_layout_config(FontFamily::Helvetica);
        let bytes = render_document_pdf(&make_artifact(), &config).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_render_one_pdf_page_per_artifact_page() {
        let config = default_layout_config(FontFamily::Helvetica);
        let mut artifact = make_artifact();
        artifact.pages.push(PageArtifact {
            index: 1,
            lines: vec![],
            annotations: vec![],
        });
        let bytes = render_document_pdf(&artifact, &config).unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_page_operations_one_show_per_run_and_label() {
        let config = default_layout_config(FontFamily::Helvetica);
        let artifact = make_artifact();
        let ops = page_operations(&artifact.pages[0], &config);
        let shows = ops.iter().filter(|op| op.operator == "Tj").count();
        // Two text runs plus one margin label.
        assert_eq!(shows, 3);
    }
}
