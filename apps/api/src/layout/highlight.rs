//! Highlight rendering — converts wrapped lines into styled text runs.
//!
//! For each line, plain runs interleave with emphasis runs covering exactly
//! the first-occurrence span of each keyword that falls within the line.
//! Later textual matches stay plain. Emphasis is visual only: the run text
//! is always the source text, case preserved.

use serde::{Deserialize, Serialize};

use crate::layout::flow::Line;
use crate::layout::locate::{Occurrence, SourceText};

/// A maximal run of uniformly styled text within one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub emphasis: bool,
}

/// A line ready for composition: position stamp plus styled runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledLine {
    pub paragraph_index: usize,
    pub page_index: usize,
    pub y: f32,
    pub runs: Vec<TextRun>,
}

/// Renders every line into styled runs.
///
/// Overlapping first-occurrence spans (one keyword a substring of another)
/// merge into a single emphasis run covering their union.
pub fn render_runs(
    text: &SourceText,
    lines: &[Line],
    occurrences: &[Option<Occurrence>],
) -> Vec<StyledLine> {
    lines
        .iter()
        .map(|line| {
            let paragraph = &text.paragraphs[line.paragraph_index];
            let spans = emphasis_spans(line, occurrences);
            StyledLine {
                paragraph_index: line.paragraph_index,
                page_index: line.page_index,
                y: line.y,
                runs: split_runs(&paragraph[line.start..line.end], &spans),
            }
        })
        .collect()
}

/// Emphasis byte ranges relative to the line start, merged and sorted.
fn emphasis_spans(line: &Line, occurrences: &[Option<Occurrence>]) -> Vec<(usize, usize)> {
    let mut spans: Vec<(usize, usize)> = occurrences
        .iter()
        .flatten()
        .filter(|occ| occ.paragraph_index == line.paragraph_index)
        .filter_map(|occ| {
            let start = occ.offset.max(line.start);
            let end = (occ.offset + occ.len).min(line.end);
            (start < end).then_some((start - line.start, end - line.start))
        })
        .collect();
    spans.sort_unstable();

    // Merge overlapping or touching spans.
    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some((_, last_end)) if start <= *last_end => *last_end = (*last_end).max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Splits line text into alternating plain/emphasis runs at span boundaries.
fn split_runs(line_text: &str, spans: &[(usize, usize)]) -> Vec<TextRun> {
    let mut runs: Vec<TextRun> = Vec::new();
    let mut cursor = 0usize;

    for &(start, end) in spans {
        if start > cursor {
            runs.push(TextRun {
                text: line_text[cursor..start].to_string(),
                emphasis: false,
            });
        }
        runs.push(TextRun {
            text: line_text[start..end].to_string(),
            emphasis: true,
        });
        cursor = end;
    }
    if cursor < line_text.len() {
        runs.push(TextRun {
            text: line_text[cursor..].to_string(),
            emphasis: false,
        });
    }
    runs
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::flow::reflow;
    use crate::layout::font_metrics::{default_layout_config, FontFamily, LayoutConfig};
    use crate::layout::locate::{locate_keywords, Keyword};

    fn make_config() -> LayoutConfig {
        default_layout_config(FontFamily::Helvetica)
    }

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

    fn joined(runs: &[TextRun]) -> String {
        runs.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn test_render_no_occurrences_single_plain_run() {
        let text = SourceText::new(vec!["plain text only".to_string()]);
        let lines = reflow(&text, &make_config());
        let styled = render_runs(&text, &lines, &[None]);
        assert_eq!(styled.len(), 1);
        assert_eq!(styled[0].runs.len(), 1);
        assert!(!styled[0].runs[0].emphasis);
        assert_eq!(styled[0].runs[0].text, "plain text only");
    }

    #[test]
    fn test_render_marks_first_occurrence_span_only() {
        let text = SourceText::new(vec![
            "Para1 about gradient descent.".to_string(),
            "Para2 repeats gradient descent again.".to_string(),
        ]);
        let keywords = make_keywords(&["gradient descent"]);
        let occurrences = locate_keywords(&text, &keywords);
        let lines = reflow(&text, &make_config());
        let styled = render_runs(&text, &lines, &occurrences);

        let emphasized: Vec<&TextRun> = styled
            .iter()
            .flat_map(|l| &l.runs)
            .filter(|r| r.emphasis)
            .collect();
        assert_eq!(emphasized.len(), 1, "only the first occurrence is marked");
        assert_eq!(emphasized[0].text, "gradient descent");
        // The second paragraph renders entirely plain.
        let para2_lines: Vec<&StyledLine> =
            styled.iter().filter(|l| l.paragraph_index == 1).collect();
        assert!(para2_lines.iter().all(|l| l.runs.iter().all(|r| !r.emphasis)));
    }

    #[test]
    fn test_render_preserves_source_case_and_content() {
        let text = SourceText::new(vec!["We love Neural NETWORKS here.".to_string()]);
        let keywords = make_keywords(&["neural networks"]);
        let occurrences = locate_keywords(&text, &keywords);
        let lines = reflow(&text, &make_config());
        let styled = render_runs(&text, &lines, &occurrences);

        let runs = &styled[0].runs;
        assert_eq!(joined(runs), "We love Neural NETWORKS here.");
        let em: Vec<&TextRun> = runs.iter().filter(|r| r.emphasis).collect();
        assert_eq!(em[0].text, "Neural NETWORKS");
    }

    #[test]
    fn test_render_span_split_across_wrapped_lines() {
        let mut config = make_config();
        // Narrow column: "gradient" and "descent" land on different lines.
        config.content_width_pt = 60.0;
        let text = SourceText::new(vec!["gradient descent".to_string()]);
        let keywords = make_keywords(&["gradient descent"]);
        let occurrences = locate_keywords(&text, &keywords);
        let lines = reflow(&text, &config);
        assert_eq!(lines.len(), 2, "narrow column must wrap the two words");

        let styled = render_runs(&text, &lines, &occurrences);
        assert!(styled[0].runs.iter().any(|r| r.emphasis && r.text == "gradient"));
        assert!(styled[1].runs.iter().any(|r| r.emphasis && r.text == "descent"));
    }

    #[test]
    fn test_render_overlapping_keywords_merge_into_one_run() {
        let text = SourceText::new(vec!["stochastic gradient descent".to_string()]);
        let keywords = make_keywords(&["gradient descent", "gradient"]);
        let occurrences = locate_keywords(&text, &keywords);
        let lines = reflow(&text, &make_config());
        let styled = render_runs(&text, &lines, &occurrences);

        let em: Vec<&TextRun> = styled[0].runs.iter().filter(|r| r.emphasis).collect();
        assert_eq!(em.len(), 1);
        assert_eq!(em[0].text, "gradient descent");
        assert_eq!(joined(&styled[0].runs), "stochastic gradient descent");
    }

    #[test]
    fn test_render_line_stamps_match_flow() {
        let text = SourceText::new(vec!["one.".to_string(), "two.".to_string()]);
        let lines = reflow(&text, &make_config());
        let styled = render_runs(&text, &lines, &[]);
        for (line, s) in lines.iter().zip(&styled) {
            assert_eq!(line.page_index, s.page_index);
            assert_eq!(line.y, s.y);
        }
    }
}
