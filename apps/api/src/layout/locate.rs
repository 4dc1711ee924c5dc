//! Keyword location — finds the first occurrence of each keyword in the
//! source text.
//!
//! Matching is case-insensitive and whitespace-normalized: any run of
//! whitespace in the source matches a single space in the keyword. Only the
//! first occurrence per keyword is retained; keywords match independently,
//! so two keywords may both claim overlapping spans.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Input types
// ────────────────────────────────────────────────────────────────────────────

/// Plain extracted text as an ordered sequence of non-empty paragraphs.
/// Supplied by the text source collaborator; immutable for the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceText {
    pub paragraphs: Vec<String>,
}

impl SourceText {
    pub fn new(paragraphs: Vec<String>) -> Self {
        Self { paragraphs }
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

/// A keyword with its rank in the caller-supplied order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub text: String,
    pub ordinal: usize,
}

impl Keyword {
    /// Lowercased, whitespace-collapsed form used for uniqueness checks and search.
    pub fn normalized(&self) -> String {
        normalize(&self.text)
    }
}

/// Collapses whitespace runs to single spaces and lowercases.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ────────────────────────────────────────────────────────────────────────────
// Occurrence
// ────────────────────────────────────────────────────────────────────────────

/// The single first occurrence of a keyword in the source text.
///
/// `offset` and `len` are byte positions within the paragraph, always on
/// `char` boundaries. `len` covers the span as it appears in the source,
/// which may differ from the keyword length when the source contains a
/// whitespace run inside the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub keyword_ordinal: usize,
    pub paragraph_index: usize,
    pub offset: usize,
    pub len: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Locator
// ────────────────────────────────────────────────────────────────────────────

/// Finds the first occurrence of each keyword.
///
/// Returns one slot per keyword, indexed by ordinal: `None` means the keyword
/// does not appear anywhere in the text (surfaced as a warning by the
/// pipeline, never an error). Resolution is leftmost within a paragraph,
/// then top-most by paragraph order.
pub fn locate_keywords(text: &SourceText, keywords: &[Keyword]) -> Vec<Option<Occurrence>> {
    keywords
        .iter()
        .map(|kw| {
            let needle = kw.normalized();
            if needle.is_empty() {
                return None;
            }
            for (paragraph_index, paragraph) in text.paragraphs.iter().enumerate() {
                if let Some((offset, len)) = find_normalized(paragraph, &needle) {
                    return Some(Occurrence {
                        keyword_ordinal: kw.ordinal,
                        paragraph_index,
                        offset,
                        len,
                    });
                }
            }
            None
        })
        .collect()
}

/// Finds the leftmost match of a normalized needle within a paragraph.
///
/// Returns `(byte_offset, byte_len)` of the matched span in the original
/// (unnormalized) paragraph text.
fn find_normalized(paragraph: &str, needle: &str) -> Option<(usize, usize)> {
    for (start, _) in paragraph.char_indices() {
        if let Some(len) = match_at(paragraph, start, needle) {
            return Some((start, len));
        }
    }
    None
}

/// Attempts to match `needle` at byte position `start` of `paragraph`.
///
/// A space in the needle consumes one or more whitespace characters in the
/// paragraph; every other character compares case-insensitively. Returns the
/// byte length of the matched span on success.
fn match_at(paragraph: &str, start: usize, needle: &str) -> Option<usize> {
    let mut haystack = paragraph[start..].char_indices().peekable();

    for n in needle.chars() {
        if n == ' ' {
            // Consume one or more whitespace characters.
            match haystack.next() {
                Some((_, h)) if h.is_whitespace() => {}
                _ => return None,
            }
            while matches!(haystack.peek(), Some((_, h)) if h.is_whitespace()) {
                haystack.next();
            }
        } else {
            match haystack.next() {
                Some((_, h)) if char_eq_ci(h, n) => {}
                _ => return None,
            }
        }
    }

    let end = haystack
        .peek()
        .map(|(i, _)| start + i)
        .unwrap_or(paragraph.len());
    Some(end - start)
}

fn char_eq_ci(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_locate_simple_match() {
        let text = SourceText::new(vec!["Machine learning is everywhere.".to_string()]);
        let keywords = make_keywords(&["machine learning"]);
        let found = locate_keywords(&text, &keywords);
        let occ = found[0].as_ref().expect("keyword should be found");
        assert_eq!(occ.paragraph_index, 0);
        assert_eq!(occ.offset, 0);
        assert_eq!(occ.len, "Machine learning".len());
    }

    #[test]
    fn test_locate_case_insensitive_preserves_source_span() {
        let text = SourceText::new(vec!["We study GRADIENT Descent daily.".to_string()]);
        let keywords = make_keywords(&["gradient descent"]);
        let found = locate_keywords(&text, &keywords);
        let occ = found[0].as_ref().unwrap();
        assert_eq!(
            &text.paragraphs[0][occ.offset..occ.offset + occ.len],
            "GRADIENT Descent"
        );
    }

    #[test]
    fn test_locate_first_occurrence_only() {
        // Keyword repeats in a later paragraph — only Para1 counts.
        let text = SourceText::new(vec![
            "Para1 about gradient descent.".to_string(),
            "Para2 repeats gradient descent again.".to_string(),
        ]);
        let keywords = make_keywords(&["gradient descent"]);
        let found = locate_keywords(&text, &keywords);
        let occ = found[0].as_ref().unwrap();
        assert_eq!(occ.paragraph_index, 0);
        assert_eq!(occ.offset, "Para1 about ".len());
    }

    #[test]
    fn test_locate_absent_keyword_is_none() {
        let text = SourceText::new(vec!["Nothing to see here.".to_string()]);
        let keywords = make_keywords(&["unicorns"]);
        let found = locate_keywords(&text, &keywords);
        assert!(found[0].is_none());
    }

    #[test]
    fn test_locate_whitespace_run_in_source() {
        let text = SourceText::new(vec!["deep   neural\tnetworks win".to_string()]);
        let keywords = make_keywords(&["neural networks"]);
        let found = locate_keywords(&text, &keywords);
        let occ = found[0].as_ref().unwrap();
        assert_eq!(
            &text.paragraphs[0][occ.offset..occ.offset + occ.len],
            "neural\tnetworks"
        );
    }

    #[test]
    fn test_locate_overlapping_keywords_both_recorded() {
        // One keyword a substring of the other — no mutual exclusion.
        let text = SourceText::new(vec!["stochastic gradient descent converges".to_string()]);
        let keywords = make_keywords(&["gradient descent", "gradient"]);
        let found = locate_keywords(&text, &keywords);
        assert!(found[0].is_some());
        assert!(found[1].is_some());
        assert_eq!(found[0].as_ref().unwrap().offset, "stochastic ".len());
        assert_eq!(found[1].as_ref().unwrap().offset, "stochastic ".len());
    }

    #[test]
    fn test_locate_leftmost_then_topmost() {
        let text = SourceText::new(vec![
            "no match in this paragraph".to_string(),
            "late rust and early rust".to_string(),
        ]);
        let keywords = make_keywords(&["rust"]);
        let found = locate_keywords(&text, &keywords);
        let occ = found[0].as_ref().unwrap();
        assert_eq!(occ.paragraph_index, 1);
        assert_eq!(occ.offset, "late ".len());
    }

    #[test]
    fn test_normalize_collapses_and_lowercases() {
        assert_eq!(normalize("  Neural \t Networks "), "neural networks");
    }
}
