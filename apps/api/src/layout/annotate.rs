//! Annotation placement — maps each keyword occurrence to a vertical anchor
//! in the margin column and resolves label-to-label collisions.
//!
//! Labels are sorted per page by their natural anchor (the top of the line
//! containing the occurrence) and pushed DOWN only, never up, so the
//! top-to-bottom label order always matches occurrence order. A label pushed
//! past the page bottom is re-anchored at the top of the immediately
//! following page with a warning; it never cascades further (a carried label
//! pushed past the bottom again keeps its anchor, rendering below the nominal
//! bottom, and is flagged). Labels still at their natural anchor never
//! relocate: their line is on the page, so the label sits beside it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::layout::engine::EngineWarning;
use crate::layout::flow::Line;
use crate::layout::font_metrics::LayoutConfig;
use crate::layout::locate::{Keyword, Occurrence};

/// A margin label with its collision-resolved vertical anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub keyword: Keyword,
    pub page_index: usize,
    /// Resolved anchor, ≥ the natural anchor of the occurrence line.
    pub anchor_y: f32,
}

/// One label waiting for collision resolution on a page.
struct PendingLabel {
    keyword: Keyword,
    natural_y: f32,
    /// Source position, used only for same-line tie-breaking.
    source_pos: (usize, usize),
    /// True once the label has been re-anchored from an earlier page.
    carried: bool,
}

/// Pushes each later anchor down until it sits at least `min_gap` below its
/// predecessor. Input must be sorted ascending; the relative order never
/// changes and no value ever moves up.
pub(crate) fn resolve_monotonic(anchors: &mut [f32], min_gap: f32) {
    for i in 1..anchors.len() {
        if anchors[i] - anchors[i - 1] < min_gap {
            anchors[i] = anchors[i - 1] + min_gap;
        }
    }
}

/// Places one annotation per present occurrence and resolves collisions.
///
/// Returns the annotations in (page, anchor) order together with any
/// overflow warnings.
pub fn place_annotations(
    keywords: &[Keyword],
    occurrences: &[Option<Occurrence>],
    lines: &[Line],
    config: &LayoutConfig,
) -> (Vec<Annotation>, Vec<EngineWarning>) {
    let mut by_page: BTreeMap<usize, Vec<PendingLabel>> = BTreeMap::new();

    for occ in occurrences.iter().flatten() {
        let Some(line) = lines.iter().find(|l| {
            l.paragraph_index == occ.paragraph_index && l.start <= occ.offset && occ.offset < l.end
        }) else {
            continue;
        };
        by_page.entry(line.page_index).or_default().push(PendingLabel {
            keyword: keywords[occ.keyword_ordinal].clone(),
            natural_y: line.y,
            source_pos: (occ.paragraph_index, occ.offset),
            carried: false,
        });
    }

    let mut annotations: Vec<Annotation> = Vec::new();
    let mut warnings: Vec<EngineWarning> = Vec::new();
    let mut carried: Vec<PendingLabel> = Vec::new();
    let mut page = match by_page.keys().next() {
        Some(&first) => first,
        None => return (annotations, warnings),
    };

    // Re-anchor threshold: pushed labels resolving below this leave the page.
    let bottom = (config.content_height_pt - config.min_label_gap_pt).max(0.0);

    while !carried.is_empty() || by_page.range(page..).next().is_some() {
        let mut labels: Vec<PendingLabel> = std::mem::take(&mut carried);
        if let Some(natural) = by_page.remove(&page) {
            labels.extend(natural);
        }
        if labels.is_empty() {
            page += 1;
            continue;
        }

        // Carried labels keep their arrival order at the top; natural labels
        // sort by anchor, then by source position (equal anchors share a line).
        labels.sort_by(|a, b| {
            b.carried
                .cmp(&a.carried)
                .then(a.natural_y.total_cmp(&b.natural_y))
                .then(a.source_pos.cmp(&b.source_pos))
        });

        let mut anchors: Vec<f32> = labels.iter().map(|l| l.natural_y).collect();
        resolve_monotonic(&mut anchors, config.min_label_gap_pt);

        for (label, anchor_y) in labels.into_iter().zip(anchors) {
            // Only a label actually pushed below its line relocates; one still
            // at its natural anchor sits beside a line that is on this page.
            let pushed = anchor_y > label.natural_y;

            if pushed && anchor_y > bottom && !label.carried {
                warnings.push(EngineWarning::AnnotationOverflow {
                    keyword: label.keyword.text.clone(),
                    from_page: page,
                    to_page: page + 1,
                });
                carried.push(PendingLabel {
                    keyword: label.keyword,
                    natural_y: 0.0,
                    source_pos: label.source_pos,
                    carried: true,
                });
                continue;
            }

            if pushed && anchor_y > bottom {
                // Already re-anchored once — keep the resolved anchor past the
                // nominal bottom instead of cascading to a third page.
                // Collapsing onto the bottom slot would break the minimum gap.
                warn!(
                    keyword = %label.keyword.text,
                    page,
                    "margin label overflows the page bottom after re-anchoring"
                );
                warnings.push(EngineWarning::AnnotationOverflow {
                    keyword: label.keyword.text.clone(),
                    from_page: page,
                    to_page: page,
                });
            }

            annotations.push(Annotation {
                keyword: label.keyword,
                page_index: page,
                anchor_y,
            });
        }

        page += 1;
    }

    (annotations, warnings)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
