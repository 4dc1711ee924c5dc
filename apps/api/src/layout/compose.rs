//! Page composition — groups styled lines and annotations into immutable,
//! format-agnostic artifacts.
//!
//! Pure aggregation: ordering is preserved exactly as produced upstream and
//! no layout decisions are made here. Identical inputs always compose
//! structurally identical artifacts.

use serde::{Deserialize, Serialize};

use crate::layout::annotate::Annotation;
use crate::layout::grid::{row_count, GridCell};
use crate::layout::highlight::StyledLine;

/// One finished page of the annotated-document artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageArtifact {
    pub index: usize,
    pub lines: Vec<StyledLine>,
    pub annotations: Vec<Annotation>,
}

/// The annotated-document artifact: pages of positioned runs and labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentArtifact {
    pub pages: Vec<PageArtifact>,
}

/// The keyword index artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridArtifact {
    pub columns: usize,
    pub rows: usize,
    pub cells: Vec<GridCell>,
}

/// Groups lines and annotations by page.
///
/// Every page up to the highest page index appears, including pages that
/// carry only re-anchored annotations and no text.
pub fn compose_document(lines: Vec<StyledLine>, annotations: Vec<Annotation>) -> DocumentArtifact {
    let page_count = lines
        .iter()
        .map(|l| l.page_index + 1)
        .chain(annotations.iter().map(|a| a.page_index + 1))
        .max()
        .unwrap_or(0);

    let mut pages: Vec<PageArtifact> = (0..page_count)
        .map(|index| PageArtifact {
            index,
            lines: Vec::new(),
            annotations: Vec::new(),
        })
        .collect();

    for line in lines {
        pages[line.page_index].lines.push(line);
    }
    for annotation in annotations {
        pages[annotation.page_index].annotations.push(annotation);
    }

    DocumentArtifact { pages }
}

/// Wraps distributed cells into the grid artifact.
pub fn compose_grid(cells: Vec<GridCell>, columns: usize) -> GridArtifact {
    GridArtifact {
        columns,
        rows: row_count(cells.len(), columns),
        cells,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
