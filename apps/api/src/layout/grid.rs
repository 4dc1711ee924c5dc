//! Column distribution — assigns keywords to (column, row) cells for the
//! keyword index artifact.
//!
//! Cells fill top-to-bottom then left-to-right: reading the grid
//! column-major reproduces the input order exactly. Only the last column may
//! have empty trailing rows.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::layout::locate::Keyword;

/// One populated grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub keyword: Keyword,
    pub column: usize,
    pub row: usize,
}

/// Rows needed for `keyword_count` keywords in `columns` columns.
pub fn row_count(keyword_count: usize, columns: usize) -> usize {
    keyword_count.div_ceil(columns)
}

/// Distributes keywords over `columns` columns in input order.
///
/// `columns == 0` violates the caller contract and is rejected; an empty
/// keyword list yields an empty (valid) grid.
pub fn distribute(keywords: &[Keyword], columns: usize) -> Result<Vec<GridCell>, AppError> {
    if columns == 0 {
        return Err(AppError::Validation(
            "grid column count must be at least 1".to_string(),
        ));
    }
    if keywords.is_empty() {
        return Ok(Vec::new());
    }

    let rows = row_count(keywords.len(), columns);
    Ok(keywords
        .iter()
        .enumerate()
        .map(|(i, keyword)| GridCell {
            keyword: keyword.clone(),
            column: i / rows,
            row: i % rows,
        })
        .collect())
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
    fn test_distribute_zero_columns_is_error() {
        let keywords = make_keywords(&["a"]);
        assert!(distribute(&keywords, 0).is_err());
    }

    #[test]
    fn test_distribute_empty_keywords_empty_grid() {
        let cells = distribute(&[], 3).unwrap();
        assert!(cells.is_empty());
        assert_eq!(row_count(0, 3), 0);
    }

    #[test]
    fn test_distribute_two_keywords_three_columns() {
        // Two keywords, three columns: rows = 1, one keyword per column.
        let keywords = make_keywords(&["neural networks", "gradient descent"]);
        let cells = distribute(&keywords, 3).unwrap();
        assert_eq!(row_count(2, 3), 1);
        assert_eq!(cells.len(), 2);
        assert_eq!((cells[0].column, cells[0].row), (0, 0));
        assert_eq!(cells[0].keyword.text, "neural networks");
        assert_eq!((cells[1].column, cells[1].row), (1, 0));
        assert_eq!(cells[1].keyword.text, "gradient descent");
    }

    #[test]
    fn test_distribute_five_keywords_three_columns() {
        // rows = 2; col0 = [a, b], col1 = [c, d], col2 = [e].
        let keywords = make_keywords(&["a", "b", "c", "d", "e"]);
        let cells = distribute(&keywords, 3).unwrap();
        assert_eq!(row_count(5, 3), 2);
        let placed: Vec<(usize, usize, &str)> = cells
            .iter()
            .map(|c| (c.column, c.row, c.keyword.text.as_str()))
            .collect();
        assert_eq!(
            placed,
            vec![
                (0, 0, "a"),
                (0, 1, "b"),
                (1, 0, "c"),
                (1, 1, "d"),
                (2, 0, "e"),
            ]
        );
    }

    #[test]
    fn test_distribute_column_major_reading_reproduces_input() {
        let texts: Vec<String> = (0..17).map(|i| format!("kw{i}")).collect();
        let refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
        let keywords = make_keywords(&refs);
        let columns = 4;
        let mut cells = distribute(&keywords, columns).unwrap();
        assert_eq!(cells.len(), 17);
        cells.sort_by_key(|c| (c.column, c.row));
        let read_back: Vec<usize> = cells.iter().map(|c| c.keyword.ordinal).collect();
        assert_eq!(read_back, (0..17).collect::<Vec<_>>());
    }

    #[test]
    fn test_distribute_single_column() {
        let keywords = make_keywords(&["a", "b", "c"]);
        let cells = distribute(&keywords, 1).unwrap();
        for (i, cell) in cells.iter().enumerate() {
            assert_eq!(cell.column, 0);
            assert_eq!(cell.row, i);
        }
    }
}
