//! Direct grid mapping strategy.
//!
//! The most precise reconstruction: cluster tokens into rows, find the run
//! of consecutive table-like rows, infer columns from their X positions, and
//! assign every token to its nearest column.

use crate::classify::{classify_token, TokenClass};
use crate::config::ExtractionConfig;
use crate::layout::{cluster_rows, infer_columns};
use crate::table::{Column, Table, TableStrategy};
use crate::token::{Row, Token};

/// Strategy A: direct grid mapping over inferred columns.
pub struct GridStrategy;

impl TableStrategy for GridStrategy {
    fn reconstruct(&self, tokens: &[Token], config: &ExtractionConfig) -> Option<Table> {
        let rows = cluster_rows(tokens, config.row_y_tolerance);
        let candidate = longest_table_like_run(&rows)?;

        let columns = infer_columns(candidate, config.column_merge_tolerance);
        if columns.is_empty() {
            return None;
        }

        let reach = config.column_merge_tolerance * config.cell_assignment_factor;
        let mut grid: Vec<Vec<String>> = Vec::with_capacity(candidate.len());

        for row in candidate {
            let mut cells = vec![String::new(); columns.len()];
            for token in &row.tokens {
                if let Some(col) = nearest_column(&columns, token.x, reach) {
                    if cells[col].is_empty() {
                        cells[col] = token.text.trim().to_string();
                    } else {
                        cells[col].push(' ');
                        cells[col].push_str(token.text.trim());
                    }
                }
            }
            grid.push(cells);
        }

        let (columns, grid) = drop_empty_columns(columns, grid);
        let grid: Vec<Vec<String>> = grid
            .into_iter()
            .filter(|cells| cells.iter().any(|c| !c.is_empty()))
            .collect();

        if grid.len() < 2 || columns.is_empty() {
            return None;
        }

        Some(Table {
            columns,
            rows: grid,
        })
    }

    fn name(&self) -> &'static str {
        "grid"
    }
}

/// Whether a clustered row looks like part of a table.
///
/// Multi-token rows qualify outright; single-token rows qualify when the
/// token is domain-bearing (subject code, register number, grade, or name).
fn is_table_like(row: &Row) -> bool {
    if row.tokens.len() > 1 {
        return true;
    }
    row.tokens
        .iter()
        .any(|t| classify_token(&t.text) != TokenClass::Other)
}

/// Find the best run of consecutive table-like rows (ties go to the first).
///
/// A run must be at least 2 rows. A run containing a header row (2+
/// subject-code tokens) beats a longer run without one; among runs of equal
/// header status, length wins.
fn longest_table_like_run(rows: &[Row]) -> Option<&[Row]> {
    let mut runs: Vec<&[Row]> = Vec::new();
    let mut start = None;

    for (i, row) in rows.iter().enumerate() {
        match (is_table_like(row), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push(&rows[s..i]);
                start = None;
            },
            _ => {},
        }
    }
    if let Some(s) = start {
        runs.push(&rows[s..]);
    }

    // max_by_key keeps the last maximum on ties; fold keeps the first.
    runs.into_iter()
        .filter(|run| run.len() >= 2)
        .fold(None::<&[Row]>, |best, run| {
            let key = |r: &[Row]| (r.iter().any(is_header_row), r.len());
            match best {
                Some(current) if key(current) >= key(run) => Some(current),
                _ => Some(run),
            }
        })
}

/// A header row carries at least two subject-code tokens.
fn is_header_row(row: &Row) -> bool {
    row.tokens
        .iter()
        .filter(|t| classify_token(&t.text) == TokenClass::SubjectCode)
        .count()
        >= 2
}

/// Index of the nearest column within `reach` of `x`, if any.
fn nearest_column(columns: &[Column], x: f32, reach: f32) -> Option<usize> {
    let mut nearest = None;
    let mut nearest_dist = f32::INFINITY;

    for (i, col) in columns.iter().enumerate() {
        let dist = (col.center - x).abs();
        if dist < nearest_dist {
            nearest = Some(i);
            nearest_dist = dist;
        }
    }

    nearest.filter(|_| nearest_dist <= reach)
}

/// Drop columns that are empty across every row and re-index the cells.
fn drop_empty_columns(
    columns: Vec<Column>,
    grid: Vec<Vec<String>>,
) -> (Vec<Column>, Vec<Vec<String>>) {
    let keep: Vec<bool> = (0..columns.len())
        .map(|i| grid.iter().any(|row| !row[i].is_empty()))
        .collect();

    let columns = columns
        .into_iter()
        .zip(&keep)
        .filter_map(|(col, &k)| k.then_some(col))
        .collect();

    let grid = grid
        .into_iter()
        .map(|row| {
            row.into_iter()
                .zip(&keep)
                .filter_map(|(cell, &k)| k.then_some(cell))
                .collect()
        })
        .collect();

    (columns, grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_token(text: &str, x: f32, y: f32) -> Token {
        Token::new(text, x, y, 10.0, 10.0)
    }

    #[test]
    fn test_grid_reconstruction() {
        let config = ExtractionConfig::default();
        let tokens = vec![
            mock_token("CS1001", 10.0, 0.0),
            mock_token("CS1002", 30.0, 0.0),
            mock_token("JOHN DOE", 5.0, 10.0),
            mock_token("A", 12.0, 10.0),
            mock_token("B+", 32.0, 10.0),
        ];

        let table = GridStrategy.reconstruct(&tokens, &config).expect("table");
        assert_eq!(table.rows.len(), 2);
        for row in &table.rows {
            assert_eq!(row.len(), table.columns.len());
        }
    }

    #[test]
    fn test_single_row_is_not_a_table() {
        let config = ExtractionConfig::default();
        let tokens = vec![
            mock_token("CS1001", 10.0, 0.0),
            mock_token("CS1002", 30.0, 0.0),
        ];
        assert!(GridStrategy.reconstruct(&tokens, &config).is_none());
    }

    #[test]
    fn test_prose_rows_are_skipped() {
        let config = ExtractionConfig::default();
        // Single-token prose lines with no domain content
        let tokens = vec![
            mock_token("preamble", 0.0, 0.0),
            mock_token("continued", 0.0, 10.0),
        ];
        assert!(GridStrategy.reconstruct(&tokens, &config).is_none());
    }

    #[test]
    fn test_same_cell_tokens_concatenate() {
        let config = ExtractionConfig::default();
        let tokens = vec![
            mock_token("CS1001", 10.0, 0.0),
            mock_token("CS1002", 50.0, 0.0),
            mock_token("JOHN", 10.0, 10.0),
            mock_token("DOE", 12.0, 10.0),
            mock_token("A", 50.0, 10.0),
        ];

        let table = GridStrategy.reconstruct(&tokens, &config).expect("table");
        assert!(table.rows[1].iter().any(|c| c == "JOHN DOE"));
    }

    #[test]
    fn test_empty_columns_are_dropped() {
        let config = ExtractionConfig::default();
        let tokens = vec![
            mock_token("CS1001", 10.0, 0.0),
            mock_token("CS1002", 30.0, 0.0),
            mock_token("A", 10.0, 10.0),
            mock_token("B", 30.0, 10.0),
        ];

        let table = GridStrategy.reconstruct(&tokens, &config).expect("table");
        for (i, col) in table.columns.iter().enumerate() {
            assert!(
                table.rows.iter().any(|row| !row[i].is_empty()),
                "column at {} is empty across all rows",
                col.center
            );
        }
    }
}
