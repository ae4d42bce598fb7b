//! Table reconstruction from positioned tokens.
//!
//! A page's tokens are turned into a logical table by an ordered list of
//! strategies, each a pure function from tokens to an optional [`Table`];
//! the first success wins. The chain runs from the most precise geometry
//! (direct grid mapping) through domain-aware proximity matching down to a
//! coarse rounded grid:
//!
//! - [`GridStrategy`]: nearest-column cell assignment over inferred columns
//! - [`SemanticStrategy`]: name/grade/subject-code proximity mapping
//! - [`CoarseGridStrategy`]: 0.5-unit rounded grid, lowest precision

mod coarse;
mod grid;
mod semantic;

pub use coarse::CoarseGridStrategy;
pub use grid::GridStrategy;
pub use semantic::SemanticStrategy;

use serde::{Deserialize, Serialize};

use crate::config::ExtractionConfig;
use crate::token::Token;

/// An inferred table column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// X coordinate of the column center
    pub center: f32,
    /// Width of the widest token assigned to the column
    pub width: f32,
}

/// A reconstructed logical table.
///
/// Invariants: every row has exactly `columns.len()` cells (empty strings
/// permitted), there are at least 2 rows, and columns ascend by center.
/// The first row is the header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Inferred columns, ascending by center
    pub columns: Vec<Column>,
    /// Cell grid; `rows[0]` is the header row
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// The header row.
    pub fn header(&self) -> &[String] {
        &self.rows[0]
    }

    /// The data rows below the header.
    pub fn data_rows(&self) -> &[Vec<String>] {
        &self.rows[1..]
    }
}

/// Trait for table reconstruction strategies.
///
/// Implementations are pure: no state is shared between strategies, and a
/// failed attempt leaves nothing behind for the next one to trip over.
pub trait TableStrategy: Send + Sync {
    /// Attempt to reconstruct a table from one page's tokens.
    ///
    /// Returns `None` when the tokens do not support this strategy's notion
    /// of a table; the chain then moves on to the next strategy.
    fn reconstruct(&self, tokens: &[Token], config: &ExtractionConfig) -> Option<Table>;

    /// Return the name of this strategy for logging.
    fn name(&self) -> &'static str;
}

/// Run the strategy chain over one page's tokens.
///
/// Strategies are attempted in order; the first to produce a table wins.
/// Returns `None` when every strategy fails, which callers report as a
/// value-level "no table detected" rather than an error.
pub fn reconstruct_table(tokens: &[Token], config: &ExtractionConfig) -> Option<Table> {
    let strategies: [&dyn TableStrategy; 3] =
        [&GridStrategy, &SemanticStrategy, &CoarseGridStrategy];

    for strategy in strategies {
        if let Some(table) = strategy.reconstruct(tokens, config) {
            log::debug!(
                "table reconstructed via {} ({} columns, {} rows)",
                strategy.name(),
                table.columns.len(),
                table.rows.len()
            );
            return Some(table);
        }
        log::trace!("strategy {} produced no table", strategy.name());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_token(text: &str, x: f32, y: f32) -> Token {
        Token::new(text, x, y, 10.0, 10.0)
    }

    #[test]
    fn test_chain_returns_none_on_empty_page() {
        let config = ExtractionConfig::default();
        assert!(reconstruct_table(&[], &config).is_none());
    }

    #[test]
    fn test_chain_finds_grid_table() {
        let config = ExtractionConfig::default();
        let tokens = vec![
            mock_token("CS1001", 10.0, 0.0),
            mock_token("CS1002", 30.0, 0.0),
            mock_token("A", 10.0, 10.0),
            mock_token("B+", 30.0, 10.0),
        ];

        let table = reconstruct_table(&tokens, &config).expect("table");
        assert!(table.rows.len() >= 2);
        for row in &table.rows {
            assert_eq!(row.len(), table.columns.len());
        }
    }
}
