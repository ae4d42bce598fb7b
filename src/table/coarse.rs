//! Coarse rounded-grid fallback strategy.
//!
//! Last resort when neither grid geometry nor semantic anchors hold up:
//! snap every classified token to a 0.5-unit grid and read the grid off as a
//! table. Precision is the lowest of the chain, but a page with any regular
//! structure at all still yields rows.

use crate::classify::{classify_token, TokenClass};
use crate::config::ExtractionConfig;
use crate::table::{Column, Table, TableStrategy};
use crate::token::Token;

/// Strategy C: 0.5-unit rounded grid.
pub struct CoarseGridStrategy;

/// Snap a coordinate to half-unit grid index.
fn snap(v: f32) -> i32 {
    (v * 2.0).round() as i32
}

impl TableStrategy for CoarseGridStrategy {
    fn reconstruct(&self, tokens: &[Token], _config: &ExtractionConfig) -> Option<Table> {
        let classified: Vec<&Token> = tokens
            .iter()
            .filter(|t| classify_token(&t.text) != TokenClass::Other)
            .collect();

        if classified.is_empty() {
            return None;
        }

        let mut xs: Vec<i32> = classified.iter().map(|t| snap(t.x)).collect();
        xs.sort_unstable();
        xs.dedup();

        let mut ys: Vec<i32> = classified.iter().map(|t| snap(t.y)).collect();
        ys.sort_unstable();
        ys.dedup();

        if ys.len() < 2 {
            return None;
        }

        let mut grid = vec![vec![String::new(); xs.len()]; ys.len()];
        let mut widths = vec![0.0f32; xs.len()];

        // Fill in reading order so same-cell concatenation is left-to-right.
        let mut ordered = classified;
        ordered.sort_by(|a, b| {
            snap(a.y)
                .cmp(&snap(b.y))
                .then(snap(a.x).cmp(&snap(b.x)))
        });

        for token in ordered {
            let row = ys.binary_search(&snap(token.y)).expect("snapped y");
            let col = xs.binary_search(&snap(token.x)).expect("snapped x");
            let cell = &mut grid[row][col];
            if cell.is_empty() {
                *cell = token.text.trim().to_string();
            } else {
                cell.push(' ');
                cell.push_str(token.text.trim());
            }
            widths[col] = widths[col].max(token.width);
        }

        let rows: Vec<Vec<String>> = grid
            .into_iter()
            .filter(|row| row.iter().any(|c| !c.is_empty()))
            .collect();

        if rows.len() < 2 {
            return None;
        }

        let columns = xs
            .iter()
            .zip(widths)
            .map(|(&x, width)| Column {
                center: x as f32 / 2.0,
                width,
            })
            .collect();

        Some(Table { columns, rows })
    }

    fn name(&self) -> &'static str {
        "coarse-grid"
    }
}
