//! Y-tolerance clustering of tokens into visual rows.
//!
//! PDF decoders emit tokens in content-stream order, which rarely matches
//! reading order. Grouping by approximate Y coordinate recovers the visual
//! rows of the page regardless of emission order.

use crate::token::{Row, Token};

/// Cluster one page's tokens into visual rows.
///
/// Greedy bucket scan: each token attaches to the first existing bucket whose
/// representative Y is within `y_tolerance`; otherwise it opens a new bucket.
/// After placement, buckets are sorted by representative Y ascending and each
/// bucket's tokens by X ascending.
///
/// Tie-break policy: a token within tolerance of two buckets attaches to the
/// first bucket found, not the nearest. Buckets are scanned in ascending
/// representative-Y order, so the outcome does not depend on the order the
/// decoder emitted tokens in.
///
/// # Arguments
///
/// * `tokens` - The page's tokens, in any order
/// * `y_tolerance` - Maximum |ΔY| for a token to join an existing row
///
/// # Returns
///
/// Rows ordered top to bottom, tokens within each row left to right.
pub fn cluster_rows(tokens: &[Token], y_tolerance: f32) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();

    // Place tokens in ascending-Y order so bucket creation (and therefore the
    // first-match tie-break) is independent of decoder emission order.
    let mut ordered: Vec<&Token> = tokens.iter().filter(|t| !t.text.trim().is_empty()).collect();
    ordered.sort_by(|a, b| {
        a.y.partial_cmp(&b.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    for token in ordered {
        match rows.iter_mut().find(|row| (row.y - token.y).abs() <= y_tolerance) {
            Some(row) => row.tokens.push(token.clone()),
            None => rows.push(Row {
                y: token.y,
                tokens: vec![token.clone()],
            }),
        }
    }

    rows.sort_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal));
    for row in &mut rows {
        row.tokens
            .sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
    }

    log::trace!(
        "row clustering: {} tokens -> {} rows (tolerance {})",
        tokens.len(),
        rows.len(),
        y_tolerance
    );

    rows
}
