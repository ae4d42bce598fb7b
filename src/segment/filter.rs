//! Confidence filtering of detected boundaries.

use crate::config::TierThresholds;
use crate::error::{Error, Result};
use crate::segment::SectionBoundary;

/// Partition boundaries into accepted and rejected under a threshold.
///
/// The threshold in `[0,1]` resolves to a set of accepted tiers via the
/// configured [`TierThresholds`] breakpoints; boundaries outside the set are
/// returned as rejected rather than discarded, so callers can surface what
/// was dropped. An empty accepted list is structurally fatal: the operation
/// fails with [`Error::LowConfidence`] naming the offending threshold, and a
/// caller may retry with a lower one.
pub fn filter_boundaries(
    boundaries: Vec<SectionBoundary>,
    threshold: f64,
    thresholds: &TierThresholds,
) -> Result<(Vec<SectionBoundary>, Vec<SectionBoundary>)> {
    let accepted_tiers = thresholds.accepted_tiers(threshold);

    let (accepted, rejected): (Vec<_>, Vec<_>) = boundaries
        .into_iter()
        .partition(|b| accepted_tiers.contains(&b.tier));

    if accepted.is_empty() {
        log::warn!(
            "confidence filter rejected all {} boundaries at threshold {threshold}",
            rejected.len()
        );
        return Err(Error::LowConfidence { threshold });
    }

    Ok((accepted, rejected))
}
