//! Semester segmentation of multi-section transcripts.
//!
//! A transcript PDF concatenates several semesters' result sheets with only
//! weak textual cues marking where one ends and the next begins. The
//! classifier scores each page with layered heuristics, the confidence
//! filter keeps boundaries the caller trusts, and the grouper turns the
//! survivors into contiguous page ranges.

pub mod classifier;
pub mod filter;
pub mod grouper;

pub use classifier::{classify_page, sort_boundaries, synthesize_fallback};
pub use filter::filter_boundaries;
pub use grouper::group_sections;

use serde::{Deserialize, Serialize};

/// How certain the classifier is that a page starts a semester.
///
/// Declaration order is rank order: `High` sorts before `Fallback`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfidenceTier {
    /// Explicit semester/term wording with a number
    High,
    /// Result-sheet wording near a number
    Medium,
    /// Institution header on a non-first page, semester estimated
    Low,
    /// Synthesized boundary; no textual cue at all
    Fallback,
}

/// A page believed to start a new semester's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBoundary {
    /// 0-based page index
    pub page_index: usize,
    /// Semester number the page is believed to start
    pub semester: u32,
    /// How the boundary was detected
    pub tier: ConfidenceTier,
}

/// A contiguous page range holding one semester's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterGroup {
    /// Semester number
    pub semester: u32,
    /// First page of the range (0-based, inclusive)
    pub start_page: usize,
    /// Last page of the range (0-based, inclusive)
    pub end_page: usize,
}

impl SemesterGroup {
    /// Number of pages in the range.
    pub fn page_count(&self) -> usize {
        self.end_page - self.start_page + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_rank_order() {
        assert!(ConfidenceTier::High < ConfidenceTier::Medium);
        assert!(ConfidenceTier::Medium < ConfidenceTier::Low);
        assert!(ConfidenceTier::Low < ConfidenceTier::Fallback);
    }

    #[test]
    fn test_group_page_count() {
        let group = SemesterGroup {
            semester: 1,
            start_page: 0,
            end_page: 4,
        };
        assert_eq!(group.page_count(), 5);
    }
}
