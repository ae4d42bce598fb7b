//! Unified configuration for extraction and segmentation.
//!
//! All options are pure parameters with no I/O. This module consolidates the
//! tolerances, grade tables, and threshold mappings that the individual
//! stages consume, so callers tune one struct instead of threading numbers
//! through every call site.

use indexmap::IndexMap;

use crate::segment::ConfidenceTier;

/// Policy for the GPA denominator on partially-extracted rows.
///
/// Dividing by the table's subject-column count penalizes missing grades
/// (a cell the extractor could not read counts as zero); dividing by the
/// grades actually found averages only what was read. The two differ exactly
/// when extraction is partial, so the choice is an explicit option rather
/// than an implicit default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GpaDenominator {
    /// Divide by the number of subject columns in the table (default).
    #[default]
    SubjectColumns,
    /// Divide by the number of grades actually detected for the record.
    DetectedGrades,
}

/// Configuration for table reconstruction and grade analysis.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Y tolerance for attaching a token to an existing row bucket
    pub row_y_tolerance: f32,
    /// X tolerance for merging token positions into one column
    pub column_merge_tolerance: f32,
    /// Cell assignment reach, as a multiple of `column_merge_tolerance`
    pub cell_assignment_factor: f32,
    /// Y tolerance for matching a grade token to a student slot (semantic strategy)
    pub grade_y_tolerance: f32,
    /// X tolerance for matching a grade token to a subject column (semantic strategy)
    pub grade_x_tolerance: f32,
    /// Grade symbol to grade-point mapping
    pub grade_scale: IndexMap<String, f64>,
    /// Grades that count as a pass, in canonical reporting order
    pub pass_grades: Vec<String>,
    /// Grades that count as a fail, in canonical reporting order
    pub fail_grades: Vec<String>,
    /// Denominator policy for GPA computation
    pub gpa_denominator: GpaDenominator,
    /// Hard cap on pages processed per document; extra pages are skipped
    pub max_pages: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        // 10-point scale; it is the only source table consistent with the
        // documented GPA example ([O,A+,A,B+,B,C] -> 7.5).
        let grade_scale: IndexMap<String, f64> = [
            ("O", 10.0),
            ("A+", 9.0),
            ("A", 8.0),
            ("B+", 7.0),
            ("B", 6.0),
            ("C", 5.0),
            ("P", 4.0),
            ("RA", 0.0),
            ("AB", 0.0),
            ("UA", 0.0),
            ("U", 0.0),
            ("F", 0.0),
            ("W", 0.0),
        ]
        .into_iter()
        .map(|(g, p)| (g.to_string(), p))
        .collect();

        Self {
            row_y_tolerance: 0.5,
            column_merge_tolerance: 3.0,
            cell_assignment_factor: 1.5,
            grade_y_tolerance: 3.0,
            grade_x_tolerance: 15.0,
            grade_scale,
            pass_grades: ["O", "A+", "A", "B+", "B", "C", "P"]
                .iter()
                .map(|g| g.to_string())
                .collect(),
            fail_grades: ["RA", "AB", "UA", "U", "F", "W"]
                .iter()
                .map(|g| g.to_string())
                .collect(),
            gpa_denominator: GpaDenominator::default(),
            max_pages: 200,
        }
    }
}

impl ExtractionConfig {
    /// Grade points for a grade symbol, if the scale knows it.
    pub fn grade_points(&self, grade: &str) -> Option<f64> {
        self.grade_scale.get(grade).copied()
    }

    /// Whether a grade counts as a pass.
    ///
    /// Any grade outside both sets is a fail. An unrecognized symbol is more
    /// likely a misread fail notation than a pass.
    pub fn is_pass(&self, grade: &str) -> bool {
        self.pass_grades.iter().any(|g| g == grade)
    }

    /// A copy with tolerances widened for a retry pass.
    ///
    /// Callers that get an empty extraction back may re-invoke with this
    /// config to trade precision for recall.
    pub fn relaxed(&self) -> Self {
        let mut config = self.clone();
        config.row_y_tolerance *= 2.0;
        config.column_merge_tolerance *= 2.0;
        config.grade_y_tolerance *= 2.0;
        config.grade_x_tolerance *= 1.5;
        config
    }
}

/// Mapping from a numeric confidence threshold to the accepted tier set.
///
/// The breakpoints are part of this crate's contract: a threshold at or above
/// `high` accepts only [`ConfidenceTier::High`]; at or above `medium` also
/// accepts `Medium`; at or above `low` also accepts `Low`; anything lower
/// accepts every tier including `Fallback`.
#[derive(Debug, Clone, Copy)]
pub struct TierThresholds {
    /// Minimum threshold accepting only High boundaries
    pub high: f64,
    /// Minimum threshold accepting High and Medium
    pub medium: f64,
    /// Minimum threshold accepting High, Medium and Low
    pub low: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            high: 0.8,
            medium: 0.5,
            low: 0.3,
        }
    }
}

impl TierThresholds {
    /// Resolve a threshold to the set of accepted tiers.
    pub fn accepted_tiers(&self, threshold: f64) -> Vec<ConfidenceTier> {
        if threshold >= self.high {
            vec![ConfidenceTier::High]
        } else if threshold >= self.medium {
            vec![ConfidenceTier::High, ConfidenceTier::Medium]
        } else if threshold >= self.low {
            vec![
                ConfidenceTier::High,
                ConfidenceTier::Medium,
                ConfidenceTier::Low,
            ]
        } else {
            vec![
                ConfidenceTier::High,
                ConfidenceTier::Medium,
                ConfidenceTier::Low,
                ConfidenceTier::Fallback,
            ]
        }
    }
}

/// Configuration for semester segmentation.
#[derive(Debug, Clone)]
pub struct SegmentationConfig {
    /// Maximum number of semesters a transcript can contain
    pub max_semesters: u32,
    /// Threshold-to-tier mapping used by the confidence filter
    pub tier_thresholds: TierThresholds,
    /// Hard cap on pages classified per document
    pub max_pages: usize,
    /// Synthesize fallback boundaries even when textual cues were found
    pub force_fallback: bool,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            max_semesters: 8,
            tier_thresholds: TierThresholds::default(),
            max_pages: 200,
            force_fallback: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scale_matches_gpa_example() {
        let config = ExtractionConfig::default();
        let grades = ["O", "A+", "A", "B+", "B", "C"];
        let total: f64 = grades
            .iter()
            .map(|g| config.grade_points(g).unwrap())
            .sum();
        assert_eq!(total / grades.len() as f64, 7.5);
    }

    #[test]
    fn test_unknown_grade_is_fail() {
        let config = ExtractionConfig::default();
        assert!(!config.is_pass("Z"));
    }

    #[test]
    fn test_relaxed_widens_tolerances() {
        let config = ExtractionConfig::default();
        let relaxed = config.relaxed();
        assert!(relaxed.row_y_tolerance > config.row_y_tolerance);
        assert!(relaxed.column_merge_tolerance > config.column_merge_tolerance);
    }

    #[test]
    fn test_tier_breakpoints() {
        let thresholds = TierThresholds::default();
        assert_eq!(thresholds.accepted_tiers(0.9), vec![ConfidenceTier::High]);
        assert_eq!(thresholds.accepted_tiers(0.5).len(), 2);
        assert_eq!(thresholds.accepted_tiers(0.3).len(), 3);
        assert_eq!(thresholds.accepted_tiers(0.0).len(), 4);
    }
}
