//! Per-subject and whole-document grade statistics.
//!
//! Statistics are derived values, recomputed in full on every call; nothing
//! here mutates incrementally. Grade distributions iterate the configured
//! pass set, then the fail set, then anything else, so output ordering is
//! canonical rather than insertion order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::ExtractionConfig;
use crate::grades::records::StudentRecord;

/// Aggregate results for one subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectStatistics {
    /// Subject code
    pub subject_code: String,
    /// Students who took the subject
    pub total_students: usize,
    /// Students with a passing grade
    pub passed: usize,
    /// Students with a failing (or unrecognized) grade
    pub failed: usize,
    /// `passed / total * 100`, rounded to 2 decimals
    pub pass_percentage: f64,
    /// Grade symbol -> count, in canonical grade order
    pub grade_distribution: IndexMap<String, usize>,
}

/// Whole-document roll-up across subjects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallStatistics {
    /// Largest per-subject cohort (students appear once per subject taken)
    pub total_students: usize,
    /// Passing subject-student attempts
    pub total_passed: usize,
    /// Failing subject-student attempts
    pub total_failed: usize,
    /// `passed / attempts * 100`, rounded to 2 decimals
    pub overall_pass_rate: f64,
}

/// Compute per-subject statistics over a set of records.
///
/// Subjects are reported in ascending code order.
pub fn analyze_subjects(
    records: &[StudentRecord],
    config: &ExtractionConfig,
) -> Vec<SubjectStatistics> {
    let mut codes: Vec<&str> = records
        .iter()
        .flat_map(|r| r.subject_grades.keys().map(|c| c.as_str()))
        .collect();
    codes.sort_unstable();
    codes.dedup();

    codes
        .into_iter()
        .map(|code| subject_statistics(code, records, config))
        .collect()
}

fn subject_statistics(
    code: &str,
    records: &[StudentRecord],
    config: &ExtractionConfig,
) -> SubjectStatistics {
    let grades: Vec<&str> = records
        .iter()
        .filter_map(|r| r.subject_grades.get(code).map(|g| g.as_str()))
        .collect();

    let total_students = grades.len();
    let passed = grades.iter().filter(|g| config.is_pass(g)).count();
    let failed = total_students - passed;

    let mut grade_distribution = IndexMap::new();
    for canonical in config.pass_grades.iter().chain(config.fail_grades.iter()) {
        let count = grades.iter().filter(|g| *g == canonical).count();
        if count > 0 {
            grade_distribution.insert(canonical.clone(), count);
        }
    }
    // Off-scale symbols, appended in sorted order after the canonical sets.
    let mut extras: Vec<&str> = grades
        .iter()
        .filter(|g| {
            !config.pass_grades.iter().any(|c| c == **g)
                && !config.fail_grades.iter().any(|c| c == **g)
        })
        .copied()
        .collect();
    extras.sort_unstable();
    extras.dedup();
    for extra in extras {
        let count = grades.iter().filter(|g| **g == extra).count();
        grade_distribution.insert(extra.to_string(), count);
    }

    SubjectStatistics {
        subject_code: code.to_string(),
        total_students,
        passed,
        failed,
        pass_percentage: percentage(passed, total_students),
        grade_distribution,
    }
}

/// Compute the whole-document roll-up from per-subject statistics.
///
/// `total_students` is the maximum per-subject cohort, not a sum: a student
/// appears once per subject they took.
pub fn overall_statistics(subjects: &[SubjectStatistics]) -> OverallStatistics {
    let total_students = subjects.iter().map(|s| s.total_students).max().unwrap_or(0);
    let total_passed: usize = subjects.iter().map(|s| s.passed).sum();
    let total_failed: usize = subjects.iter().map(|s| s.failed).sum();

    OverallStatistics {
        total_students,
        total_passed,
        total_failed,
        overall_pass_rate: percentage(total_passed, total_passed + total_failed),
    }
}

/// Subject codes a record failed (unknown grades count as failures).
pub fn failed_subjects(record: &StudentRecord, config: &ExtractionConfig) -> Vec<String> {
    record
        .subject_grades
        .iter()
        .filter(|(_, grade)| !config.is_pass(grade))
        .map(|(code, _)| code.clone())
        .collect()
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 100.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn mock_record(grades: &[(&str, &str)], config: &ExtractionConfig) -> StudentRecord {
        let subject_grades: IndexMap<String, String> = grades
            .iter()
            .map(|(c, g)| (c.to_string(), g.to_string()))
            .collect();
        let grade_points: IndexMap<String, f64> = grades
            .iter()
            .map(|(c, g)| (c.to_string(), config.grade_points(g).unwrap_or(0.0)))
            .collect();
        let gpa = if grade_points.is_empty() {
            0.0
        } else {
            grade_points.values().sum::<f64>() / grade_points.len() as f64
        };
        StudentRecord {
            register_number: None,
            name: None,
            subject_grades,
            grade_points,
            gpa,
        }
    }

    #[test]
    fn test_pass_fail_counts() {
        let config = ExtractionConfig::default();
        let records = vec![
            mock_record(&[("CS1001", "A")], &config),
            mock_record(&[("CS1001", "RA")], &config),
            mock_record(&[("CS1001", "B+")], &config),
        ];

        let subjects = analyze_subjects(&records, &config);
        assert_eq!(subjects.len(), 1);
        let cs = &subjects[0];
        assert_eq!(cs.total_students, 3);
        assert_eq!(cs.passed, 2);
        assert_eq!(cs.failed, 1);
        assert_eq!(cs.pass_percentage, 66.67);
    }

    #[test]
    fn test_unknown_grade_counts_as_fail() {
        let config = ExtractionConfig::default();
        let records = vec![mock_record(&[("CS1001", "Z")], &config)];

        let subjects = analyze_subjects(&records, &config);
        assert_eq!(subjects[0].failed, 1);
        assert_eq!(subjects[0].passed, 0);
    }

    #[test]
    fn test_distribution_in_canonical_order() {
        let config = ExtractionConfig::default();
        // Insertion order here is F before O; canonical order must win.
        let records = vec![
            mock_record(&[("CS1001", "F")], &config),
            mock_record(&[("CS1001", "O")], &config),
            mock_record(&[("CS1001", "A")], &config),
        ];

        let subjects = analyze_subjects(&records, &config);
        let keys: Vec<&String> = subjects[0].grade_distribution.keys().collect();
        assert_eq!(keys, ["O", "A", "F"]);
    }

    #[test]
    fn test_overall_students_is_max_not_sum() {
        let config = ExtractionConfig::default();
        let records = vec![
            mock_record(&[("CS1001", "A"), ("CS1002", "B")], &config),
            mock_record(&[("CS1001", "RA")], &config),
        ];

        let subjects = analyze_subjects(&records, &config);
        let overall = overall_statistics(&subjects);
        assert_eq!(overall.total_students, 2);
        assert_eq!(overall.total_passed, 2);
        assert_eq!(overall.total_failed, 1);
        assert_eq!(overall.overall_pass_rate, 66.67);
    }

    #[test]
    fn test_failed_subjects_listing() {
        let config = ExtractionConfig::default();
        let record = mock_record(&[("CS1001", "A"), ("CS1002", "U"), ("CS1003", "Z")], &config);

        let failed = failed_subjects(&record, &config);
        assert_eq!(failed, ["CS1002", "CS1003"]);
    }

    #[test]
    fn test_empty_records() {
        let config = ExtractionConfig::default();
        let subjects = analyze_subjects(&[], &config);
        assert!(subjects.is_empty());
        let overall = overall_statistics(&subjects);
        assert_eq!(overall.total_students, 0);
        assert_eq!(overall.overall_pass_rate, 0.0);
    }
}
