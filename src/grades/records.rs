//! Table rows to typed student records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::classify::{is_name, is_register_number, is_subject_code};
use crate::config::{ExtractionConfig, GpaDenominator};
use crate::table::Table;

/// One student's reconstructed results.
///
/// Created once per table row that contains at least one subject/grade pair
/// and never mutated afterwards. Missing fields stay `None` rather than
/// failing the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRecord {
    /// 12-digit register number, when a cell carried one
    pub register_number: Option<String>,
    /// Student name, when a cell carried one
    pub name: Option<String>,
    /// Subject code -> grade symbol, in table column order
    pub subject_grades: IndexMap<String, String>,
    /// Subject code -> grade points under the configured scale
    pub grade_points: IndexMap<String, f64>,
    /// Grade-point average under the configured denominator policy
    pub gpa: f64,
}

/// Extract student records from a reconstructed table.
///
/// The header row's subject-code cells define the subject columns; every
/// other column is metadata. Data rows without a single subject/grade pair
/// are dropped, not errored: a transcript with some unparsable rows still
/// yields the rows that did parse.
pub fn extract_records(table: &Table, config: &ExtractionConfig) -> Vec<StudentRecord> {
    let subject_columns: Vec<(usize, &str)> = table
        .header()
        .iter()
        .enumerate()
        .filter(|(_, cell)| is_subject_code(cell))
        .map(|(i, cell)| (i, cell.trim()))
        .collect();

    if subject_columns.is_empty() {
        log::debug!("table header has no subject codes, no records extracted");
        return vec![];
    }

    let mut records = Vec::new();

    for row in table.data_rows() {
        let register_number = row
            .iter()
            .find(|cell| is_register_number(cell))
            .map(|cell| cell.trim().to_string());
        let name = row
            .iter()
            .find(|cell| is_name(cell))
            .map(|cell| cell.trim().to_string());

        let mut subject_grades = IndexMap::new();
        let mut grade_points = IndexMap::new();
        for &(col, code) in &subject_columns {
            let cell = row.get(col).map(|c| c.trim()).unwrap_or("");
            if cell.is_empty() {
                continue;
            }
            subject_grades.insert(code.to_string(), cell.to_string());
            grade_points.insert(code.to_string(), config.grade_points(cell).unwrap_or(0.0));
        }

        if subject_grades.is_empty() {
            log::trace!("dropping row without subject/grade pairs: {:?}", row);
            continue;
        }

        let gpa = compute_gpa(&grade_points, subject_columns.len(), config.gpa_denominator);

        records.push(StudentRecord {
            register_number,
            name,
            subject_grades,
            grade_points,
            gpa,
        });
    }

    records
}

fn compute_gpa(
    grade_points: &IndexMap<String, f64>,
    subject_column_count: usize,
    policy: GpaDenominator,
) -> f64 {
    let denominator = match policy {
        GpaDenominator::SubjectColumns => subject_column_count,
        GpaDenominator::DetectedGrades => grade_points.len(),
    };
    if denominator == 0 {
        return 0.0;
    }
    grade_points.values().sum::<f64>() / denominator as f64
}
