//! Student records and grade statistics.
//!
//! A reconstructed [`crate::table::Table`] whose header carries subject codes
//! is turned into typed per-student records, then aggregated into
//! per-subject and whole-document statistics.

pub mod records;
pub mod statistics;

pub use records::{extract_records, StudentRecord};
pub use statistics::{analyze_subjects, failed_subjects, overall_statistics};
pub use statistics::{OverallStatistics, SubjectStatistics};
