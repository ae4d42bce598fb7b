#![allow(clippy::needless_range_loop)]
#![cfg_attr(test, allow(dead_code))]

//! # Transcript Oxide
//!
//! Academic result-sheet analysis over PDF-extracted text: reconstruct
//! tabular grade data from positioned text fragments, and split multi-section
//! transcripts into semesters from weak textual cues.
//!
//! ## Core Features
//!
//! - **Table Reconstruction**: ordered strategy chain (direct grid mapping,
//!   domain proximity mapping, coarse grid fallback) over row/column
//!   clustering, first success wins
//! - **Record Extraction**: typed per-student records with grade points and
//!   GPA under an explicit denominator policy
//! - **Grade Statistics**: per-subject pass rates and grade distributions in
//!   canonical order, plus a whole-document roll-up
//! - **Semester Segmentation**: layered boundary heuristics with confidence
//!   tiers, threshold filtering, and contiguous page grouping
//!
//! The crate consumes positioned tokens and per-page plain text from an
//! external PDF decoder; it never parses PDF bytes itself. All stages are
//! deterministic, best-effort, and page-parallel with an explicit join back
//! into document order.
//!
//! ## Quick Start
//!
//! ```
//! use transcript_oxide::config::ExtractionConfig;
//! use transcript_oxide::pipeline::extract_document;
//! use transcript_oxide::token::Token;
//!
//! let page = vec![
//!     Token::new("CS1001", 10.0, 0.0, 12.0, 10.0),
//!     Token::new("CS1002", 30.0, 0.0, 12.0, 10.0),
//!     Token::new("JOHN DOE", 5.0, 10.0, 18.0, 10.0),
//!     Token::new("A", 12.0, 10.0, 4.0, 10.0),
//!     Token::new("B+", 32.0, 10.0, 6.0, 10.0),
//! ];
//!
//! let output = extract_document(&[page], &ExtractionConfig::default());
//! assert_eq!(output.records[0].name.as_deref(), Some("JOHN DOE"));
//! assert_eq!(output.records[0].subject_grades["CS1001"], "A");
//! ```
//!
//! ## License
//!
//! Licensed under either of Apache License, Version 2.0 or MIT license, at
//! your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Input model and token classification
pub mod classify;
pub mod token;

// Layout analysis
pub mod layout;

// Table reconstruction
pub mod table;

// Records and statistics
pub mod grades;

// Semester segmentation
pub mod segment;

// Document-level orchestration
pub mod pipeline;

pub use config::{ExtractionConfig, GpaDenominator, SegmentationConfig, TierThresholds};
pub use error::{Error, Result};
pub use grades::{OverallStatistics, StudentRecord, SubjectStatistics};
pub use pipeline::{
    extract_document, segment_document, validate_page_number, ExtractionOutput, SegmentationOutput,
};
pub use segment::{ConfidenceTier, SectionBoundary, SemesterGroup};
pub use table::{Column, Table};
pub use token::{Row, Token};
