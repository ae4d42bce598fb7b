//! Document-level orchestration.
//!
//! Per-page work (row clustering, table reconstruction, boundary
//! classification) is independent across pages and fans out over a rayon
//! thread pool. Completion order is not page order, so every fan-out joins
//! into a page-indexed collection and re-sorts before anything
//! order-sensitive happens: full-text concatenation, aggregate statistics,
//! and boundary filtering all see pages in original document order.

use rayon::prelude::*;
use serde::Serialize;

use crate::config::{ExtractionConfig, SegmentationConfig};
use crate::error::{Error, Result};
use crate::grades::{
    analyze_subjects, extract_records, overall_statistics, OverallStatistics, StudentRecord,
    SubjectStatistics,
};
use crate::layout::cluster_rows;
use crate::segment::{
    classify_page, filter_boundaries, group_sections, sort_boundaries, synthesize_fallback,
    SectionBoundary, SemesterGroup,
};
use crate::table::{reconstruct_table, Table};
use crate::token::Token;

/// Everything extracted from one document.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutput {
    /// Reconstructed tables, one entry per page that yielded one, in page order
    pub tables: Vec<Table>,
    /// Student records from all tables, in page order
    pub records: Vec<StudentRecord>,
    /// Per-subject statistics over all records
    pub subjects: Vec<SubjectStatistics>,
    /// Whole-document roll-up
    pub overall: OverallStatistics,
    /// Plain text of the document assembled from clustered rows
    pub full_text: String,
    /// Set when no page yielded a table; never a thrown error, callers may
    /// retry with [`ExtractionConfig::relaxed`]
    pub error: Option<String>,
}

/// Segmentation result: semester groups plus what the filter dropped.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentationOutput {
    /// Contiguous page ranges, one per accepted semester boundary
    pub groups: Vec<SemesterGroup>,
    /// Boundaries the confidence filter rejected
    pub rejected_boundaries: Vec<SectionBoundary>,
}

/// Extract tables, records, and statistics from a whole document.
///
/// `pages` holds one token list per page, as produced by the external PDF
/// decoder. Pages are processed in parallel and joined back into document
/// order. Extraction is best-effort: pages without a recognizable table
/// contribute only text, and the `error` field reports a document with no
/// tables at all as a value rather than a failure.
pub fn extract_document(pages: &[Vec<Token>], config: &ExtractionConfig) -> ExtractionOutput {
    let pages = cap_pages(pages, config.max_pages);

    // Fan out per page, then join and restore page order.
    let mut per_page: Vec<(usize, String, Option<Table>)> = pages
        .par_iter()
        .enumerate()
        .map(|(index, tokens)| {
            let rows = cluster_rows(tokens, config.row_y_tolerance);
            let text = rows
                .iter()
                .map(|row| row.text())
                .collect::<Vec<_>>()
                .join("\n");
            let table = reconstruct_table(tokens, config);
            if table.is_none() {
                log::debug!("page {index}: no table detected");
            }
            (index, text, table)
        })
        .collect();
    per_page.sort_by_key(|(index, _, _)| *index);

    let full_text = per_page
        .iter()
        .map(|(_, text, _)| text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let tables: Vec<Table> = per_page
        .into_iter()
        .filter_map(|(_, _, table)| table)
        .collect();

    let records: Vec<StudentRecord> = tables
        .iter()
        .flat_map(|table| extract_records(table, config))
        .collect();

    let subjects = analyze_subjects(&records, config);
    let overall = overall_statistics(&subjects);

    let error = tables
        .is_empty()
        .then(|| "no table detected in document".to_string());

    ExtractionOutput {
        tables,
        records,
        subjects,
        overall,
        full_text,
        error,
    }
}

/// Split a document's pages into semester groups.
///
/// Pages are classified in parallel; the boundaries are explicitly sorted
/// (parallel completion order is not page order) before filtering and
/// grouping. Fails with [`Error::LowConfidence`] when the threshold rejects
/// every boundary and [`Error::EmptyDocument`] when there are no pages.
pub fn segment_document(
    page_texts: &[String],
    threshold: f64,
    config: &SegmentationConfig,
) -> Result<SegmentationOutput> {
    if page_texts.is_empty() {
        return Err(Error::EmptyDocument);
    }
    let page_texts = cap_pages(page_texts, config.max_pages);

    let mut boundaries: Vec<SectionBoundary> = page_texts
        .par_iter()
        .enumerate()
        .filter_map(|(index, text)| classify_page(text, index, config))
        .collect();

    if boundaries.is_empty() || config.force_fallback {
        log::debug!(
            "no boundary cues across {} pages, synthesizing fallback",
            page_texts.len()
        );
        boundaries = synthesize_fallback(page_texts.len(), config.max_semesters);
    }
    let boundaries = sort_boundaries(boundaries);

    let (accepted, rejected) = filter_boundaries(boundaries, threshold, &config.tier_thresholds)?;
    let groups = group_sections(&accepted, page_texts.len());

    Ok(SegmentationOutput {
        groups,
        rejected_boundaries: rejected,
    })
}

/// Validate a caller-supplied 1-based page number against the page count.
///
/// External collaborators slice the original PDF by page range; a request
/// outside `[1, page_count]` is structurally fatal.
pub fn validate_page_number(page: usize, page_count: usize) -> Result<()> {
    if page == 0 || page > page_count {
        return Err(Error::InvalidPageNumber { page, page_count });
    }
    Ok(())
}

fn cap_pages<T>(pages: &[T], max_pages: usize) -> &[T] {
    if pages.len() > max_pages {
        log::warn!(
            "document has {} pages, processing only the first {max_pages}",
            pages.len()
        );
        &pages[..max_pages]
    } else {
        pages
    }
}
