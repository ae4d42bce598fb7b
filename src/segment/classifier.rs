//! Per-page semester boundary classification.
//!
//! Heuristics are layered and ordered; the first to match a page wins.
//! Explicit semester wording is trusted most, result-sheet wording less,
//! a bare institution header least. When no page in the whole document
//! matches anything, boundaries are synthesized by even division.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::SegmentationConfig;
use crate::segment::{ConfidenceTier, SectionBoundary};

lazy_static! {
    /// "semester 3", "SEM-3", "term: 5"
    static ref RE_SEMESTER_NUM: Regex =
        Regex::new(r"(?i)\b(?:semester|sem|term)\s*[.:\-]?\s*([1-8])\b").unwrap();

    /// "3rd semester", "5 sem"
    static ref RE_NUM_SEMESTER: Regex =
        Regex::new(r"(?i)\b([1-8])\s*(?:st|nd|rd|th)?\s*[.\-]?\s*(?:semester|sem|term)\b").unwrap();

    /// "year 2", "2nd year" - converted to a semester by doubling
    static ref RE_YEAR_NUM: Regex =
        Regex::new(r"(?i)\byear\s*[.:\-]?\s*([1-4])\b").unwrap();
    static ref RE_NUM_YEAR: Regex =
        Regex::new(r"(?i)\b([1-4])\s*(?:st|nd|rd|th)?\s*year\b").unwrap();

    /// "results ... 3", "grade sheet 5"
    static ref RE_RESULT_NUM: Regex =
        Regex::new(r"(?i)\b(?:results?|grades?|marks?|scores?)\b\D{0,24}?\b([1-8])\b").unwrap();
    static ref RE_NUM_RESULT: Regex =
        Regex::new(r"(?i)\b([1-8])\b\D{0,24}?\b(?:results?|grades?|marks?|scores?)\b").unwrap();

    /// Institution header wording
    static ref RE_INSTITUTION: Regex =
        Regex::new(r"(?i)\b(?:university|college|institute|department|examinations?)\b").unwrap();
}

/// Classify one page's plain text.
///
/// Stateless per page: no cross-page memory, so pages can be classified in
/// parallel and the results sorted afterwards.
///
/// # Arguments
///
/// * `text` - The page's plain text from the external decoder
/// * `page_index` - 0-based page index
/// * `config` - Segmentation parameters (semester cap)
///
/// # Returns
///
/// A boundary when any heuristic fires, `None` for content pages.
pub fn classify_page(
    text: &str,
    page_index: usize,
    config: &SegmentationConfig,
) -> Option<SectionBoundary> {
    if let Some(semester) = explicit_semester(text) {
        log::debug!("page {page_index}: explicit semester {semester} marker");
        return Some(SectionBoundary {
            page_index,
            semester: semester.min(config.max_semesters),
            tier: ConfidenceTier::High,
        });
    }

    if let Some(semester) = result_keyword_number(text) {
        log::debug!("page {page_index}: result keyword near {semester}");
        return Some(SectionBoundary {
            page_index,
            semester: semester.min(config.max_semesters),
            tier: ConfidenceTier::Medium,
        });
    }

    if page_index > 0 && RE_INSTITUTION.is_match(text) {
        let estimated = (page_index as u32 / 3 + 1).min(config.max_semesters);
        log::debug!("page {page_index}: institution header, estimating semester {estimated}");
        return Some(SectionBoundary {
            page_index,
            semester: estimated,
            tier: ConfidenceTier::Low,
        });
    }

    None
}

/// Semester number from explicit wording, with "year N" doubled.
fn explicit_semester(text: &str) -> Option<u32> {
    if let Some(n) = first_digit(&RE_SEMESTER_NUM, text).or_else(|| first_digit(&RE_NUM_SEMESTER, text))
    {
        return Some(n);
    }
    if let Some(year) = first_digit(&RE_YEAR_NUM, text).or_else(|| first_digit(&RE_NUM_YEAR, text)) {
        return Some(year * 2);
    }
    None
}

/// Digit adjacent to result/grade/mark/score wording, either order.
fn result_keyword_number(text: &str) -> Option<u32> {
    first_digit(&RE_RESULT_NUM, text).or_else(|| first_digit(&RE_NUM_RESULT, text))
}

fn first_digit(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Sort detected boundaries and retain at most one per semester.
///
/// Order within a semester prefers the higher tier, then the earlier page,
/// so the retained boundary is the best evidence for that semester.
pub fn sort_boundaries(mut boundaries: Vec<SectionBoundary>) -> Vec<SectionBoundary> {
    boundaries.sort_by_key(|b| (b.semester, b.tier, b.page_index));
    boundaries.dedup_by_key(|b| b.semester);
    boundaries
}

/// Synthesize one boundary per semester by even page division.
///
/// `min(max_semesters, total_pages)` semesters are laid out over the
/// document; semester `s` starts at `(s-1) * total_pages / count`. Even
/// division keeps every synthesized section within one page of the others.
pub fn synthesize_fallback(total_pages: usize, max_semesters: u32) -> Vec<SectionBoundary> {
    if total_pages == 0 {
        return vec![];
    }
    let count = (max_semesters as usize).min(total_pages);

    (1..=count)
        .map(|sem| SectionBoundary {
            page_index: (sem - 1) * total_pages / count,
            semester: sem as u32,
            tier: ConfidenceTier::Fallback,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SegmentationConfig {
        SegmentationConfig::default()
    }

    #[test]
    fn test_explicit_semester_forms() {
        for text in [
            "Semester 3 Results",
            "SEM-3 Grade Sheet",
            "3rd Semester Examination",
            "Term 3",
        ] {
            let b = classify_page(text, 0, &config()).expect(text);
            assert_eq!(b.semester, 3, "{text}");
            assert_eq!(b.tier, ConfidenceTier::High, "{text}");
        }
    }

    #[test]
    fn test_year_doubles() {
        let b = classify_page("Second Year - Year 2 Examination", 0, &config()).unwrap();
        assert_eq!(b.semester, 4);
        assert_eq!(b.tier, ConfidenceTier::High);
    }

    #[test]
    fn test_result_keyword_is_medium() {
        let b = classify_page("Results for 5", 0, &config()).unwrap();
        assert_eq!(b.semester, 5);
        assert_eq!(b.tier, ConfidenceTier::Medium);

        let b = classify_page("5 - grade sheet", 0, &config()).unwrap();
        assert_eq!(b.tier, ConfidenceTier::Medium);
    }

    #[test]
    fn test_institution_header_is_low_and_skips_first_page() {
        assert!(classify_page("ANNA UNIVERSITY", 0, &config()).is_none());

        let b = classify_page("ANNA UNIVERSITY", 7, &config()).unwrap();
        assert_eq!(b.tier, ConfidenceTier::Low);
        assert_eq!(b.semester, 3); // 7/3 + 1
    }

    #[test]
    fn test_plain_page_yields_nothing() {
        assert!(classify_page("lorem ipsum content", 4, &config()).is_none());
    }

    #[test]
    fn test_semester_wins_over_result_keyword() {
        let b = classify_page("Semester 2 results 5", 0, &config()).unwrap();
        assert_eq!(b.semester, 2);
        assert_eq!(b.tier, ConfidenceTier::High);
    }

    #[test]
    fn test_sort_retains_one_per_semester() {
        let boundaries = vec![
            SectionBoundary {
                page_index: 6,
                semester: 2,
                tier: ConfidenceTier::Low,
            },
            SectionBoundary {
                page_index: 5,
                semester: 2,
                tier: ConfidenceTier::High,
            },
            SectionBoundary {
                page_index: 0,
                semester: 1,
                tier: ConfidenceTier::High,
            },
        ];

        let sorted = sort_boundaries(boundaries);
        assert_eq!(sorted.len(), 2);
        assert_eq!(sorted[0].semester, 1);
        assert_eq!(sorted[1].page_index, 5);
        assert_eq!(sorted[1].tier, ConfidenceTier::High);
    }

    #[test]
    fn test_fallback_even_division() {
        let boundaries = synthesize_fallback(12, 8);
        assert_eq!(boundaries.len(), 8);
        assert_eq!(boundaries[0].page_index, 0);
        assert!(boundaries.iter().all(|b| b.tier == ConfidenceTier::Fallback));
        // Even division: consecutive starts differ by 1 or 2 pages
        for pair in boundaries.windows(2) {
            let gap = pair[1].page_index - pair[0].page_index;
            assert!((1..=2).contains(&gap));
        }
    }

    #[test]
    fn test_fallback_fewer_pages_than_semesters() {
        let boundaries = synthesize_fallback(3, 8);
        assert_eq!(boundaries.len(), 3);
        let pages: Vec<usize> = boundaries.iter().map(|b| b.page_index).collect();
        assert_eq!(pages, [0, 1, 2]);
    }
}
