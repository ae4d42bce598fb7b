//! Grouping accepted boundaries into contiguous page ranges.

use crate::segment::{SectionBoundary, SemesterGroup};

/// Convert filtered, sorted boundaries into contiguous semester groups.
///
/// Each group runs from its boundary's page to the page before the next
/// boundary (the last group runs to the end of the document). The first
/// group is pulled back to page 0 and boundaries whose page does not advance
/// past the previous one are skipped, so the output always satisfies the
/// coverage invariant: contiguous, non-overlapping, ascending, covering
/// exactly `[0, total_pages - 1]`.
pub fn group_sections(boundaries: &[SectionBoundary], total_pages: usize) -> Vec<SemesterGroup> {
    if total_pages == 0 {
        return vec![];
    }

    // Enforce strictly increasing page order; a boundary sorted later by
    // semester but located earlier in the document cannot form a range.
    let mut ordered: Vec<&SectionBoundary> = Vec::new();
    for boundary in boundaries {
        match ordered.last() {
            Some(prev) if boundary.page_index <= prev.page_index => {
                log::warn!(
                    "skipping boundary for semester {} at page {}: does not advance past page {}",
                    boundary.semester,
                    boundary.page_index,
                    prev.page_index
                );
            },
            _ => ordered.push(boundary),
        }
    }

    let mut groups = Vec::with_capacity(ordered.len());
    for (i, boundary) in ordered.iter().enumerate() {
        let start_page = if i == 0 { 0 } else { boundary.page_index };
        let end_page = match ordered.get(i + 1) {
            Some(next) => next.page_index - 1,
            None => total_pages - 1,
        };
        groups.push(SemesterGroup {
            semester: boundary.semester,
            start_page,
            end_page,
        });
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::ConfidenceTier;

    fn boundary(page: usize, semester: u32) -> SectionBoundary {
        SectionBoundary {
            page_index: page,
            semester,
            tier: ConfidenceTier::High,
        }
    }

    #[test]
    fn test_three_boundaries_fifteen_pages() {
        let boundaries = vec![boundary(0, 1), boundary(5, 2), boundary(10, 3)];

        let groups = group_sections(&boundaries, 15);
        assert_eq!(groups.len(), 3);
        assert_eq!((groups[0].start_page, groups[0].end_page), (0, 4));
        assert_eq!((groups[1].start_page, groups[1].end_page), (5, 9));
        assert_eq!((groups[2].start_page, groups[2].end_page), (10, 14));

        let covered: usize = groups.iter().map(|g| g.page_count()).sum();
        assert_eq!(covered, 15);
    }

    #[test]
    fn test_first_group_pulled_back_to_page_zero() {
        let boundaries = vec![boundary(2, 1), boundary(6, 2)];

        let groups = group_sections(&boundaries, 10);
        assert_eq!(groups[0].start_page, 0);
        assert_eq!(groups[0].end_page, 5);
        assert_eq!(groups[1].end_page, 9);
    }

    #[test]
    fn test_non_advancing_boundary_skipped() {
        let boundaries = vec![boundary(4, 1), boundary(4, 2), boundary(2, 3)];

        let groups = group_sections(&boundaries, 8);
        assert_eq!(groups.len(), 1);
        assert_eq!((groups[0].start_page, groups[0].end_page), (0, 7));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(group_sections(&[], 10).is_empty());
        assert!(group_sections(&[boundary(0, 1)], 0).is_empty());
    }

    #[test]
    fn test_single_boundary_covers_document() {
        let groups = group_sections(&[boundary(0, 1)], 6);
        assert_eq!(groups.len(), 1);
        assert_eq!((groups[0].start_page, groups[0].end_page), (0, 5));
    }
}
