//! Error types for the result-sheet analysis library.
//!
//! Reconstruction and classification are best-effort by design: malformed
//! tokens are skipped and unparsable rows are dropped rather than failing the
//! whole pipeline. Only structurally fatal conditions surface here.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during result-sheet processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A caller-specified 1-based page number is outside `[1, page_count]`.
    #[error("Invalid page number {page}: document has {page_count} pages")]
    InvalidPageNumber {
        /// The offending 1-based page number
        page: usize,
        /// Total pages in the document
        page_count: usize,
    },

    /// The confidence filter rejected every detected semester boundary.
    #[error("No semester boundary met the confidence threshold {threshold}")]
    LowConfidence {
        /// The threshold that rejected all boundaries
        threshold: f64,
    },

    /// The document has no pages to process.
    #[error("Document is empty")]
    EmptyDocument,
}
