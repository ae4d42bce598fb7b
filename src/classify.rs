//! Single-pass token classification.
//!
//! Result-sheet tokens fall into a handful of domain categories: subject
//! codes, grade symbols, register numbers, and student names. A token can
//! match more than one surface pattern ("AB" is both a grade notation and an
//! all-caps run), so classification is a single ordered pass with fixed
//! priority — the first classifier to accept wins — and every token gets
//! exactly one tag.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Subject codes: 2-3 capital letters followed by 4 digits (e.g. "CS1001")
    static ref RE_SUBJECT_CODE: Regex = Regex::new(r"^[A-Z]{2,3}\d{4}$").unwrap();

    /// Letter grades with optional +/- plus the absence/withheld notations
    static ref RE_GRADE: Regex = Regex::new(r"^(?:O|[A-F][+-]?|AB|UA|RA|U|W|P)$").unwrap();

    /// Register numbers: exactly 12 consecutive digits
    static ref RE_REGISTER_NUMBER: Regex = Regex::new(r"^\d{12}$").unwrap();

    /// Name-like tokens: an all-caps alphabetic run (spaces and dots allowed)
    static ref RE_NAME: Regex = Regex::new(r"^[A-Z][A-Z .]{2,}$").unwrap();
}

/// Layout words that pass the name pattern but are headings, not students.
const NAME_STOP_WORDS: &[&str] = &[
    "UNIVERSITY",
    "COLLEGE",
    "INSTITUTE",
    "GRADE",
    "GRADES",
    "SUBJECT",
    "CODE",
    "NAME",
    "REGISTER",
    "SEMESTER",
    "RESULT",
    "RESULTS",
    "EXAMINATION",
];

/// The single tag assigned to a classified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// A subject code such as "CS1001"
    SubjectCode,
    /// A grade symbol such as "A+" or "RA"
    Grade,
    /// A 12-digit register number
    RegisterNumber,
    /// A student name
    Name,
    /// Anything else; ignored by the reconstruction strategies
    Other,
}

/// Classify a token's text into exactly one category.
///
/// Priority is SubjectCode > Grade > RegisterNumber > Name: a token matching
/// several patterns gets the highest-priority tag, which keeps a single token
/// from being counted in two categories by different strategies.
///
/// # Examples
///
/// ```
/// use transcript_oxide::classify::{classify_token, TokenClass};
///
/// assert_eq!(classify_token("CS1001"), TokenClass::SubjectCode);
/// assert_eq!(classify_token("AB"), TokenClass::Grade);
/// assert_eq!(classify_token("210419104012"), TokenClass::RegisterNumber);
/// assert_eq!(classify_token("JOHN DOE"), TokenClass::Name);
/// assert_eq!(classify_token("12.5"), TokenClass::Other);
/// ```
pub fn classify_token(text: &str) -> TokenClass {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return TokenClass::Other;
    }

    if RE_SUBJECT_CODE.is_match(trimmed) {
        return TokenClass::SubjectCode;
    }
    if RE_GRADE.is_match(trimmed) {
        return TokenClass::Grade;
    }
    if RE_REGISTER_NUMBER.is_match(trimmed) {
        return TokenClass::RegisterNumber;
    }
    if RE_NAME.is_match(trimmed) && !is_stop_word(trimmed) {
        return TokenClass::Name;
    }

    TokenClass::Other
}

/// Whether the text is a recognized grade symbol.
pub fn is_grade(text: &str) -> bool {
    RE_GRADE.is_match(text.trim())
}

/// Whether the text is a subject code.
pub fn is_subject_code(text: &str) -> bool {
    RE_SUBJECT_CODE.is_match(text.trim())
}

/// Whether the text is a 12-digit register number.
pub fn is_register_number(text: &str) -> bool {
    RE_REGISTER_NUMBER.is_match(text.trim())
}

/// Whether the text reads as a student name (all-caps run, not a heading word).
pub fn is_name(text: &str) -> bool {
    let trimmed = text.trim();
    RE_NAME.is_match(trimmed) && !is_stop_word(trimmed) && !RE_GRADE.is_match(trimmed)
}

fn is_stop_word(text: &str) -> bool {
    text.split_whitespace()
        .all(|word| NAME_STOP_WORDS.contains(&word))
}
