//! Resume Heuristic Filter: a cheap keyword gate run before any LLM call.
//!
//! Intentionally permissive: the model performs the authoritative check.

/// Section headings and terms that show up in almost every resume.
pub const RESUME_KEYWORDS: [&str; 10] = [
    "education",
    "experience",
    "skills",
    "projects",
    "internship",
    "certification",
    "objective",
    "summary",
    "work experience",
    "technical skills",
];

/// Minimum number of distinct keywords for a document to count as a resume.
pub const MIN_KEYWORD_MATCHES: usize = 3;

/// Number of distinct keywords appearing (case-insensitively, as substrings) in `text`.
pub fn keyword_matches(text: &str) -> usize {
    let text = text.to_lowercase();
    RESUME_KEYWORDS
        .iter()
        .filter(|keyword| text.contains(*keyword))
        .count()
}

pub fn is_probable_resume(text: &str) -> bool {
    keyword_matches(text) >= MIN_KEYWORD_MATCHES
}
