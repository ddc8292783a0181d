//! Correction logic for each kind of input anomaly.
//!
//! Each function takes the current text and returns the corrected text plus
//! the list of corrections it made. An empty list means the input was left
//! untouched.

use std::fmt;

use crate::config::Rewrite;

/// Category of an applied input correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CorrectionKind {
    /// An HTML entity such as `&gt;` was decoded.
    HtmlEntity,
    /// Leading or trailing whitespace was removed.
    Whitespace,
    /// A configured known-anomaly rewrite replaced the notation.
    KnownRewrite,
}

impl fmt::Display for CorrectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrectionKind::HtmlEntity => write!(f, "HTML entity"),
            CorrectionKind::Whitespace => write!(f, "whitespace"),
            CorrectionKind::KnownRewrite => write!(f, "known rewrite"),
        }
    }
}

/// A detected correction with its details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedCorrection {
    /// The kind of correction applied.
    pub kind: CorrectionKind,
    /// The original text that was corrected.
    pub original: String,
    /// The corrected text.
    pub corrected: String,
}

impl DetectedCorrection {
    /// Create a new detected correction.
    pub fn new(
        kind: CorrectionKind,
        original: impl Into<String>,
        corrected: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            original: original.into(),
            corrected: corrected.into(),
        }
    }

    /// Format a warning message for this correction.
    pub fn warning_message(&self) -> String {
        format!("{}: '{}' → '{}'", self.kind, self.original, self.corrected)
    }
}

const HTML_ENTITIES: [(&str, char); 3] = [("&gt;", '>'), ("&lt;", '<'), ("&amp;", '&')];

/// Decode `&gt;`, `&lt;` and `&amp;` in a single left-to-right pass.
///
/// Decoded text is not rescanned, so `&amp;gt;` becomes `&gt;`.
pub fn unescape_html(input: &str) -> (String, Vec<DetectedCorrection>) {
    let mut result = String::with_capacity(input.len());
    let mut corrections = Vec::new();
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        result.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match HTML_ENTITIES
            .iter()
            .find(|(entity, _)| tail.starts_with(entity))
        {
            Some((entity, decoded)) => {
                corrections.push(DetectedCorrection::new(
                    CorrectionKind::HtmlEntity,
                    *entity,
                    decoded.to_string(),
                ));
                result.push(*decoded);
                rest = &tail[entity.len()..];
            }
            None => {
                result.push('&');
                rest = &tail[1..];
            }
        }
    }
    result.push_str(rest);

    (result, corrections)
}

/// Remove leading and trailing whitespace.
pub fn correct_whitespace(input: &str) -> (String, Vec<DetectedCorrection>) {
    let trimmed = input.trim();
    let corrections = if trimmed.len() != input.len() {
        vec![DetectedCorrection::new(
            CorrectionKind::Whitespace,
            input,
            trimmed,
        )]
    } else {
        Vec::new()
    };
    (trimmed.to_string(), corrections)
}

/// Replace the whole input when it matches a known anomaly.
///
/// Only the first matching rewrite is applied.
pub fn apply_rewrites(input: &str, rewrites: &[Rewrite]) -> (String, Vec<DetectedCorrection>) {
    match rewrites.iter().find(|r| r.from == input) {
        Some(rewrite) => (
            rewrite.to.clone(),
            vec![DetectedCorrection::new(
                CorrectionKind::KnownRewrite,
                input,
                rewrite.to.as_str(),
            )],
        ),
        None => (input.to_string(), Vec::new()),
    }
}
