//! Input preprocessing for coding effects and variant names.
//!
//! Report fields arrive with HTML-escaped arrows, stray whitespace and a
//! handful of known dataset anomalies. The [`Preprocessor`] normalizes them
//! before either resolution path sees the text, and records every change as
//! a [`DetectedCorrection`].

pub mod corrections;

pub use corrections::{
    apply_rewrites, correct_whitespace, unescape_html, CorrectionKind, DetectedCorrection,
};

use crate::config::{ResolverConfig, Rewrite};

/// Result of preprocessing an input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessResult {
    /// The original input.
    pub original: String,
    /// The preprocessed input (may be same as original if no corrections).
    pub preprocessed: String,
    /// Corrections applied, in order.
    pub corrections: Vec<DetectedCorrection>,
}

impl PreprocessResult {
    /// Returns true if there were any corrections made.
    pub fn has_corrections(&self) -> bool {
        !self.corrections.is_empty()
    }
}

/// Input preprocessor built from the resolver configuration.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    unescape_html: bool,
    rewrites: Vec<Rewrite>,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new(&ResolverConfig::default())
    }
}

impl Preprocessor {
    /// Create a new preprocessor with the given configuration.
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            unescape_html: config.unescape_html,
            rewrites: config.rewrites.clone(),
        }
    }

    /// Trim and unescape, without anomaly rewrites.
    fn normalize(&self, input: &str, corrections: &mut Vec<DetectedCorrection>) -> String {
        let (mut current, found) = correct_whitespace(input);
        corrections.extend(found);

        if self.unescape_html {
            let (unescaped, found) = unescape_html(&current);
            corrections.extend(found);
            current = unescaped;
        }
        current
    }

    /// Preprocess a coding effect such as `2169_*27&gt;T`.
    ///
    /// Rewrites match the whole effect after unescaping, so the escaped and
    /// literal forms of an anomaly are treated the same.
    pub fn coding_effect(&self, input: &str) -> PreprocessResult {
        let mut corrections = Vec::new();
        let normalized = self.normalize(input, &mut corrections);
        let (preprocessed, found) = apply_rewrites(&normalized, &self.rewrites);
        corrections.extend(found);
        finish(input, preprocessed, corrections)
    }

    /// Preprocess a full variant name such as `NM_000546.5:c.215C&gt;G`.
    ///
    /// Rewrites apply to the part after `:c.`.
    pub fn variant_name(&self, input: &str) -> PreprocessResult {
        let mut corrections = Vec::new();
        let normalized = self.normalize(input, &mut corrections);
        let preprocessed = match normalized.split_once(":c.") {
            Some((accession, change)) => {
                let (change, found) = apply_rewrites(change, &self.rewrites);
                corrections.extend(found);
                format!("{}:c.{}", accession, change)
            }
            None => normalized,
        };
        finish(input, preprocessed, corrections)
    }
}

fn finish(
    input: &str,
    preprocessed: String,
    corrections: Vec<DetectedCorrection>,
) -> PreprocessResult {
    for c in &corrections {
        log::debug!("corrected input '{}': {}", input, c.warning_message());
    }
    PreprocessResult {
        original: input.to_string(),
        preprocessed,
        corrections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_anomaly_escaped_and_literal() {
        let pre = Preprocessor::default();
        let escaped = pre.coding_effect("2169_*27&gt;T");
        let literal = pre.coding_effect("2169_*27>T");
        assert_eq!(escaped.preprocessed, "2169_*27del48");
        assert_eq!(literal.preprocessed, "2169_*27del48");
        assert_eq!(escaped.corrections.len(), 2);
        assert_eq!(literal.corrections.len(), 1);
        assert_eq!(literal.corrections[0].kind, CorrectionKind::KnownRewrite);
    }

    #[test]
    fn test_clean_input_unchanged() {
        let result = Preprocessor::default().coding_effect("229C>A");
        assert_eq!(result.preprocessed, "229C>A");
        assert!(!result.has_corrections());
    }

    #[test]
    fn test_variant_name() {
        let pre = Preprocessor::default();
        let result = pre.variant_name(" NM_000001.1:c.2169_*27&gt;T ");
        assert_eq!(result.preprocessed, "NM_000001.1:c.2169_*27del48");
        let kinds: Vec<_> = result.corrections.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CorrectionKind::Whitespace,
                CorrectionKind::HtmlEntity,
                CorrectionKind::KnownRewrite
            ]
        );

        let result = pre.variant_name("NM_000001.1:c.1G&gt;A");
        assert_eq!(result.preprocessed, "NM_000001.1:c.1G>A");
    }

    #[test]
    fn test_unescape_disabled() {
        let config = ResolverConfig {
            unescape_html: false,
            ..ResolverConfig::default()
        };
        let result = Preprocessor::new(&config).coding_effect("229C&gt;A");
        assert_eq!(result.preprocessed, "229C&gt;A");
        assert!(!result.has_corrections());
    }
}
