//! Canonicalization result types.

use std::fmt;

use thiserror::Error;

/// Rewrite rule that produced a canonical URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    GoogleRedirect,
    Amp,
    Amazon,
}

impl Rule {
    /// Evaluation order. Later rules overwrite earlier candidates.
    pub const ORDER: [Rule; 3] = [Rule::GoogleRedirect, Rule::Amp, Rule::Amazon];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::GoogleRedirect => "google-redirect",
            Rule::Amp => "amp",
            Rule::Amazon => "amazon",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw URL together with its canonical form, if any rule matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalUrl {
    pub original: String,
    pub resolved: Option<String>,
    pub rule: Option<Rule>,
}

impl CanonicalUrl {
    /// The resolved URL, or `UnrecognizedFormat` when no rule matched.
    pub fn into_resolved(self) -> Result<String, CanonicalizeError> {
        self.resolved.ok_or(CanonicalizeError::UnrecognizedFormat)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanonicalizeError {
    #[error("Invalid input (URL format not recognised)")]
    UnrecognizedFormat,
}
