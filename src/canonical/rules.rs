//! Redirect and tracking wrapper rules.
//!
//! # Rules (evaluated in this order, every one of them, against the raw input)
//! - google-redirect: `.../url?...url=<value>&...` → percent-decoded `<value>`
//! - amp: `<scheme>://www.google.com/amp/s/<rest>` → `<scheme>://<rest>`,
//!   then `<sep>amp<sep>` tokens collapse to `<sep>`
//! - amazon: `https://[www.|smile.]amazon.<tld>/.../dp/<ASIN>/` →
//!   `https://www.amazon.<tld>/dp/<ASIN>/`
//!
//! A later match overwrites an earlier one; the result is the last rule
//! that matched, not the most specific.

use percent_encoding::percent_decode_str;
use regex::Regex;

use crate::canonical::types::{CanonicalUrl, Rule};

/// Compiled rule set. Build once and share.
#[derive(Debug, Clone)]
pub struct UrlCanonicalizer {
    google_redirect: Regex,
    amp: Regex,
    amazon: Regex,
}

impl UrlCanonicalizer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            google_redirect: Regex::new(r"/url\?(?:[^&]*&)*?url=([^&]*)&")?,
            amp: Regex::new(r"^(\w+)://www\.google\.com/amp/s/(.*)$")?,
            amazon: Regex::new(
                r"https://(?:www\.|smile\.)?amazon\.([a-z.]+)/(?:.*/)?dp/([A-Za-z0-9]{10})/",
            )?,
        })
    }

    /// Unwrap `raw`. Pure; the caller re-attaches any query string first.
    pub fn canonicalize(&self, raw: &str) -> CanonicalUrl {
        let mut resolved = None;
        let mut rule = None;

        for candidate_rule in Rule::ORDER {
            if let Some(candidate) = self.apply(candidate_rule, raw) {
                tracing::trace!(rule = %candidate_rule, candidate = %candidate, "Rule matched");
                resolved = Some(candidate);
                rule = Some(candidate_rule);
            }
        }

        CanonicalUrl {
            original: raw.to_string(),
            resolved,
            rule,
        }
    }

    fn apply(&self, rule: Rule, raw: &str) -> Option<String> {
        match rule {
            Rule::GoogleRedirect => {
                let caps = self.google_redirect.captures(raw)?;
                Some(percent_decode_str(&caps[1]).decode_utf8_lossy().into_owned())
            }
            Rule::Amp => {
                let caps = self.amp.captures(raw)?;
                Some(collapse_amp_tokens(&format!("{}://{}", &caps[1], &caps[2])))
            }
            Rule::Amazon => {
                let caps = self.amazon.captures(raw)?;
                Some(format!("https://www.amazon.{}/dp/{}/", &caps[1], &caps[2]))
            }
        }
    }
}

/// Replace every `<sep>amp<sep>` (case-insensitive, both separators the same
/// non-alphanumeric character) with a single `<sep>`.
///
/// Matches are found left to right and do not overlap.
fn collapse_amp_tokens(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        let sep = chars[i];
        let is_token = i + 4 < chars.len()
            && !sep.is_alphanumeric()
            && chars[i + 4] == sep
            && chars[i + 1].eq_ignore_ascii_case(&'a')
            && chars[i + 2].eq_ignore_ascii_case(&'m')
            && chars[i + 3].eq_ignore_ascii_case(&'p');

        out.push(sep);
        i += if is_token { 5 } else { 1 };
    }

    out
}
