//! Extraction of issue-key candidates from free-form chat text.

use std::collections::HashMap;

use anyhow::{Context, Result};
use regex::Regex;

// Uppercase project prefix, numeric suffix, word-bounded on both sides so
// that keys embedded in URLs or prose match while `xPROJ-1` and
// `PROJ-123abc` do not. A directly attached `+` requests extended detail.
const KEY_PATTERN: &str = r"\b([A-Z][A-Z0-9]*-[0-9]+)\b(\+)?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Contextual detail derived for one parsed key.
pub enum IssueDetail {
    #[default]
    Normal,
    /// The key was written with a trailing `+`, asking for the extended
    /// field set.
    Extended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One deduplicated issue-key mention.
pub struct IssueKeyCandidate {
    pub key: String,
    pub detail: IssueDetail,
}

#[derive(Debug, Clone)]
/// Parses chat text into an ordered, deduplicated candidate list.
pub struct IssueKeyParser {
    pattern: Regex,
}

impl IssueKeyParser {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(KEY_PATTERN).context("issue key pattern failed to compile")?;
        Ok(Self { pattern })
    }

    /// Extracts issue-key candidates from `text`.
    ///
    /// Candidates are unique by key and ordered by first mention. When the
    /// same key appears multiple times (including inside tracker browse
    /// URLs, which dedup against plain-text mentions), the last-seen detail
    /// wins: a later `PROJ-1+` upgrades an earlier bare `PROJ-1`.
    ///
    /// An empty result is a normal outcome, never an error.
    pub fn parse(&self, text: &str) -> Vec<IssueKeyCandidate> {
        let mut candidates: Vec<IssueKeyCandidate> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for captures in self.pattern.captures_iter(text) {
            let Some(key) = captures.get(1) else {
                continue;
            };
            let detail = if captures.get(2).is_some() {
                IssueDetail::Extended
            } else {
                IssueDetail::Normal
            };

            match positions.get(key.as_str()) {
                Some(&index) => candidates[index].detail = detail,
                None => {
                    positions.insert(key.as_str().to_string(), candidates.len());
                    candidates.push(IssueKeyCandidate {
                        key: key.as_str().to_string(),
                        detail,
                    });
                }
            }
        }

        candidates
    }
}
