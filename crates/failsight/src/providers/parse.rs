//! Best-effort parsing of model replies into [`AnalysisResult`].
//!
//! LLM output format is not contractually guaranteed, so both strategies are
//! total: they never fail, and a field whose label is missing gets its
//! sentinel instead of being dropped. Parsing twice yields identical results.
//!
//! Two strategies exist because the two prompts constrain the reply
//! differently: the free-form prompt gets a line-oriented scan, the
//! `Label: value` prompt gets greedy label-to-label section capture that
//! tolerates multi-line bodies.

use crate::model::AnalysisResult;
use lazy_static::lazy_static;
use regex::Regex;

pub const NO_SUMMARY: &str = "No summary available";
pub const NO_ROOT_CAUSE: &str = "No root cause analysis available";
pub const NO_FIX: &str = "No fix suggestion available";
pub const NO_PREVENTION: &str = "No prevention tips available";

lazy_static! {
    /// Section bodies run from a label to the next expected label or EOF.
    static ref SUMMARY: Regex = Regex::new(r"(?s)Summary:\s*(.*?)\s*(?:Root Cause:|$)").unwrap();
    static ref ROOT_CAUSE: Regex = Regex::new(r"(?s)Root Cause:\s*(.*?)\s*(?:Fix:|$)").unwrap();
    static ref FIX: Regex = Regex::new(r"(?s)Fix:\s*(.*?)\s*(?:Prevention:|$)").unwrap();
    static ref PREVENTION: Regex = Regex::new(r"(?s)Prevention:\s*(.*)").unwrap();
}

/// Line-oriented scan: for each field, the first line containing the
/// case-sensitive label substring, with a literal `Label:` prefix stripped.
/// Bodies are single-line by construction.
pub fn parse_labeled_lines(raw: &str) -> AnalysisResult {
    AnalysisResult {
        summary: find_line(raw, "Summary").unwrap_or_else(|| NO_SUMMARY.to_string()),
        root_cause: find_line(raw, "Root Cause").unwrap_or_else(|| NO_ROOT_CAUSE.to_string()),
        fix: find_line(raw, "Fix").unwrap_or_else(|| NO_FIX.to_string()),
        prevention: find_line(raw, "Prevention").unwrap_or_else(|| NO_PREVENTION.to_string()),
    }
}

fn find_line(raw: &str, label: &str) -> Option<String> {
    let prefix = format!("{}:", label);
    raw.lines()
        .find(|line| line.contains(label))
        .map(|line| line.trim().trim_start_matches(&prefix).trim().to_string())
}

/// Pattern-bounded capture between consecutive labels. Strictly more robust
/// than the line scan: multi-line bodies survive, and an empty or label-free
/// reply degrades to all four sentinels.
pub fn parse_sections(raw: &str) -> AnalysisResult {
    AnalysisResult {
        summary: capture(&SUMMARY, raw).unwrap_or_else(|| NO_SUMMARY.to_string()),
        root_cause: capture(&ROOT_CAUSE, raw).unwrap_or_else(|| NO_ROOT_CAUSE.to_string()),
        fix: capture(&FIX, raw).unwrap_or_else(|| NO_FIX.to_string()),
        prevention: capture(&PREVENTION, raw).unwrap_or_else(|| NO_PREVENTION.to_string()),
    }
}

fn capture(re: &Regex, raw: &str) -> Option<String> {
    re.captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}
