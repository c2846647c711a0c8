//! Core data types for a single triage run.
//!
//! Everything here is created fresh per captured error and discarded when the
//! run completes; nothing is persisted and nothing is shared between runs.

use serde::Serialize;

/// Snapshot of a host-application error at the moment it reached the pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct CapturedError {
    pub message: String,
    pub stack_trace: String,
    /// Runtime classification name, e.g. "TypeError" or "Unknown".
    pub kind: String,
}

impl CapturedError {
    pub fn new(
        message: impl Into<String>,
        stack_trace: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            stack_trace: stack_trace.into(),
            kind: kind.into(),
        }
    }

    /// Builds a snapshot from an `anyhow` chain. The alternate debug render
    /// carries the cause chain plus any captured backtrace, which stands in
    /// for a stack trace. The kind is derived from the root cause; hosts that
    /// know better can use [`CapturedError::new`] and tag the kind directly.
    pub fn from_error(err: &anyhow::Error) -> Self {
        Self {
            message: err.to_string(),
            stack_trace: format!("{:?}", err),
            kind: derive_kind(err).to_string(),
        }
    }

    /// Human-readable category for this error's kind. Total: unknown kinds
    /// map to "Unknown Error".
    pub fn category(&self) -> &'static str {
        categorize(&self.kind)
    }
}

/// Fixed kind -> category table.
pub fn categorize(kind: &str) -> &'static str {
    match kind {
        "TypeError" => "Type Error",
        "ReferenceError" => "Reference Error",
        "SyntaxError" => "Syntax Error",
        "RangeError" => "Range Error",
        "NetworkError" => "Network Error",
        _ => "Unknown Error",
    }
}

/// Best-effort kind derivation by probing the root cause against the error
/// types a host is most likely to bubble up.
fn derive_kind(err: &anyhow::Error) -> &'static str {
    let root = err.root_cause();
    if root.downcast_ref::<std::io::Error>().is_some()
        || root.downcast_ref::<reqwest::Error>().is_some()
    {
        "NetworkError"
    } else if root.downcast_ref::<serde_json::Error>().is_some() {
        "SyntaxError"
    } else if root.downcast_ref::<std::num::ParseIntError>().is_some()
        || root.downcast_ref::<std::num::ParseFloatError>().is_some()
        || root.downcast_ref::<std::num::TryFromIntError>().is_some()
    {
        "RangeError"
    } else if root.downcast_ref::<std::str::Utf8Error>().is_some()
        || root.downcast_ref::<std::string::FromUtf8Error>().is_some()
    {
        "TypeError"
    } else {
        "Unknown"
    }
}

/// Structured output of one analysis. All four fields are always populated:
/// either real model text or the parser's sentinel for that section. A
/// partially-filled result never exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub root_cause: String,
    pub fix: String,
    pub prevention: String,
}

impl AnalysisResult {
    /// All-sentinel result, used where a rendered record is needed but the
    /// backend call itself failed (e.g. the email template).
    pub fn placeholder() -> Self {
        Self {
            summary: crate::providers::parse::NO_SUMMARY.to_string(),
            root_cause: crate::providers::parse::NO_ROOT_CAUSE.to_string(),
            fix: crate::providers::parse::NO_FIX.to_string(),
            prevention: crate::providers::parse::NO_PREVENTION.to_string(),
        }
    }
}

/// Severity tag for console rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Info,
}

/// Per-call options. Supplied by the caller at each invocation; process-wide
/// settings live in [`crate::config::TriageConfig`].
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    pub send_email: bool,
    pub severity: Severity,
    /// Source text around the failure, passed through to the provider
    /// unmodified. May be empty.
    pub code_context: String,
}
