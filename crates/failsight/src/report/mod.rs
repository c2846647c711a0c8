//! Rendering seam for triage output.
//!
//! The orchestrator only knows this trait; the console implementation is a
//! cosmetic collaborator with no invariants beyond rendering what it is given.

pub mod console;

use crate::model::{AnalysisResult, CapturedError, Severity};

pub trait RenderSink: Send + Sync {
    fn render_error(&self, error: &CapturedError, category: &str, severity: Severity);

    fn render_analysis(&self, analysis: &AnalysisResult);
}
