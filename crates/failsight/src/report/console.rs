//! Colored console sink. Output goes to stderr so it interleaves with host
//! logging rather than host stdout.

use super::RenderSink;
use crate::model::{AnalysisResult, CapturedError, Severity};
use colored::{Color, Colorize};

const RULE_WIDTH: usize = 50;

pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }

    fn severity_color(severity: Severity) -> Color {
        match severity {
            Severity::Error => Color::Red,
            Severity::Warning => Color::Yellow,
            Severity::Info => Color::Blue,
        }
    }

    fn rule(color: Color) -> String {
        "=".repeat(RULE_WIDTH).color(color).to_string()
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for ConsoleSink {
    fn render_error(&self, error: &CapturedError, category: &str, severity: Severity) {
        let color = Self::severity_color(severity);
        eprintln!("\n{}", Self::rule(color));
        eprintln!("{}", "Error Details:".color(color).bold());
        eprintln!("{}", Self::rule(color));
        eprintln!("{} {}", "Category:".color(color), category);
        eprintln!("{} {}", "Message:".color(color), error.message);
        eprintln!("{}", "Stack Trace:".color(color));
        eprintln!("{}", error.stack_trace.color(color));
    }

    fn render_analysis(&self, analysis: &AnalysisResult) {
        eprintln!("\n{}", Self::rule(Color::Cyan));
        eprintln!("{}", "AI Analysis:".cyan().bold());
        eprintln!("{}", Self::rule(Color::Cyan));

        let sections = [
            ("Summary", &analysis.summary),
            ("Root Cause", &analysis.root_cause),
            ("Suggested Fix", &analysis.fix),
            ("Prevention Tips", &analysis.prevention),
        ];
        for (title, body) in sections {
            eprintln!("\n{}", format!("{}:", title).bold());
            eprintln!("{}", body);
        }
    }
}
