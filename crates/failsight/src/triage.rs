//! Pipeline orchestration.
//!
//! One [`TriageService::capture`] call is one independent unit of work:
//! classify, render, analyze, render the analysis, optionally notify. The
//! service holds no per-run state, so concurrent captures interleave freely.
//! `capture` never errors and never panics; everything downstream of the
//! host's original error is absorbed into the tracing side channel.

use crate::config::{ConfigError, TriageConfig};
use crate::model::{AnalysisOptions, CapturedError};
use crate::notify::{NotificationDispatcher, ResendClient};
use crate::providers::{select_analyzer, ErrorAnalyzer};
use crate::report::console::ConsoleSink;
use crate::report::RenderSink;
use std::sync::Arc;

pub struct TriageService {
    analyzer: Arc<dyn ErrorAnalyzer>,
    dispatcher: NotificationDispatcher,
    sink: Arc<dyn RenderSink>,
}

impl TriageService {
    /// Wires the configured provider, the Resend client, and the console
    /// sink. The only loud failure in the crate: a config that cannot work
    /// is rejected here.
    pub fn new(config: &TriageConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let analyzer = select_analyzer(config);
        let resend = ResendClient::new(config.resend_api_key.clone().unwrap_or_default());
        let dispatcher = NotificationDispatcher::new(
            Arc::new(resend),
            config.email_from.clone(),
            config.email_to.clone(),
        );
        Ok(Self {
            analyzer,
            dispatcher,
            sink: Arc::new(ConsoleSink::new()),
        })
    }

    /// Injection constructor for tests and hosts that replace collaborators.
    pub fn with_parts(
        analyzer: Arc<dyn ErrorAnalyzer>,
        dispatcher: NotificationDispatcher,
        sink: Arc<dyn RenderSink>,
    ) -> Self {
        Self {
            analyzer,
            dispatcher,
            sink,
        }
    }

    /// Runs the full pipeline for one captured error.
    pub async fn capture(&self, error: &CapturedError, options: &AnalysisOptions) {
        let category = error.category();
        tracing::debug!(category, kind = %error.kind, "captured error");

        self.sink.render_error(error, category, options.severity);

        // Network-bound suspension point. A failed call already surfaced as
        // None inside the analyzer; nothing to do here but skip rendering.
        let analysis = self.analyzer.analyze(error, &options.code_context).await;

        match &analysis {
            Some(analysis) => self.sink.render_analysis(analysis),
            None => tracing::debug!(
                provider = self.analyzer.provider_name(),
                "no analysis available, skipping render"
            ),
        }

        if options.send_email {
            self.dispatcher.notify(error, analysis.as_ref()).await;
        }
    }
}
