//! failsight: AI-assisted triage for runtime errors.
//!
//! When a host-application error reaches the pipeline it is classified,
//! rendered to the console, explained by a configurable AI backend, and
//! optionally forwarded as an email alert. Every invocation is a one-shot,
//! stateless analysis: nothing is persisted, nothing is retried, and nothing
//! the pipeline does can suppress or alter the original error.
//!
//! ```no_run
//! use failsight::{watch, AnalysisOptions, TriageConfig, TriageService};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = TriageConfig {
//!     openai_api_key: Some(std::env::var("OPENAI_API_KEY")?),
//!     resend_api_key: Some(std::env::var("RESEND_API_KEY")?),
//!     email_from: Some("alerts@example.com".into()),
//!     email_to: Some("oncall@example.com".into()),
//!     ..TriageConfig::new()
//! };
//! let triage = TriageService::new(&config)?;
//!
//! let value = watch(&triage, AnalysisOptions::default(), async {
//!     run_the_risky_thing().await
//! })
//! .await?;
//! # Ok(())
//! # }
//! # async fn run_the_risky_thing() -> anyhow::Result<u32> { Ok(1) }
//! ```

pub mod config;
pub mod model;
pub mod notify;
pub mod providers;
pub mod report;
pub mod triage;

pub use config::{ConfigError, ProviderKind, TriageConfig};
pub use model::{AnalysisOptions, AnalysisResult, CapturedError, Severity};
pub use notify::{EmailClient, NotificationDispatcher};
pub use providers::{ErrorAnalyzer, LlmClient};
pub use report::RenderSink;
pub use triage::TriageService;

use std::future::Future;

/// Runs `fut` under triage: on failure the error is captured, the pipeline
/// runs to completion (including any requested notification), and the
/// original error is returned to the caller unchanged.
///
/// Code context cannot be recovered from a compiled future, so callers who
/// want the provider to see source text supply it via
/// [`AnalysisOptions::code_context`].
pub async fn watch<T, F>(
    triage: &TriageService,
    options: AnalysisOptions,
    fut: F,
) -> anyhow::Result<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match fut.await {
        Ok(value) => Ok(value),
        Err(err) => {
            let captured = CapturedError::from_error(&err);
            triage.capture(&captured, &options).await;
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::test_support::MockEmailClient;
    use crate::notify::NotificationDispatcher;
    use crate::providers::test_support::MockLlmClient;
    use crate::providers::OpenAiAnalyzer;
    use crate::report::console::ConsoleSink;
    use std::sync::Arc;

    fn quiet_service(llm: MockLlmClient) -> TriageService {
        TriageService::with_parts(
            Arc::new(OpenAiAnalyzer::new(Arc::new(llm))),
            NotificationDispatcher::new(Arc::new(MockEmailClient::new()), None, None),
            Arc::new(ConsoleSink::new()),
        )
    }

    #[tokio::test]
    async fn watch_passes_success_through() {
        let svc = quiet_service(MockLlmClient::replying("unused"));
        let out = watch(&svc, AnalysisOptions::default(), async { Ok(41 + 1) }).await;
        assert_eq!(out.unwrap(), 42);
    }

    #[tokio::test]
    async fn watch_reraises_the_original_error() {
        let svc = quiet_service(MockLlmClient::failing("backend down"));
        let out: anyhow::Result<()> = watch(&svc, AnalysisOptions::default(), async {
            Err(anyhow::anyhow!("the real failure"))
        })
        .await;
        // The pipeline's own backend failure must not replace the host error.
        assert_eq!(out.unwrap_err().to_string(), "the real failure");
    }

    #[tokio::test]
    async fn watch_forwards_code_context_to_the_provider() {
        let llm = MockLlmClient::replying("Summary: s");
        let prompts = {
            let client = Arc::new(llm);
            let svc = TriageService::with_parts(
                Arc::new(OpenAiAnalyzer::new(client.clone())),
                NotificationDispatcher::new(Arc::new(MockEmailClient::new()), None, None),
                Arc::new(ConsoleSink::new()),
            );
            let options = AnalysisOptions {
                code_context: "fn risky() { panic!() }".to_string(),
                ..AnalysisOptions::default()
            };
            let _: anyhow::Result<()> =
                watch(&svc, options, async { Err(anyhow::anyhow!("boom")) }).await;
            let prompts = client.prompts.lock().unwrap().clone();
            prompts
        };
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("fn risky() { panic!() }"));
    }
}
