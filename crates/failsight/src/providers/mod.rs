//! AI provider contract and the two backend variants.
//!
//! [`LlmClient`] is the transport seam: one call, one prompt, one text reply.
//! [`ErrorAnalyzer`] is the pipeline-facing contract: build a prompt, invoke
//! the backend exactly once, normalize the reply. A backend failure is the
//! primary isolation boundary: it is logged and surfaces to the caller as
//! `None`, never as an error.

pub mod gemini;
pub mod openai;
pub mod parse;

use crate::config::{ProviderKind, TriageConfig};
use crate::model::{AnalysisResult, CapturedError};
use async_trait::async_trait;
use std::sync::Arc;

/// Call-and-await contract with an AI backend. Transport, auth, and response
/// shape are the implementation's concern; the pipeline only sees text.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> anyhow::Result<String>;

    fn provider_name(&self) -> &'static str;
}

/// The analysis capability the orchestrator depends on. Exactly one
/// implementation is selected at configuration time.
#[async_trait]
pub trait ErrorAnalyzer: Send + Sync {
    /// One-shot analysis. No retries: a failed backend call fails this
    /// analysis (`None`), not the pipeline.
    async fn analyze(&self, error: &CapturedError, code_context: &str) -> Option<AnalysisResult>;

    fn provider_name(&self) -> &'static str;
}

/// OpenAI-flavored analyzer: free-form sectioned prompt, line-oriented
/// reply parsing.
pub struct OpenAiAnalyzer {
    client: Arc<dyn LlmClient>,
}

impl OpenAiAnalyzer {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    fn build_prompt(error: &CapturedError, code_context: &str) -> String {
        format!(
            "Error: {}\n\
             Stack: {}\n\
             Code Context: {}\n\n\
             Please provide:\n\
             1. Error Summary\n\
             2. Root Cause Analysis\n\
             3. Suggested Fix\n\
             4. Prevention Tips\n\n\
             Label each section as `Summary:`, `Root Cause:`, `Fix:` and `Prevention:`.",
            error.message, error.stack_trace, code_context
        )
    }
}

const OPENAI_SYSTEM_PROMPT: &str = "You are an expert developer helping to analyze and fix \
     errors. Provide detailed, structured analysis.";

#[async_trait]
impl ErrorAnalyzer for OpenAiAnalyzer {
    async fn analyze(&self, error: &CapturedError, code_context: &str) -> Option<AnalysisResult> {
        let prompt = Self::build_prompt(error, code_context);
        match self.client.complete(&prompt, Some(OPENAI_SYSTEM_PROMPT)).await {
            Ok(text) => Some(parse::parse_labeled_lines(&text)),
            Err(err) => {
                tracing::warn!(provider = self.provider_name(), error = %err, "analysis call failed");
                None
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

/// Gemini-flavored analyzer: the prompt pins the reply to `Label: value`
/// blocks in a fixed order, so the pattern-bounded parser can capture
/// multi-line section bodies.
pub struct GeminiAnalyzer {
    client: Arc<dyn LlmClient>,
}

impl GeminiAnalyzer {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    fn build_prompt(error: &CapturedError, code_context: &str) -> String {
        format!(
            "Analyze this error and provide a structured response in exactly this format:\n\
             Summary: [brief error description]\n\
             Root Cause: [detailed cause analysis, point to where the error took place ONLY if you have code context]\n\
             Fix: [suggested solution]\n\
             Prevention: [how to prevent this in future, provide corrected code snippet with the fix]\n\n\
             Error details:\n\
             Error: {}\n\
             Stack: {}\n\
             Code Context: {}",
            error.message, error.stack_trace, code_context
        )
    }
}

#[async_trait]
impl ErrorAnalyzer for GeminiAnalyzer {
    async fn analyze(&self, error: &CapturedError, code_context: &str) -> Option<AnalysisResult> {
        let prompt = Self::build_prompt(error, code_context);
        match self.client.complete(&prompt, None).await {
            Ok(text) => Some(parse::parse_sections(&text)),
            Err(err) => {
                tracing::warn!(provider = self.provider_name(), error = %err, "analysis call failed");
                None
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

/// Builds the configured analyzer with its real HTTP client. Call
/// [`TriageConfig::validate`] first; this assumes the selected provider's key
/// is present and falls back to an empty key otherwise (the backend will
/// reject it, which degrades to absent analysis like any other call failure).
pub fn select_analyzer(config: &TriageConfig) -> Arc<dyn ErrorAnalyzer> {
    match config.provider {
        ProviderKind::OpenAi => {
            let client = openai::OpenAiClient::new(
                config.model(),
                config.openai_api_key.clone().unwrap_or_default(),
                config.request_timeout_secs,
            );
            Arc::new(OpenAiAnalyzer::new(Arc::new(client)))
        }
        ProviderKind::Gemini => {
            let client = gemini::GeminiClient::new(
                config.model(),
                config.google_api_key.clone().unwrap_or_default(),
                config.request_timeout_secs,
            );
            Arc::new(GeminiAnalyzer::new(Arc::new(client)))
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::Mutex;

    /// Scripted client: pops the next canned reply, errors when exhausted.
    pub struct MockLlmClient {
        pub responses: Mutex<Vec<anyhow::Result<String>>>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl MockLlmClient {
        pub fn replying(text: &str) -> Self {
            Self {
                responses: Mutex::new(vec![Ok(text.to_string())]),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(msg: &str) -> Self {
            Self {
                responses: Mutex::new(vec![Err(anyhow::anyhow!(msg.to_string()))]),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn complete(&self, prompt: &str, _system: Option<&str>) -> anyhow::Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            let mut resps = self.responses.lock().unwrap();
            if resps.is_empty() {
                anyhow::bail!("no more mock responses");
            }
            resps.remove(0)
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::MockLlmClient;
    use super::*;
    use crate::providers::parse::{NO_FIX, NO_PREVENTION};

    fn sample_error() -> CapturedError {
        CapturedError::new(
            "index out of bounds",
            "at handler::run\nat main",
            "RangeError",
        )
    }

    #[tokio::test]
    async fn openai_analyzer_parses_reply() {
        let client = Arc::new(MockLlmClient::replying(
            "Summary: crash\nRoot Cause: null deref\nFix: add null check\nPrevention: add test",
        ));
        let analyzer = OpenAiAnalyzer::new(client);
        let result = analyzer.analyze(&sample_error(), "").await.unwrap();
        assert_eq!(result.summary, "crash");
        assert_eq!(result.root_cause, "null deref");
        assert_eq!(result.fix, "add null check");
        assert_eq!(result.prevention, "add test");
    }

    #[tokio::test]
    async fn backend_failure_degrades_to_none() {
        let analyzer = OpenAiAnalyzer::new(Arc::new(MockLlmClient::failing("connection refused")));
        assert!(analyzer.analyze(&sample_error(), "").await.is_none());

        let analyzer = GeminiAnalyzer::new(Arc::new(MockLlmClient::failing("503 from upstream")));
        assert!(analyzer.analyze(&sample_error(), "").await.is_none());
    }

    #[tokio::test]
    async fn gemini_analyzer_sentinel_fills_partial_reply() {
        let client = Arc::new(MockLlmClient::replying(
            "Summary: overflow\nRoot Cause: unchecked add on a u8 counter",
        ));
        let analyzer = GeminiAnalyzer::new(client);
        let result = analyzer.analyze(&sample_error(), "").await.unwrap();
        assert_eq!(result.summary, "overflow");
        assert_eq!(result.root_cause, "unchecked add on a u8 counter");
        assert_eq!(result.fix, NO_FIX);
        assert_eq!(result.prevention, NO_PREVENTION);
    }

    #[tokio::test]
    async fn prompt_embeds_error_and_context() {
        let client = Arc::new(MockLlmClient::replying("Summary: s"));
        let analyzer = GeminiAnalyzer::new(client.clone());
        analyzer
            .analyze(&sample_error(), "fn run() { items[9] }")
            .await;
        let prompts = client.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1, "exactly one backend call per analyze");
        assert!(prompts[0].contains("index out of bounds"));
        assert!(prompts[0].contains("at handler::run"));
        assert!(prompts[0].contains("fn run() { items[9] }"));
    }

    #[test]
    fn selection_honors_provider_choice() {
        let mut cfg = TriageConfig {
            openai_api_key: Some("sk-test".into()),
            google_api_key: Some("g-test".into()),
            resend_api_key: Some("re-test".into()),
            ..TriageConfig::new()
        };
        assert_eq!(select_analyzer(&cfg).provider_name(), "openai");
        cfg.provider = ProviderKind::Gemini;
        assert_eq!(select_analyzer(&cfg).provider_name(), "gemini");
    }
}
