//! Process-wide triage configuration.
//!
//! Built once by the host at startup and passed by reference into every
//! component that needs it. There is no ambient global: components that want
//! configuration take it explicitly, which keeps them testable in isolation.

use thiserror::Error;

/// Which AI backend the pipeline talks to. Fixed at configuration time; not
/// switchable per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    OpenAi,
    Gemini,
}

impl ProviderKind {
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "gpt-4",
            ProviderKind::Gemini => "gemini-pro",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("either an OpenAI API key or a Google API key is required")]
    NoAiCredential,
    #[error("OpenAI API key is required when the OpenAI provider is selected")]
    MissingOpenAiKey,
    #[error("Google API key is required when the Gemini provider is selected")]
    MissingGoogleKey,
    #[error("Resend API key is required")]
    MissingResendKey,
}

/// Value-holder for credentials and the one-time provider selection.
#[derive(Debug, Clone, Default)]
pub struct TriageConfig {
    pub openai_api_key: Option<String>,
    pub google_api_key: Option<String>,
    pub resend_api_key: Option<String>,
    /// Notification addresses. Both must be set for emails to go out; missing
    /// addresses downgrade notification to a logged warning, not an error.
    pub email_from: Option<String>,
    pub email_to: Option<String>,
    pub provider: ProviderKind,
    /// Overrides the provider's default model when set.
    pub model: Option<String>,
    /// Upper bound on a single backend HTTP call. Zero disables the bound.
    pub request_timeout_secs: u64,
}

impl TriageConfig {
    pub fn new() -> Self {
        Self {
            request_timeout_secs: 60,
            ..Self::default()
        }
    }

    pub fn model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string())
    }

    /// Misconfiguration is the one failure class that is loud and fatal: the
    /// pipeline cannot run at all without credentials, so construction refuses
    /// a config that cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.openai_api_key.is_none() && self.google_api_key.is_none() {
            return Err(ConfigError::NoAiCredential);
        }
        match self.provider {
            ProviderKind::OpenAi if self.openai_api_key.is_none() => {
                return Err(ConfigError::MissingOpenAiKey)
            }
            ProviderKind::Gemini if self.google_api_key.is_none() => {
                return Err(ConfigError::MissingGoogleKey)
            }
            _ => {}
        }
        if self.resend_api_key.is_none() {
            return Err(ConfigError::MissingResendKey);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> TriageConfig {
        TriageConfig {
            openai_api_key: Some("sk-test".into()),
            google_api_key: Some("g-test".into()),
            resend_api_key: Some("re-test".into()),
            email_from: Some("alerts@example.com".into()),
            email_to: Some("oncall@example.com".into()),
            ..TriageConfig::new()
        }
    }

    #[test]
    fn valid_config_passes() {
        assert_eq!(full().validate(), Ok(()));
    }

    #[test]
    fn at_least_one_ai_key_required() {
        let cfg = TriageConfig {
            openai_api_key: None,
            google_api_key: None,
            ..full()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::NoAiCredential));
    }

    #[test]
    fn selected_provider_needs_its_own_key() {
        let cfg = TriageConfig {
            openai_api_key: None,
            provider: ProviderKind::OpenAi,
            ..full()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::MissingOpenAiKey));

        let cfg = TriageConfig {
            google_api_key: None,
            provider: ProviderKind::Gemini,
            ..full()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::MissingGoogleKey));
    }

    #[test]
    fn resend_key_required_unconditionally() {
        let cfg = TriageConfig {
            resend_api_key: None,
            ..full()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::MissingResendKey));
    }

    #[test]
    fn missing_addresses_are_not_a_validation_error() {
        let cfg = TriageConfig {
            email_from: None,
            email_to: None,
            ..full()
        };
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn model_falls_back_to_provider_default() {
        let mut cfg = full();
        assert_eq!(cfg.model(), "gpt-4");
        cfg.provider = ProviderKind::Gemini;
        assert_eq!(cfg.model(), "gemini-pro");
        cfg.model = Some("gemini-1.5-flash".into());
        assert_eq!(cfg.model(), "gemini-1.5-flash");
    }
}
