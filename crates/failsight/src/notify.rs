//! Email notification: fire-and-forget by contract.
//!
//! The dispatcher never errors. An unconfigured address downgrades to a
//! warning and no send; a failed send is logged and swallowed. Delivery
//! outcome is observable only through the tracing side channel, so a
//! notification failure can never affect error-reporting reliability.

use crate::model::{AnalysisResult, CapturedError};
use async_trait::async_trait;
use serde_json::json;

const RESEND_EMAILS_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Call-and-await contract with an email backend.
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()>;
}

/// Resend HTTP client.
pub struct ResendClient {
    api_key: String,
    client: reqwest::Client,
}

impl ResendClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl EmailClient for ResendClient {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        let body = json!({
            "from": message.from,
            "to": message.to,
            "subject": message.subject,
            "html": message.html,
        });

        let resp = self
            .client
            .post(RESEND_EMAILS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_else(|_| String::new());
            anyhow::bail!("Resend API error (status {}): {}", status, error_text);
        }

        Ok(())
    }
}

pub struct NotificationDispatcher {
    client: std::sync::Arc<dyn EmailClient>,
    from: Option<String>,
    to: Option<String>,
}

impl NotificationDispatcher {
    pub fn new(
        client: std::sync::Arc<dyn EmailClient>,
        from: Option<String>,
        to: Option<String>,
    ) -> Self {
        Self { client, from, to }
    }

    /// Sends one alert email. Absent analysis renders with placeholder
    /// sentinels so the template never has a hole.
    pub async fn notify(&self, error: &CapturedError, analysis: Option<&AnalysisResult>) {
        let (from, to) = match (&self.from, &self.to) {
            (Some(from), Some(to)) => (from.clone(), to.clone()),
            _ => {
                tracing::warn!("email configuration is incomplete, skipping notification");
                return;
            }
        };

        let message = EmailMessage {
            from,
            to,
            subject: format!("Error Alert: {}", error.message),
            html: render_template(error, analysis),
        };

        if let Err(err) = self.client.send(&message).await {
            tracing::error!(error = %err, "failed to send error notification email");
        }
    }
}

fn render_template(error: &CapturedError, analysis: Option<&AnalysisResult>) -> String {
    let placeholder;
    let analysis = match analysis {
        Some(a) => a,
        None => {
            placeholder = AnalysisResult::placeholder();
            &placeholder
        }
    };

    format!(
        "<h1>Error Alert</h1>\n\
         <p>Occurred at {}</p>\n\
         <h2>Error Details</h2>\n\
         <pre>{}</pre>\n\n\
         <h2>AI Analysis</h2>\n\
         <h3>Summary</h3>\n<p>{}</p>\n\
         <h3>Root Cause</h3>\n<p>{}</p>\n\
         <h3>Suggested Fix</h3>\n<p>{}</p>\n\
         <h3>Prevention Tips</h3>\n<p>{}</p>",
        chrono::Utc::now().to_rfc3339(),
        error.stack_trace,
        analysis.summary,
        analysis.root_cause,
        analysis.fix,
        analysis.prevention,
    )
}
