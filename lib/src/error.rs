use thiserror::Error;

/// Missing environment configuration, detected before any client is built.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required settings: {}", .0.join(", "))]
    MissingVars(Vec<&'static str>),
}

/// Failures from a single check-and-alert run.
///
/// Missing configuration is not represented here: the invocation skips
/// before a run starts when settings are absent.
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("storage listing failed: {0}")]
    Storage(String),

    #[error("Discord webhook returned {status}: {body}")]
    WebhookStatus { status: u16, body: String },

    #[error("Discord webhook request failed: {0}")]
    WebhookRequest(#[from] reqwest::Error),
}

impl MonitorError {
    /// Coarse failure class, attached as a structured field on error logs.
    pub fn class(&self) -> &'static str {
        match self {
            MonitorError::Storage(_) => "storage",
            MonitorError::WebhookStatus { .. } | MonitorError::WebhookRequest(_) => "webhook",
        }
    }
}
