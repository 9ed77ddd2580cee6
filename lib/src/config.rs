use crate::env_keys::{
    AZURE_WEB_JOBS_STORAGE, BLOB_ACCOUNT_NAME, BLOB_CONTAINER_NAME, DISCORD_WEBHOOK_URL,
    LABELING_TOOL_URL,
};
use crate::error::ConfigError;

/// Settings for one monitor invocation, resolved from the environment up
/// front and handed down read-only from there.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub account_name: String,
    pub container_name: String,
    pub webhook_url: String,
    pub labeling_tool_url: String,
    /// Storage connection string. When present it wins over the ambient
    /// credential chain.
    pub connection_string: Option<String>,
}

impl MonitorConfig {
    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolve through `lookup`, collecting every absent required variable
    /// so the skip log can name the whole set at once. A variable set to
    /// the empty string counts as absent.
    pub fn resolve<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).filter(|value| !value.is_empty());

        let account_name = required(BLOB_ACCOUNT_NAME);
        let container_name = required(BLOB_CONTAINER_NAME);
        let webhook_url = required(DISCORD_WEBHOOK_URL);
        let labeling_tool_url = required(LABELING_TOOL_URL);

        let missing: Vec<&'static str> = [
            (BLOB_ACCOUNT_NAME, account_name.is_none()),
            (BLOB_CONTAINER_NAME, container_name.is_none()),
            (DISCORD_WEBHOOK_URL, webhook_url.is_none()),
            (LABELING_TOOL_URL, labeling_tool_url.is_none()),
        ]
        .into_iter()
        .filter_map(|(key, absent)| absent.then_some(key))
        .collect();

        match (account_name, container_name, webhook_url, labeling_tool_url) {
            (Some(account_name), Some(container_name), Some(webhook_url), Some(labeling_tool_url)) => {
                Ok(Self {
                    account_name,
                    container_name,
                    webhook_url,
                    labeling_tool_url,
                    connection_string: required(AZURE_WEB_JOBS_STORAGE),
                })
            }
            _ => Err(ConfigError::MissingVars(missing)),
        }
    }
}
