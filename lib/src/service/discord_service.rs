use std::future::Future;
use std::pin::Pin;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::json;
use tracing::debug;

use crate::error::MonitorError;
use crate::monitor::AlertSink;

/// Discord webhook client for backlog alerts.
#[derive(Debug, Clone)]
pub struct DiscordService {
    client: Client,
    headers: HeaderMap,
    webhook_url: String,
}

impl DiscordService {
    pub fn new(webhook_url: String) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Self {
            client: Client::new(),
            headers,
            webhook_url,
        }
    }

    /// Post `message` to the webhook as `{"content": ...}`.
    ///
    /// Discord acknowledges a webhook post with 204 No Content; any other
    /// status is a delivery failure carrying the response body.
    pub async fn send_alert(&self, message: &str) -> Result<(), MonitorError> {
        let body = json!({
            "content": message
        });

        let response = self
            .client
            .post(self.webhook_url.as_str())
            .headers(self.headers.clone())
            .body(body.to_string())
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::NO_CONTENT {
            let body = response.text().await.unwrap_or_default();
            return Err(MonitorError::WebhookStatus {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Discord webhook acknowledged the alert");
        Ok(())
    }
}

impl AlertSink for DiscordService {
    fn send<'a>(
        &'a self,
        message: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), MonitorError>> + Send + 'a>> {
        Box::pin(self.send_alert(message))
    }
}
