use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, info};

use lib::config::MonitorConfig;
use lib::monitor;

/// Invocation envelope the Functions host posts to a custom handler.
#[derive(Debug, Default, Deserialize)]
pub struct InvokeRequest {
    #[serde(rename = "Data", default)]
    pub data: Map<String, Value>,
}

/// Timer binding payload. Only the past-due flag matters here; the rest of
/// the schedule status is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TimerInfo {
    pub is_past_due: bool,
}

impl InvokeRequest {
    /// Extract the timer payload. Hosts have shipped it both as an object
    /// and as a JSON string; anything unreadable falls back to the default
    /// instead of failing the invocation.
    pub fn timer_info(&self) -> TimerInfo {
        match self.data.get("timer") {
            Some(Value::String(inner)) => serde_json::from_str(inner).unwrap_or_default(),
            Some(other) => serde_json::from_value(other.clone()).unwrap_or_default(),
            None => TimerInfo::default(),
        }
    }
}

/// Response envelope. The host treats HTTP 200 with this body as a clean
/// run regardless of what happened inside.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvokeResponse {
    pub outputs: Map<String, Value>,
    pub logs: Vec<String>,
    pub return_value: Value,
}

impl InvokeResponse {
    pub fn empty() -> Self {
        Self {
            outputs: Map::new(),
            logs: Vec::new(),
            return_value: Value::Null,
        }
    }
}

/// Timer entry point. Every outcome answers the host with success; the
/// scheduler never sees a failed invocation. The body is parsed leniently
/// for the same reason.
pub async fn blob_checker_invoked(body: String) -> Json<InvokeResponse> {
    let request: InvokeRequest = serde_json::from_str(&body).unwrap_or_default();

    if request.timer_info().is_past_due {
        info!("timer invocation is past due");
    }
    info!("blob checker timer invocation started");

    run_invocation().await;

    Json(InvokeResponse::empty())
}

/// Missing configuration skips before any client is built; failures after
/// that point are logged with their class and swallowed.
async fn run_invocation() {
    let config = match MonitorConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            error!("{}", error);
            return;
        }
    };

    match monitor::check_and_alert(&config).await {
        Ok(count) => {
            info!("blob check completed, {} images counted", count);
        }
        Err(error) => {
            error!(class = error.class(), "blob check failed: {}", error);
        }
    }
}
