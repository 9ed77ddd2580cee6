pub mod blob_service;
pub mod discord_service;

use crate::config::MonitorConfig;
use crate::error::MonitorError;


/// One service per external collaborator, built fresh for each invocation.
#[derive(Debug, Clone)]
pub struct CommonService {
    pub blob: blob_service::BlobService,
    pub discord: discord_service::DiscordService,
}

impl CommonService {
    pub fn new(config: &MonitorConfig) -> Result<Self, MonitorError> {
        let blob = blob_service::BlobService::connect(config)?;
        let discord = discord_service::DiscordService::new(config.webhook_url.clone());

        Ok(Self { blob, discord })
    }
}
