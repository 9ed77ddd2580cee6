use std::future::Future;
use std::pin::Pin;

use azure_identity::create_default_credential;
use azure_storage::{ConnectionString, StorageCredentials};
use azure_storage_blobs::prelude::*;
use futures::StreamExt;
use tracing::debug;

use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::monitor::BlobLister;

/// Credential path for a run, decided from configuration alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// `AzureWebJobsStorage` was set; credentials come out of the
    /// connection string.
    ConnectionString(String),
    /// Ambient credential chain against the account's default blob
    /// endpoint.
    DefaultCredential { account: String },
}

impl CredentialSource {
    pub fn from_config(config: &MonitorConfig) -> Self {
        match &config.connection_string {
            Some(connection_string) => {
                CredentialSource::ConnectionString(connection_string.clone())
            }
            None => CredentialSource::DefaultCredential {
                account: config.account_name.clone(),
            },
        }
    }
}

/// Listing client for the monitored container.
#[derive(Debug, Clone)]
pub struct BlobService {
    container: ContainerClient,
}

impl BlobService {
    /// Build the container client for `config`, picking the credential path
    /// with [`CredentialSource::from_config`].
    pub fn connect(config: &MonitorConfig) -> Result<Self, MonitorError> {
        let service = match CredentialSource::from_config(config) {
            CredentialSource::ConnectionString(raw) => {
                let connection_string = ConnectionString::new(&raw)
                    .map_err(|e| MonitorError::Storage(e.to_string()))?;
                let credentials = connection_string
                    .storage_credentials()
                    .map_err(|e| MonitorError::Storage(e.to_string()))?;
                let account = connection_string
                    .account_name
                    .unwrap_or(config.account_name.as_str())
                    .to_owned();
                BlobServiceClient::new(account, credentials)
            }
            CredentialSource::DefaultCredential { account } => {
                let credential = create_default_credential()
                    .map_err(|e| MonitorError::Storage(e.to_string()))?;
                let credentials = StorageCredentials::token_credential(credential);
                BlobServiceClient::new(account, credentials)
            }
        };

        Ok(Self {
            container: service.container_client(config.container_name.clone()),
        })
    }

    /// Every blob name under `prefix`, across all result pages.
    pub async fn list_names(&self, prefix: &str) -> Result<Vec<String>, MonitorError> {
        let mut names = Vec::new();
        let mut pages = self
            .container
            .list_blobs()
            .prefix(prefix.to_owned())
            .into_stream();

        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| MonitorError::Storage(e.to_string()))?;
            for blob in page.blobs.blobs() {
                names.push(blob.name.clone());
            }
        }

        debug!("listed {} blobs under {}", names.len(), prefix);
        Ok(names)
    }
}

impl BlobLister for BlobService {
    fn list_names<'a>(
        &'a self,
        prefix: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>, MonitorError>> + Send + 'a>> {
        Box::pin(BlobService::list_names(self, prefix))
    }
}
