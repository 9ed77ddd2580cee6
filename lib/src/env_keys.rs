pub static AZURE_WEB_JOBS_STORAGE: &str = "AzureWebJobsStorage";
pub static BLOB_ACCOUNT_NAME: &str = "BLOB_ACCOUNT_NAME";
pub static BLOB_CONTAINER_NAME: &str = "BLOB_CONTAINER_NAME";

pub static DISCORD_WEBHOOK_URL: &str = "DISCORD_WEBHOOK_URL";
pub static LABELING_TOOL_URL: &str = "LABELING_TOOL_URL";
