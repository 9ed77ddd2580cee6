use std::future::Future;
use std::pin::Pin;

use tracing::warn;

use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::service::CommonService;

/// Intake folder that accumulates images awaiting labeling.
pub const RAW_PREFIX: &str = "raw/";

/// Image count above which the operator is alerted.
pub const IMAGE_ALERT_THRESHOLD: usize = 500;

/// Suffixes counted as images, compared case-insensitively.
pub const IMAGE_SUFFIXES: [&str; 5] = [".jpg", ".jpeg", ".png", ".bmp", ".gif"];

/// Prefix-scoped listing of blob names. Prefix scoping is the storage
/// side's contract; callers only filter by suffix.
pub trait BlobLister: Send + Sync {
    fn list_names<'a>(
        &'a self,
        prefix: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<String>, MonitorError>> + Send + 'a>>;
}

/// Destination for a formatted alert message.
pub trait AlertSink: Send + Sync {
    fn send<'a>(
        &'a self,
        message: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), MonitorError>> + Send + 'a>>;
}

/// True when `name` ends with one of [`IMAGE_SUFFIXES`], ignoring case.
pub fn is_image_name(name: &str) -> bool {
    let lowered = name.to_lowercase();
    IMAGE_SUFFIXES.iter().any(|suffix| lowered.ends_with(suffix))
}

/// Number of image-suffixed names in a listing.
pub fn count_images(names: &[String]) -> usize {
    names.iter().filter(|name| is_image_name(name)).count()
}

/// Discord markdown for the backlog alert, embedding the count and a link
/// to the labeling tool.
pub fn build_alert_message(count: usize, labeling_tool_url: &str) -> String {
    format!(
        "🚨 {} images have piled up under `{}`! 🚨\n\
        The labeling fairy is crying 😭\n\
        Please run a labeling session and export the results!\n\
        [🖼️ Open the labeling tool]({})\n\
        (Ignore this message and the pile only grows... 🤖)",
        count, RAW_PREFIX, labeling_tool_url
    )
}

/// One scheduled check: list the intake folder, count images, and alert
/// when the backlog crosses the threshold.
///
/// Returns the image count. At most one webhook post happens per call, and
/// only when the count strictly exceeds [`IMAGE_ALERT_THRESHOLD`].
pub async fn run_check<L, S>(
    config: &MonitorConfig,
    lister: &L,
    sink: &S,
) -> Result<usize, MonitorError>
where
    L: BlobLister,
    S: AlertSink,
{
    let names = lister.list_names(RAW_PREFIX).await?;
    let count = count_images(&names);
    warn!("{} images under {}", count, RAW_PREFIX);

    if count > IMAGE_ALERT_THRESHOLD {
        let message = build_alert_message(count, &config.labeling_tool_url);
        sink.send(&message).await?;
        warn!("Discord alert delivered");
    }

    Ok(count)
}

/// Production wiring: build the per-invocation services and run the check.
pub async fn check_and_alert(config: &MonitorConfig) -> Result<usize, MonitorError> {
    let service = CommonService::new(config)?;
    run_check(config, &service.blob, &service.discord).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct StubLister {
        names: Vec<String>,
        fail: bool,
    }

    impl StubLister {
        fn with_names(names: Vec<String>) -> Self {
            Self { names, fail: false }
        }

        fn failing() -> Self {
            Self {
                names: Vec::new(),
                fail: true,
            }
        }
    }

    impl BlobLister for StubLister {
        fn list_names<'a>(
            &'a self,
            prefix: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<String>, MonitorError>> + Send + 'a>> {
            Box::pin(async move {
                if self.fail {
                    return Err(MonitorError::Storage("container offline".to_string()));
                }
                // server-side prefix scan
                Ok(self
                    .names
                    .iter()
                    .filter(|name| name.starts_with(prefix))
                    .cloned()
                    .collect())
            })
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        sent: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingSink {
        fn failing() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn messages(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl AlertSink for RecordingSink {
        fn send<'a>(
            &'a self,
            message: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<(), MonitorError>> + Send + 'a>> {
            Box::pin(async move {
                if self.fail {
                    return Err(MonitorError::WebhookStatus {
                        status: 500,
                        body: "boom".to_string(),
                    });
                }
                self.sent.lock().unwrap().push(message.to_string());
                Ok(())
            })
        }
    }

    fn test_config() -> MonitorConfig {
        MonitorConfig {
            account_name: "intakestore".to_string(),
            container_name: "images".to_string(),
            webhook_url: "https://discord.example/hook".to_string(),
            labeling_tool_url: "https://label.example.com".to_string(),
            connection_string: None,
        }
    }

    fn raw_images(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("raw/img_{}.jpg", i)).collect()
    }

    #[test]
    fn image_suffixes_match_case_insensitively() {
        assert!(is_image_name("raw/shot.jpg"));
        assert!(is_image_name("raw/SHOT.JPG"));
        assert!(is_image_name("raw/shot.Png"));
        assert!(is_image_name("raw/shot.JPeG"));
        assert!(is_image_name("raw/scan.bmp"));
        assert!(is_image_name("raw/anim.GIF"));
    }

    #[test]
    fn non_image_names_are_not_counted() {
        assert!(!is_image_name("raw/notes.txt"));
        assert!(!is_image_name("raw/archive.jpg.zip"));
        assert!(!is_image_name("raw/jpg"));
        assert!(!is_image_name("raw/folder"));
        assert!(!is_image_name(""));
    }

    #[test]
    fn counts_only_image_names() {
        let names = vec![
            "raw/a.jpg".to_string(),
            "raw/b.PNG".to_string(),
            "raw/readme.md".to_string(),
            "raw/c.gif".to_string(),
        ];
        assert_eq!(count_images(&names), 3);
    }

    #[test]
    fn alert_message_embeds_count_and_labeling_link() {
        let message = build_alert_message(512, "https://label.example.com");
        assert!(message.contains("512"));
        assert!(message.contains("(https://label.example.com)"));
        assert!(message.contains(RAW_PREFIX));
        assert_eq!(message.lines().count(), 5);
    }

    #[tokio::test]
    async fn empty_folder_is_quiet() {
        let lister = StubLister::with_names(Vec::new());
        let sink = RecordingSink::default();
        let count = run_check(&test_config(), &lister, &sink).await.unwrap();
        assert_eq!(count, 0);
        assert!(sink.messages().is_empty());
    }

    #[tokio::test]
    async fn no_alert_below_the_threshold() {
        let lister = StubLister::with_names(raw_images(499));
        let sink = RecordingSink::default();
        let count = run_check(&test_config(), &lister, &sink).await.unwrap();
        assert_eq!(count, 499);
        assert!(sink.messages().is_empty());
    }

    #[tokio::test]
    async fn no_alert_at_exactly_the_threshold() {
        let lister = StubLister::with_names(raw_images(IMAGE_ALERT_THRESHOLD));
        let sink = RecordingSink::default();
        let count = run_check(&test_config(), &lister, &sink).await.unwrap();
        assert_eq!(count, IMAGE_ALERT_THRESHOLD);
        assert!(sink.messages().is_empty());
    }

    #[tokio::test]
    async fn alerts_once_above_the_threshold() {
        let lister = StubLister::with_names(raw_images(501));
        let sink = RecordingSink::default();
        let count = run_check(&test_config(), &lister, &sink).await.unwrap();
        assert_eq!(count, 501);

        let messages = sink.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("501"));
        assert!(messages[0].contains("https://label.example.com"));
    }

    #[tokio::test]
    async fn non_images_do_not_push_the_count_over() {
        let mut names = raw_images(500);
        names.push("raw/manifest.json".to_string());
        names.push("raw/notes.txt".to_string());
        let lister = StubLister::with_names(names);
        let sink = RecordingSink::default();
        let count = run_check(&test_config(), &lister, &sink).await.unwrap();
        assert_eq!(count, 500);
        assert!(sink.messages().is_empty());
    }

    #[tokio::test]
    async fn names_outside_the_prefix_are_never_listed() {
        let mut names = raw_images(2);
        names.push("processed/done.jpg".to_string());
        names.push("thumbnails/tiny.png".to_string());
        let lister = StubLister::with_names(names);
        let sink = RecordingSink::default();
        let count = run_check(&test_config(), &lister, &sink).await.unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn storage_failure_sends_nothing() {
        let lister = StubLister::failing();
        let sink = RecordingSink::default();
        let error = run_check(&test_config(), &lister, &sink).await.unwrap_err();
        assert_eq!(error.class(), "storage");
        assert!(sink.messages().is_empty());
    }

    #[tokio::test]
    async fn webhook_failure_surfaces() {
        let lister = StubLister::with_names(raw_images(501));
        let sink = RecordingSink::failing();
        let error = run_check(&test_config(), &lister, &sink).await.unwrap_err();
        assert_eq!(error.class(), "webhook");
    }
}
