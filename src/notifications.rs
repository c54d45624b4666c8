//! Desktop notifications for new episodes.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::NotificationConfig;
use crate::constants::notifications::{LINUX_BIN, MACOS_BIN};

/// "Episode N of X airs at T" message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseNotification {
    anime_title: String,
    episode: i32,
    time: String,
}

impl ReleaseNotification {
    pub fn new(anime_title: impl Into<String>, episode: i32, time: impl Into<String>) -> Self {
        Self {
            anime_title: anime_title.into(),
            episode,
            time: time.into(),
        }
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!("{} - Episode {}", self.anime_title, self.episode)
    }

    #[must_use]
    pub fn subtitle(&self) -> String {
        format!("Releases at {}", self.time)
    }

    #[must_use]
    pub fn body(&self) -> String {
        format!(
            "New {} episode, EP - {} available at {}",
            self.anime_title, self.episode, self.time
        )
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Dispatches one notification. `false` means it was not delivered to
    /// the notification center; the cause is logged, never returned.
    async fn notify(&self, notification: &ReleaseNotification) -> bool;
}

/// Sends notifications through the platform's notification tool.
pub struct DesktopNotifier {
    enabled: bool,
    app_name: String,
}

impl DesktopNotifier {
    #[must_use]
    pub fn new(config: &NotificationConfig) -> Self {
        Self {
            enabled: config.enabled,
            app_name: config.app_name.clone(),
        }
    }

    async fn dispatch(&self, notification: &ReleaseNotification) -> Result<()> {
        let Some((program, args)) =
            platform_command(std::env::consts::OS, &self.app_name, notification)
        else {
            bail!(
                "Notifications are not supported on {}",
                std::env::consts::OS
            );
        };

        let output = Command::new(program)
            .args(&args)
            .output()
            .await
            .with_context(|| format!("Failed to run {program}"))?;

        if !output.status.success() {
            bail!(
                "{} exited with {}: {}",
                program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn notify(&self, notification: &ReleaseNotification) -> bool {
        if !self.enabled {
            debug!("Notifications disabled, skipping: {}", notification.title());
            return false;
        }

        match self.dispatch(notification).await {
            Ok(()) => {
                debug!("Sent notification: {}", notification.title());
                true
            }
            Err(e) => {
                warn!(error = %e, "Error sending notification");
                false
            }
        }
    }
}

fn applescript_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Program and arguments that show `notification` on `os`.
fn platform_command(
    os: &str,
    app_name: &str,
    notification: &ReleaseNotification,
) -> Option<(&'static str, Vec<String>)> {
    match os {
        "macos" => {
            let script = format!(
                "display notification {} with title {} subtitle {}",
                applescript_string(&notification.body()),
                applescript_string(&notification.title()),
                applescript_string(&notification.subtitle()),
            );
            Some((MACOS_BIN, vec!["-e".to_string(), script]))
        }
        "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => Some((
            LINUX_BIN,
            vec![
                format!("--app-name={app_name}"),
                notification.title(),
                format!("{}\n{}", notification.subtitle(), notification.body()),
            ],
        )),
        _ => None,
    }
}
