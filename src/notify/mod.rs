//! Notification delivery.
//!
//! The notifier is a collaborator of the selection engine: it receives the
//! chosen contact address after the selection is committed, and its failures
//! never roll back the recorded selection. Delivery retries live entirely
//! here, with bounded exponential backoff; the selection itself is never
//! retried.

use std::time::Duration;

use serde_json::json;
use tracing::{error, info, warn};

use crate::config::NotifierConfig;

/// Delivers the daily selection to its recipient.
pub trait Notifier {
    /// Attempts delivery to `mail`. Returns true on success.
    ///
    /// Implementations own their retry policy; callers invoke this at most
    /// once per new selection.
    fn notify(&self, mail: &str) -> bool;
}

/// Webhook-based notifier.
///
/// Posts `{"uid": "<mail>"}` as JSON to the configured endpoint. Server
/// errors (5xx) and timeouts are retried with exponential backoff (the
/// delay doubles per attempt, starting at `initial_retry_delay_secs`, up to
/// `max_retries` attempts). Any other non-success status is treated as a
/// permanent failure and not retried.
pub struct WebhookNotifier {
    url: String,
    timeout: Duration,
    max_retries: u32,
    initial_retry_delay: Duration,
}

impl WebhookNotifier {
    /// Builds a notifier from configuration.
    pub fn from_config(config: &NotifierConfig) -> Self {
        Self {
            url: config.webhook_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            max_retries: config.max_retries.max(1),
            initial_retry_delay: Duration::from_secs(config.initial_retry_delay_secs),
        }
    }

    fn attempt(&self, client: &reqwest::blocking::Client, mail: &str) -> Attempt {
        let payload = json!({ "uid": mail });
        match client.post(&self.url).json(&payload).send() {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    Attempt::Delivered
                } else if status.is_server_error() {
                    Attempt::Retryable(format!("server error {status}"))
                } else {
                    let body = response.text().unwrap_or_default();
                    Attempt::Permanent(format!("webhook returned {status} ({body})"))
                }
            }
            Err(e) if e.is_timeout() => Attempt::Retryable("timeout".to_string()),
            Err(e) => Attempt::Permanent(e.to_string()),
        }
    }
}

enum Attempt {
    Delivered,
    Retryable(String),
    Permanent(String),
}

impl Notifier for WebhookNotifier {
    fn notify(&self, mail: &str) -> bool {
        let client = match reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                error!(error = %e, "failed to build notification client");
                return false;
            }
        };

        for attempt in 0..self.max_retries {
            match self.attempt(&client, mail) {
                Attempt::Delivered => {
                    info!(mail, "notification sent successfully");
                    return true;
                }
                Attempt::Retryable(reason) => {
                    let retry_num = attempt + 1;
                    if retry_num < self.max_retries {
                        let delay = self.initial_retry_delay * 2u32.pow(attempt);
                        warn!(
                            reason,
                            retry = retry_num,
                            max = self.max_retries,
                            delay_secs = delay.as_secs(),
                            "notification attempt failed, retrying"
                        );
                        std::thread::sleep(delay);
                    } else {
                        error!(
                            reason,
                            attempts = self.max_retries,
                            "notification failed after all attempts"
                        );
                        return false;
                    }
                }
                Attempt::Permanent(reason) => {
                    error!(reason, "notification failed permanently");
                    return false;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_enforces_at_least_one_attempt() {
        let notifier = WebhookNotifier::from_config(&NotifierConfig {
            webhook_url: "https://hooks.example.com/duty".to_string(),
            timeout_secs: 1,
            max_retries: 0,
            initial_retry_delay_secs: 1,
        });
        assert_eq!(notifier.max_retries, 1);
    }

    #[test]
    fn test_unresolvable_host_is_permanent_failure() {
        // Connection errors that are not timeouts must fail without
        // retrying (and thus without sleeping through backoff).
        let notifier = WebhookNotifier {
            url: "http://127.0.0.1:1/hook".to_string(),
            timeout: Duration::from_millis(100),
            max_retries: 3,
            initial_retry_delay: Duration::from_secs(60),
        };
        let start = std::time::Instant::now();
        assert!(!notifier.notify("a@example.com"));
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
