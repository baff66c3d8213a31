//! Webhook notifications
//!
//! Posts Slack Block Kit payloads to a configured incoming-webhook URL.
//! The HTTP call is blocking; async callers go through [`send_blocking`]
//! on a blocking task.

use crate::error::{RestashError, RestashResult};
use serde_json::{json, Value};
use tracing::debug;

/// Build the failed-build notification payload
///
/// Header, a button linking to the pipeline logs, and a summary section.
pub fn failed_build_payload(repo: &str, logs_url: &str, summary: &str) -> Value {
    json!({
        "blocks": [
            {
                "type": "header",
                "text": {
                    "type": "plain_text",
                    "text": format!("The build on {} failed", repo),
                    "emoji": true
                }
            },
            {
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": "Check the logs here."
                },
                "accessory": {
                    "type": "button",
                    "text": {
                        "type": "plain_text",
                        "text": "Pipeline logs",
                        "emoji": true
                    },
                    "url": logs_url,
                    "action_id": "logs-link"
                }
            },
            {
                "type": "divider"
            },
            {
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": summary
                }
            }
        ]
    })
}

/// Post a payload to the webhook URL
///
/// Blocking; call from a blocking task in async contexts.
pub fn send_blocking(webhook_url: &str, payload: &Value) -> RestashResult<()> {
    if webhook_url.is_empty() {
        return Err(RestashError::WebhookMissing);
    }

    debug!("Posting webhook notification");

    ureq::post(webhook_url)
        .send_json(payload)
        .map_err(|e| RestashError::Webhook(e.to_string()))?;

    Ok(())
}
