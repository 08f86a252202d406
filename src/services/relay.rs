// src/services/relay.rs
use std::time::Duration;

use reqwest::{
    Client, Url,
    header::{CONTENT_LENGTH, CONTENT_TYPE},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub timeout: Duration,
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("failed to encode webhook payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Body posted to the agent webhook. `agent` disappears from the wire
/// entirely when the caller did not name one.
#[derive(Serialize)]
struct WebhookPayload<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    agent: Option<&'a str>,
}

/// What the webhook sent back, resolved by an explicit try-parse step.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamReply {
    Json(Value),
    Text(String),
}

impl UpstreamReply {
    pub fn from_body(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }

    /// Parseable JSON passes through verbatim; anything else is wrapped so
    /// the caller always receives JSON.
    pub fn into_envelope(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Text(text) => json!({ "output": text }),
        }
    }
}

/// Outbound HTTP client pair, built once at startup and shared through
/// application state. The insecure variant exists only when the config
/// opted in, and is picked only for https targets (internal endpoints with
/// self-signed certificates).
pub struct RelayClient {
    verified: Client,
    insecure: Option<Client>,
}

impl RelayClient {
    pub fn new(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        let verified = Client::builder().timeout(config.timeout).build()?;

        let insecure = if config.accept_invalid_certs {
            Some(
                Client::builder()
                    .timeout(config.timeout)
                    .danger_accept_invalid_certs(true)
                    .build()?,
            )
        } else {
            None
        };

        Ok(Self { verified, insecure })
    }

    fn client_for(&self, url: &Url) -> &Client {
        if url.scheme() == "https" {
            if let Some(insecure) = &self.insecure {
                return insecure;
            }
        }
        &self.verified
    }

    /// Forward one chat message to the webhook and normalize its reply.
    /// One outbound POST per call, no retries. The upstream status code is
    /// not inspected; whatever body came back is relayed.
    pub async fn forward(
        &self,
        url: &Url,
        message: &str,
        agent: Option<&str>,
    ) -> Result<UpstreamReply, RelayError> {
        let body = serde_json::to_vec(&WebhookPayload { message, agent })?;

        // Message content stays out of the logs.
        tracing::debug!(
            host = url.host_str().unwrap_or("unknown"),
            "forwarding chat message"
        );

        let response = self
            .client_for(url)
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_LENGTH, body.len())
            .body(body)
            .send()
            .await?;

        let text = response.text().await?;
        Ok(UpstreamReply::from_body(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_reply_passes_through() {
        let reply = UpstreamReply::from_body(r#"{"output":"X"}"#.to_string());
        assert_eq!(reply.into_envelope(), json!({ "output": "X" }));
    }

    #[test]
    fn plain_text_is_wrapped() {
        let reply = UpstreamReply::from_body("hello".to_string());
        assert_eq!(reply, UpstreamReply::Text("hello".to_string()));
        assert_eq!(reply.into_envelope(), json!({ "output": "hello" }));
    }

    #[test]
    fn non_object_json_still_passes_through() {
        let reply = UpstreamReply::from_body("[1,2,3]".to_string());
        assert_eq!(reply.into_envelope(), json!([1, 2, 3]));
    }
}
