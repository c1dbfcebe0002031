use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::RemoteConfig;
use crate::error::{Result, TarjomanError};
use crate::language::Direction;
use super::RemoteTranslator;

/// Request body accepted by LibreTranslate's `/translate` endpoint
#[derive(Debug, Clone, Serialize)]
pub struct TranslateRequest<'a> {
    pub q: &'a str,
    pub source: &'a str,
    pub target: &'a str,
    pub format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// HTTP client for a LibreTranslate-compatible server
pub struct LibreTranslateClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl LibreTranslateClient {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| TarjomanError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
        })
    }

    pub fn url(&self) -> String {
        format!("{}/translate", self.endpoint)
    }
}

#[async_trait]
impl RemoteTranslator for LibreTranslateClient {
    async fn translate(&self, text: &str, direction: Direction) -> Result<String> {
        let request = TranslateRequest {
            q: text,
            source: direction.source().code(),
            target: direction.target().code(),
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let url = self.url();
        debug!("Sending translation request to {} ({} chars, {})", url, text.chars().count(), direction);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Translation server unreachable at {}: {}", url, e);
                TarjomanError::RemoteUnavailable(format!("{}: {}", url, e))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TarjomanError::RemoteUnavailable(format!("Failed to read response: {}", e)))?;

        let translation = interpret_response(status, &body)?;
        info!("Remote translation succeeded ({})", direction);
        Ok(translation)
    }
}

/// Turn a raw HTTP answer into the translated text or a rejection
pub fn interpret_response(status: StatusCode, body: &str) -> Result<String> {
    if !status.is_success() {
        let reason = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(parsed) => format!("API error {}: {}", status.as_u16(), parsed.error),
            Err(_) => {
                let preview: String = body.chars().take(100).collect();
                format!("{} {}", status.as_u16(), preview.trim())
            }
        };
        return Err(TarjomanError::RemoteRejected(reason));
    }

    let parsed: TranslateResponse = serde_json::from_str(body)
        .map_err(|e| TarjomanError::RemoteRejected(format!("Unexpected API response format: {}", e)))?;

    match parsed.translated_text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(TarjomanError::RemoteRejected(
            "Unexpected API response format: missing translatedText".to_string(),
        )),
    }
}
