use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Value, json};

use super::{IntentError, IntentExtractor};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// OpenAI Responses API client
pub struct ResponsesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ResponsesClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, BoxError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl IntentExtractor for ResponsesClient {
    async fn extract(&self, text: &str) -> Result<String, IntentError> {
        let resp = self
            .http
            .post(self.responses_url())
            .bearer_auth(&self.api_key)
            .json(&json!({ "model": self.model, "input": text }))
            .send()
            .await
            .map_err(|e| IntentError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message: String = body.chars().take(300).collect();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    IntentError::Authentication(message)
                }
                _ => IntentError::Upstream {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| IntentError::Decode(e.to_string()))?;
        output_text(&body).ok_or(IntentError::EmptyReply)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Reply text of a Responses API body
///
/// Uses the `output_text` convenience field when the server sends it,
/// otherwise joins every `output_text` content part of the output items.
pub fn output_text(body: &Value) -> Option<String> {
    if let Some(text) = body.get("output_text").and_then(Value::as_str)
        && !text.trim().is_empty()
    {
        return Some(text.to_string());
    }

    let joined: String = body
        .get("output")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .filter(|part| part.get("type").and_then(Value::as_str) == Some("output_text"))
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    (!joined.trim().is_empty()).then_some(joined)
}
