use super::ModelClient;
use crate::config::Config;
use crate::error::XSearchError;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub struct XaiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: Vec<InputMessage<'a>>,
    tools: Vec<XSearchTool<'a>>,
}

#[derive(Debug, Serialize)]
struct InputMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct XSearchTool<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    allowed_x_handles: Option<&'a [String]>,
}

#[derive(Debug, Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl XaiClient {
    pub fn new(api_key: String, config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("x-search/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

fn build_request<'a>(model: &'a str, prompt: &'a str, handles: &'a [String]) -> ResponsesRequest<'a> {
    ResponsesRequest {
        model,
        input: vec![InputMessage {
            role: "user",
            content: prompt,
        }],
        tools: vec![XSearchTool {
            kind: "x_search",
            allowed_x_handles: (!handles.is_empty()).then_some(handles),
        }],
    }
}

/// Join the text of every `output_text` part in the message items. Tool call
/// items carry no text and are skipped.
fn reply_text(reply: &ResponsesReply) -> Option<String> {
    let text: String = reply
        .output
        .iter()
        .filter(|item| item.kind == "message")
        .flat_map(|item| &item.content)
        .filter(|part| part.kind == "output_text")
        .filter_map(|part| part.text.as_deref())
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[async_trait]
impl ModelClient for XaiClient {
    async fn chat(&self, prompt: &str, handles: &[String]) -> Result<String> {
        let url = format!("{}/responses", self.base_url);
        let body = build_request(&self.model, prompt, handles);
        tracing::debug!(model = %self.model, handles = ?handles, "sending xAI request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            return Err(XSearchError::Api {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let reply: ResponsesReply = response.json().await?;
        tracing::debug!(items = reply.output.len(), "received xAI reply");
        reply_text(&reply).ok_or_else(|| anyhow::Error::from(XSearchError::EmptyReply))
    }
}
