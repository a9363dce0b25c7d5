use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::OpenAiConfig;
use crate::models::MenuImage;
use crate::services::menu_service::MenuModels;
use crate::utils::error::ApiError;

// ===== Vision (Responses API) =====

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: Vec<InputMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct InputMessage<'a> {
    role: &'a str,
    content: Vec<InputContent<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum InputContent<'a> {
    InputText { text: &'a str },
    InputImage { image_url: String, detail: &'a str },
}

#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl ResponsesResponse {
    /// Concatenation of every `output_text` part.
    fn text(self) -> String {
        if let Some(text) = self.output_text {
            return text;
        }

        self.output
            .into_iter()
            .flat_map(|item| item.content)
            .filter(|part| part.kind == "output_text")
            .filter_map(|part| part.text)
            .collect::<Vec<_>>()
            .join("")
    }
}

// ===== Image generation =====

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    quality: &'a str,
    n: u8,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// OpenAI client bound to one caller's key. Built per request and dropped
/// with it; only the underlying connection pool is shared.
pub struct OpenAiClient {
    http: Client,
    config: OpenAiConfig,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(http: Client, config: OpenAiConfig, api_key: String) -> Self {
        Self {
            http,
            config,
            api_key,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response, ApiError> {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("Failed to call OpenAI API: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            return Err(ApiError::Upstream(format!(
                "OpenAI API error ({}): {}",
                status, message
            )));
        }

        Ok(response)
    }
}

#[async_trait::async_trait]
impl MenuModels for OpenAiClient {
    async fn read_menu(&self, image: &MenuImage, prompt: &str) -> Result<String, ApiError> {
        let request = ResponsesRequest {
            model: &self.config.vision_model,
            input: vec![InputMessage {
                role: "user",
                content: vec![
                    InputContent::InputText { text: prompt },
                    InputContent::InputImage {
                        image_url: image.to_data_url(),
                        detail: "auto",
                    },
                ],
            }],
        };

        let response: ResponsesResponse = self
            .post("responses", &request)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Upstream(format!("Failed to parse vision response: {}", e)))?;

        let text = response.text();
        debug!("Vision model returned {} chars", text.len());
        Ok(text)
    }

    async fn render_dish(&self, prompt: &str) -> Result<Option<String>, ApiError> {
        let request = ImageRequest {
            model: &self.config.image_model,
            prompt,
            size: &self.config.image_size,
            quality: &self.config.image_quality,
            n: 1,
        };

        let response: ImageResponse = self
            .post("images/generations", &request)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Upstream(format!("Failed to parse image response: {}", e)))?;

        Ok(response
            .data
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .filter(|url| !url.is_empty()))
    }
}
