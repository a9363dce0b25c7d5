use anyhow::{anyhow, Context, Result};
use menugen_shared::constants::{FIELD_IMAGE, FIELD_OPENAI_KEY};
use menugen_shared::{ErrorBody, Identity, MenuResult};
use reqwest::multipart::{Form, Part};
use reqwest::{header, redirect, Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::precheck::PreparedUpload;

/// Thin client for the MenuGen gateway.
pub struct GatewayClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl GatewayClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorized(self.http.get(self.url(path)))
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn health(&self) -> Result<serde_json::Value> {
        let response = self.get("/health").send().await.context("Gateway unreachable")?;
        decode(response).await
    }

    pub async fn whoami(&self) -> Result<Identity> {
        let response = self.get("/api/auth/user").send().await.context("Gateway unreachable")?;
        decode(response).await
    }

    /// Absolute sign-in (`login = true`) or sign-out location.
    pub async fn auth_location(&self, login: bool) -> Result<String> {
        let path = if login { "/api/auth/login" } else { "/api/auth/logout" };
        let response = self.get(path).send().await.context("Gateway unreachable")?;

        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| anyhow!("Gateway did not redirect ({})", response.status()))?;

        if location.starts_with('/') {
            Ok(self.url(location))
        } else {
            Ok(location.to_string())
        }
    }

    pub async fn process_menu(&self, upload: PreparedUpload, openai_key: &str) -> Result<MenuResult> {
        debug!(
            "Uploading {} ({} bytes, {})",
            upload.file_name,
            upload.bytes.len(),
            upload.content_type
        );

        let image = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)?;
        let form = Form::new()
            .part(FIELD_IMAGE, image)
            .text(FIELD_OPENAI_KEY, openai_key.to_string());

        let response = self
            .authorized(self.http.post(self.url("/api/process-menu")))
            .multipart(form)
            .send()
            .await
            .context("Gateway unreachable")?;
        decode(response).await
    }
}

/// Body as `T` on success, the gateway's error message otherwise.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return response
            .json()
            .await
            .context("Unexpected response from gateway");
    }

    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(ErrorBody {
            error,
            details: Some(details),
        }) => Err(anyhow!("{} ({}): {}", error, status, details)),
        Ok(ErrorBody { error, details: None }) => Err(anyhow!("{} ({})", error, status)),
        Err(_) => Err(anyhow!("Gateway error ({}): {}", status, text)),
    }
}
