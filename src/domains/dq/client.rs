//! reqwest implementation of [`DqApi`].
//!
//! Sign-in is lazy: the first request posts the configured credentials to
//! `/auth/signin` and the returned bearer token is reused for later calls.
//! A `401` triggers one fresh sign-in and one repeat of the request.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url, header};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::{ApiRequest, DqApi, DqError};
use crate::core::config::DqConfig;

/// Client for the Collibra DQ REST API.
pub struct DqClient {
    http: Client,
    base_url: Url,
    config: DqConfig,
    token: RwLock<Option<String>>,
}

#[derive(Debug, Deserialize)]
struct SignInResponse {
    #[serde(default)]
    token: Option<String>,
}

impl DqClient {
    /// Create a client for the configured service. No network I/O happens here.
    pub fn new(config: DqConfig) -> Result<Self, DqError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|_| DqError::InvalidUrl(config.base_url.clone()))?;
        if base_url.cannot_be_a_base() {
            return Err(DqError::InvalidUrl(config.base_url.clone()));
        }

        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self {
            http,
            base_url,
            config,
            token: RwLock::new(None),
        })
    }

    /// Build the absolute URL for the given path segments.
    fn url_for(&self, segments: &[String]) -> Result<Url, DqError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| DqError::InvalidUrl(self.config.base_url.clone()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn sign_in(&self) -> Result<String, DqError> {
        let url = self.url_for(&["auth".to_string(), "signin".to_string()])?;
        info!("Signing in to DQ service as {}", self.config.username);

        let response = self
            .http
            .post(url)
            .json(&json!({
                "username": self.config.username,
                "password": self.config.password,
                "iss": self.config.iss,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("DQ sign-in rejected with HTTP {}", status.as_u16());
            return Err(DqError::auth(status.as_u16(), &body));
        }

        let body: SignInResponse = response.json().await?;
        let token = body
            .token
            .filter(|t| !t.is_empty())
            .ok_or(DqError::MissingToken)?;

        *self.token.write().await = Some(token.clone());
        Ok(token)
    }

    async fn bearer(&self) -> Result<String, DqError> {
        let cached = self.token.read().await.clone();
        match cached {
            Some(token) => Ok(token),
            None => self.sign_in().await,
        }
    }

    async fn execute(&self, request: &ApiRequest, token: &str) -> Result<Response, DqError> {
        let url = self.url_for(&request.segments)?;
        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .bearer_auth(token)
            .header(header::ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        Ok(builder.send().await?)
    }

    #[cfg(test)]
    pub(crate) async fn set_token(&self, token: &str) {
        *self.token.write().await = Some(token.to_string());
    }
}

#[async_trait]
impl DqApi for DqClient {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path()))]
    async fn send(&self, request: ApiRequest) -> Result<Value, DqError> {
        let token = self.bearer().await?;
        let mut response = self.execute(&request, &token).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("DQ token rejected, signing in again");
            let token = self.sign_in().await?;
            response = self.execute(&request, &token).await?;
        }

        let status = response.status();
        let body = response.text().await?;
        debug!("DQ responded with HTTP {} ({} bytes)", status.as_u16(), body.len());

        if !status.is_success() {
            return Err(DqError::http(status.as_u16(), &body));
        }
        decode_body(&body)
    }

    fn connection(&self) -> &str {
        &self.config.connection
    }
}

fn decode_body(body: &str) -> Result<Value, DqError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| DqError::Decode(e.to_string()))
}
