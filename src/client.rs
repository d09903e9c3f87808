//! HTTP client for the generation backend.
//!
//! Posts a [`GenerateRequest`] and decodes the SSE response body into
//! [`StreamFrame`]s that a [`StreamSession`](crate::session::StreamSession)
//! can consume directly.

use std::collections::VecDeque;
use std::pin::Pin;

use futures_util::stream::{self, Stream};
use futures_util::StreamExt;
use reqwest::Client;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::ClientError;
use crate::models::GenerateRequest;
use crate::sse::{FrameDecoder, FrameParseError, StreamFrame};

/// Frames decoded from one response body.
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<StreamFrame, ClientError>> + Send>>;

/// Client for the generation backend.
pub struct GenerationClient {
    /// Base URL for the backend API
    pub base_url: String,
    api_key: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    /// Reusable HTTP client
    client: Client,
}

impl GenerationClient {
    pub fn new(provider: &ProviderConfig) -> Self {
        Self {
            base_url: provider.base_url.trim_end_matches('/').to_string(),
            api_key: provider.api_key.clone(),
            model: provider.model.clone(),
            temperature: provider.temperature,
            client: Client::new(),
        }
    }

    /// Client for `base_url` with no model overrides.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(&ProviderConfig::new(base_url))
    }

    /// Start a generation and return its frame stream.
    ///
    /// Provider defaults fill in `model` and `temperature` when the request
    /// leaves them unset.
    pub async fn stream(&self, request: &GenerateRequest) -> Result<FrameStream, ClientError> {
        let url = format!("{}/api/generate", self.base_url);

        let mut body = request.clone();
        if body.model.is_none() {
            body.model = self.model.clone();
        }
        if body.temperature.is_none() {
            body.temperature = self.temperature;
        }

        debug!(url = %url, session_id = %body.session_id, "starting generation stream");

        let mut builder = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "text/event-stream")
            .json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::ServerError { status, message });
        }

        let bytes_stream = response.bytes_stream();

        let pending: VecDeque<Result<StreamFrame, FrameParseError>> = VecDeque::new();
        let frame_stream = stream::unfold(
            (bytes_stream, FrameDecoder::new(), pending, false),
            |(mut bytes_stream, mut decoder, mut pending, mut ended)| async move {
                loop {
                    if let Some(item) = pending.pop_front() {
                        let item = item.map_err(ClientError::Frame);
                        return Some((item, (bytes_stream, decoder, pending, ended)));
                    }
                    if ended {
                        return None;
                    }

                    match bytes_stream.next().await {
                        Some(Ok(chunk)) => pending.extend(decoder.push(&chunk)),
                        Some(Err(e)) => {
                            ended = true;
                            return Some((
                                Err(ClientError::Http(e)),
                                (bytes_stream, decoder, pending, ended),
                            ));
                        }
                        None => {
                            ended = true;
                            pending.extend(decoder.finish());
                        }
                    }
                }
            },
        );

        Ok(Box::pin(frame_stream))
    }

    /// Check if the backend is healthy and reachable.
    pub async fn health_check(&self) -> Result<bool, ClientError> {
        let url = format!("{}/api/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }
}
