//! Fallback transcription: a secondary, audio-upload path used only when
//! live recognition produces no finalized result in time. Explicitly a
//! completeness aid, not a reliability guarantee — its failures are logged
//! and swallowed, never surfaced to the caller.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::types::AudioChunk;

#[derive(Error, Debug)]
pub enum FallbackError {
    #[error("fallback request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("fallback service returned status {status}")]
    Status { status: u16 },
}

/// External transcription service taking base64 audio.
#[async_trait]
pub trait FallbackTranscriber: Send + Sync {
    /// Returns `Ok(None)` when the service produced no usable text.
    async fn transcribe(
        &self,
        chunks: &[AudioChunk],
        language: &str,
    ) -> Result<Option<String>, FallbackError>;
}

#[derive(Serialize)]
struct FallbackRequest<'a> {
    audio: String,
    language: &'a str,
}

#[derive(Deserialize)]
struct FallbackResponse {
    transcript: Option<String>,
}

/// HTTP implementation posting `{audio: <base64>, language}` and reading
/// back `{transcript?: string}`.
pub struct HttpFallbackTranscriber {
    client: reqwest::Client,
    url: String,
}

impl HttpFallbackTranscriber {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl FallbackTranscriber for HttpFallbackTranscriber {
    async fn transcribe(
        &self,
        chunks: &[AudioChunk],
        language: &str,
    ) -> Result<Option<String>, FallbackError> {
        let mut audio = Vec::with_capacity(chunks.iter().map(Vec::len).sum());
        for chunk in chunks {
            audio.extend_from_slice(chunk);
        }

        let body = FallbackRequest {
            audio: BASE64.encode(&audio),
            language,
        };

        let response = self.client.post(&self.url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FallbackError::Status {
                status: status.as_u16(),
            });
        }

        let parsed: FallbackResponse = response.json().await?;
        debug!(target: "capture", got_text = parsed.transcript.is_some(), "fallback service replied");
        Ok(parsed
            .transcript
            .filter(|text| !text.trim().is_empty()))
    }
}

#[async_trait]
impl FallbackTranscriber for Box<dyn FallbackTranscriber> {
    async fn transcribe(
        &self,
        chunks: &[AudioChunk],
        language: &str,
    ) -> Result<Option<String>, FallbackError> {
        (**self).transcribe(chunks, language).await
    }
}

/// Disabled fallback path; always reports no transcript.
pub struct NullFallback;

#[async_trait]
impl FallbackTranscriber for NullFallback {
    async fn transcribe(
        &self,
        _chunks: &[AudioChunk],
        _language: &str,
    ) -> Result<Option<String>, FallbackError> {
        Ok(None)
    }
}
