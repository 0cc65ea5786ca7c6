//! HTTP generation invoker.

use crate::InvokerConfig;
use async_trait::async_trait;
use scenecraft_core::{GenerationOutput, GenerationRequest, GenerationResponse};
use scenecraft_error::{HttpError, ScenecraftResult};
use scenecraft_interface::GenerationInvoker;
use serde::Deserialize;
use tracing::{debug, instrument};

/// Longest slice of a non-JSON error body carried into a failure message.
const MAX_BODY_EXCERPT: usize = 200;

/// Wire format of the generation service's response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    seed: Option<u32>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Posts generation requests to `<endpoint>/generate/<kind>`.
///
/// Transport errors, timeouts and non-2xx statuses come back as failure
/// responses whose message includes the cause (and status code), so the
/// classification table can act on them.
#[derive(Debug, Clone)]
pub struct HttpInvoker {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpInvoker {
    /// Create an invoker with an explicit credential.
    ///
    /// # Errors
    ///
    /// Returns an HTTP error if the client cannot be built.
    pub fn new(config: &InvokerConfig, api_key: impl Into<String>) -> ScenecraftResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Create an invoker reading the credential from the environment.
    ///
    /// # Errors
    ///
    /// Returns a `MissingCredential` error when the configured variable is
    /// unset, or an HTTP error if the client cannot be built.
    pub fn from_env(config: &InvokerConfig) -> ScenecraftResult<Self> {
        let api_key = config.api_key()?;
        Self::new(config, api_key)
    }

    /// Endpoint URL for a request.
    pub fn url_for(&self, request: &GenerationRequest) -> String {
        format!("{}/generate/{}", self.endpoint, request.kind)
    }
}

#[async_trait]
impl GenerationInvoker for HttpInvoker {
    #[instrument(skip(self, request), fields(kind = %request.kind, model = %request.model_key))]
    async fn invoke(&self, request: &GenerationRequest) -> GenerationResponse {
        let url = self.url_for(request);
        debug!(url = %url, "Posting generation request");

        let response = match self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return GenerationResponse::failure(format!("Request timed out: {}", e));
            }
            Err(e) => {
                return GenerationResponse::failure(format!("Connection error: {}", e));
            }
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => parse_body(status, &body),
            Err(e) => GenerationResponse::failure(format!(
                "HTTP {}: failed to read response body: {}",
                status, e
            )),
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Map a status code and body to a response.
pub(crate) fn parse_body(status: u16, body: &str) -> GenerationResponse {
    let wire = serde_json::from_str::<WireResponse>(body);

    if !(200..300).contains(&status) {
        let detail = match wire {
            Ok(WireResponse {
                error_message: Some(message),
                ..
            }) => message,
            _ => excerpt(body),
        };
        return GenerationResponse::failure(format!("HTTP {}: {}", status, detail));
    }

    match wire {
        Ok(wire) if wire.success => GenerationResponse::Success(GenerationOutput {
            url: wire.url,
            text: wire.text,
            seed: wire.seed,
        }),
        Ok(wire) => GenerationResponse::failure(
            wire.error_message
                .unwrap_or_else(|| "Provider reported failure without a message".to_string()),
        ),
        Err(e) => GenerationResponse::failure(format!("Invalid response body: {}", e)),
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_BODY_EXCERPT) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
