//! Generation request and response types.

use serde::{Deserialize, Serialize};

/// Kind of generation call.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GenerationKind {
    /// Still image
    Image,
    /// Motion clip
    Video,
    /// Text (script, dialogue)
    Text,
    /// Music track
    Music,
}

/// A typed request to the generation invoker.
///
/// # Examples
///
/// ```
/// use scenecraft_core::{GenerationKind, GenerationRequest};
///
/// let request = GenerationRequest::new(GenerationKind::Image, "image-standard", "A lighthouse")
///     .with_reference_images(vec!["https://cdn/ref.png".to_string()])
///     .with_aspect_ratio("16:9".to_string());
///
/// assert!(request.has_reference_images());
/// assert_eq!(request.without_reference_images().reference_images, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_", strip_option)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Kind of generation
    pub kind: GenerationKind,
    /// Model key resolved by the invoker
    pub model_key: String,
    /// Prompt text
    pub prompt: String,
    /// Reference image URLs (character slots, frames for video)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_images: Option<Vec<String>>,
    /// Clip or track duration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    /// Aspect ratio, e.g. "16:9"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    /// Sampling seed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    /// Whether a clip should carry its own audio track
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_audio: Option<bool>,
}

impl GenerationRequest {
    /// Create a request with only the required fields.
    pub fn new(kind: GenerationKind, model_key: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            kind,
            model_key: model_key.into(),
            prompt: prompt.into(),
            reference_images: None,
            duration_seconds: None,
            aspect_ratio: None,
            seed: None,
            generate_audio: None,
        }
    }

    /// True when the request carries at least one reference image.
    pub fn has_reference_images(&self) -> bool {
        self.reference_images
            .as_ref()
            .is_some_and(|images| !images.is_empty())
    }

    /// Copy of this request with the reference-image field removed.
    pub fn without_reference_images(&self) -> Self {
        Self {
            reference_images: None,
            ..self.clone()
        }
    }
}

/// Successful generation output.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationOutput {
    /// Result URL for image, video and music calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Result text for text calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Seed the provider used, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

impl GenerationOutput {
    /// Output carrying a URL.
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Output carrying text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Attach the provider-reported seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Result of one generation invocation.
///
/// Failures are values, not errors: the message is an opaque provider string
/// that the executor classifies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GenerationResponse {
    /// The call produced output
    Success(GenerationOutput),
    /// The call failed
    Failure {
        /// Provider error message
        error_message: String,
    },
}

impl GenerationResponse {
    /// Failure with the given message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            error_message: message.into(),
        }
    }

    /// True for `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
