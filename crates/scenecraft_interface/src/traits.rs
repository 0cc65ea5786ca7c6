//! Trait definitions for external collaborators.

use async_trait::async_trait;
use scenecraft_core::{Character, GenerationRequest, GenerationResponse, TopicDraft};
use scenecraft_error::ScenecraftResult;

/// Issues one generation call to a provider.
///
/// Implementations never return an error: transport problems, timeouts and
/// provider rejections all come back as [`GenerationResponse::Failure`] with
/// a message the executor can classify.
#[async_trait]
pub trait GenerationInvoker: Send + Sync {
    /// Invoke the provider once.
    async fn invoke(&self, request: &GenerationRequest) -> GenerationResponse;

    /// Short name for logs (e.g. "http", "scripted").
    fn name(&self) -> &str {
        "invoker"
    }
}

/// Key-value persistence for drafts.
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Load the draft stored under `key`.
    async fn get(&self, key: &str) -> ScenecraftResult<Option<TopicDraft>>;

    /// Store `draft` under `key`, replacing any previous value.
    async fn set(&self, key: &str, draft: &TopicDraft) -> ScenecraftResult<()>;

    /// All stored entries as `(key, draft)` pairs, in no particular order.
    async fn list(&self) -> ScenecraftResult<Vec<(String, TopicDraft)>>;

    /// Remove `key`. Returns whether an entry existed.
    async fn delete(&self, key: &str) -> ScenecraftResult<bool>;
}

/// Read-only access to reusable characters.
#[async_trait]
pub trait CharacterRegistry: Send + Sync {
    /// All characters.
    async fn list(&self) -> ScenecraftResult<Vec<Character>>;

    /// One character by id.
    async fn get(&self, id: &str) -> ScenecraftResult<Option<Character>>;
}
