//! Draft history.
//!
//! Entries are keyed `draft:<uuid>` once a draft has a stable identity and
//! `topic:<normalized topic>` before that. Identity always wins: an
//! identified draft is only ever written under its identity, and an
//! unidentified draft only merges with other unidentified entries of the
//! same normalized topic.

use scenecraft_core::{TopicDraft, normalize_topic};
use scenecraft_error::{
    PipelineError, PipelineErrorKind, ScenecraftResult, StorageError, StorageErrorKind,
};
use scenecraft_interface::DraftStore;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

const DRAFT_PREFIX: &str = "draft:";
const TOPIC_PREFIX: &str = "topic:";

/// Store key for an identified draft.
pub fn identity_key(id: Uuid) -> String {
    format!("{}{}", DRAFT_PREFIX, id)
}

/// Store key for an unidentified draft's topic text.
pub fn topic_key(topic: &str) -> String {
    format!("{}{}", TOPIC_PREFIX, normalize_topic(topic))
}

/// Store key for a draft.
pub fn key_for(draft: &TopicDraft) -> String {
    match draft.id {
        Some(id) => identity_key(id),
        None => topic_key(&draft.topic),
    }
}

/// Parse a draft identity typed by a user.
///
/// # Errors
///
/// Fails with `InvalidDraftId` when `id` is not a UUID.
pub fn parse_draft_id(id: &str) -> ScenecraftResult<Uuid> {
    Uuid::parse_str(id.trim()).map_err(|e| {
        StorageError::new(StorageErrorKind::InvalidDraftId {
            id: id.to_string(),
            message: e.to_string(),
        })
        .into()
    })
}

/// Autosave, explicit save and archive management over a [`DraftStore`].
#[derive(Clone)]
pub struct DraftHistory {
    store: Arc<dyn DraftStore>,
    archive_cap: usize,
}

impl std::fmt::Debug for DraftHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftHistory")
            .field("archive_cap", &self.archive_cap)
            .finish_non_exhaustive()
    }
}

impl DraftHistory {
    /// History over `store`, keeping at most `archive_cap` drafts.
    pub fn new(store: Arc<dyn DraftStore>, archive_cap: usize) -> Self {
        Self {
            store,
            archive_cap: archive_cap.max(1),
        }
    }

    /// Maximum number of drafts kept.
    pub fn archive_cap(&self) -> usize {
        self.archive_cap
    }

    /// Save the latest state of a draft without assigning an identity.
    ///
    /// Drafts with blank topics are skipped. An unidentified draft replaces
    /// the entry with the same normalized topic, keeping that entry's
    /// creation time and favorite flag. Returns the key written.
    #[instrument(skip(self, draft), fields(id = ?draft.id))]
    pub async fn autosave(&self, draft: &TopicDraft) -> ScenecraftResult<Option<String>> {
        if !draft.has_topic() {
            debug!("Skipping autosave of draft without topic");
            return Ok(None);
        }

        let key = key_for(draft);
        let mut stored = draft.clone();
        if draft.id.is_none()
            && let Some(existing) = self.store.get(&key).await?
        {
            debug!(key = %key, "Merging into existing topic entry");
            stored.created_at = existing.created_at;
            stored.favorite = existing.favorite;
        }

        self.store.set(&key, &stored).await?;
        self.enforce_cap(&key).await?;
        debug!(key = %key, "Autosaved draft");
        Ok(Some(key))
    }

    /// Save a draft under its stable identity, assigning one if needed.
    ///
    /// When an identity is assigned, the draft's `topic:` entry is folded in
    /// and removed so no duplicate remains.
    ///
    /// # Errors
    ///
    /// Fails with `EmptyTopic` for a blank topic, or when the store fails.
    #[instrument(skip(self, draft), fields(id = ?draft.id))]
    pub async fn save_explicit(&self, draft: &mut TopicDraft) -> ScenecraftResult<Uuid> {
        if !draft.has_topic() {
            return Err(PipelineError::new(PipelineErrorKind::EmptyTopic).into());
        }

        let id = match draft.id {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4();
                let old_key = topic_key(&draft.topic);
                if let Some(existing) = self.store.get(&old_key).await? {
                    draft.created_at = existing.created_at;
                    draft.favorite |= existing.favorite;
                }
                self.store.delete(&old_key).await?;
                draft.id = Some(id);
                info!(%id, "Assigned stable identity");
                id
            }
        };

        draft.touch();
        let key = identity_key(id);
        self.store.set(&key, draft).await?;
        self.enforce_cap(&key).await?;
        info!(%id, "Saved draft");
        Ok(id)
    }

    /// Load a draft by identity.
    pub async fn load_by_id(&self, id: Uuid) -> ScenecraftResult<Option<TopicDraft>> {
        self.store.get(&identity_key(id)).await
    }

    /// Load a draft by topic text.
    ///
    /// An unidentified entry with the same normalized topic wins; otherwise
    /// the most recently updated identified draft with that topic.
    pub async fn load_by_topic(&self, topic: &str) -> ScenecraftResult<Option<TopicDraft>> {
        if let Some(draft) = self.store.get(&topic_key(topic)).await? {
            return Ok(Some(draft));
        }
        let wanted = normalize_topic(topic);
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|d| d.normalized_topic() == wanted))
    }

    /// Load by identity when `query` parses as a UUID, by topic otherwise.
    #[instrument(skip(self))]
    pub async fn load(&self, query: &str) -> ScenecraftResult<Option<TopicDraft>> {
        match Uuid::parse_str(query.trim()) {
            Ok(id) => self.load_by_id(id).await,
            Err(_) => self.load_by_topic(query).await,
        }
    }

    /// All drafts, most recently updated first.
    pub async fn list(&self) -> ScenecraftResult<Vec<TopicDraft>> {
        let mut drafts: Vec<TopicDraft> = self
            .store
            .list()
            .await?
            .into_iter()
            .map(|(_, draft)| draft)
            .collect();
        drafts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(drafts)
    }

    /// Delete an identified draft. Returns whether it existed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> ScenecraftResult<bool> {
        let deleted = self.store.delete(&identity_key(id)).await?;
        info!(%id, deleted, "Deleted draft");
        Ok(deleted)
    }

    /// Flip the favorite flag of an identified draft. Returns the new value.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` when no draft has this identity.
    #[instrument(skip(self))]
    pub async fn toggle_favorite(&self, id: Uuid) -> ScenecraftResult<bool> {
        let key = identity_key(id);
        let mut draft = self
            .store
            .get(&key)
            .await?
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(key.clone())))?;
        draft.favorite = !draft.favorite;
        self.store.set(&key, &draft).await?;
        debug!(%id, favorite = draft.favorite, "Toggled favorite");
        Ok(draft.favorite)
    }

    /// Evict the oldest drafts beyond the cap, non-favorites first. The
    /// entry just written is never evicted.
    async fn enforce_cap(&self, keep: &str) -> ScenecraftResult<()> {
        let mut entries = self.store.list().await?;
        if entries.len() <= self.archive_cap {
            return Ok(());
        }

        entries.retain(|(key, _)| key != keep);
        entries.sort_by(|(_, a), (_, b)| {
            a.favorite
                .cmp(&b.favorite)
                .then_with(|| a.updated_at.cmp(&b.updated_at))
        });

        let excess = entries.len() + 1 - self.archive_cap;
        for (key, _) in entries.into_iter().take(excess) {
            self.store.delete(&key).await?;
            info!(key = %key, "Evicted archived draft");
        }
        Ok(())
    }
}
