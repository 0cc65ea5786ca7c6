use chrono::{Duration, Utc};
use scenecraft_core::TopicDraft;
use scenecraft_error::{ScenecraftErrorKind, StorageErrorKind};
use scenecraft_interface::DraftStore;
use scenecraft_pipeline::{
    DraftHistory, InMemoryDraftStore, identity_key, parse_draft_id, topic_key,
};
use std::sync::Arc;

fn history(cap: usize) -> (Arc<InMemoryDraftStore>, DraftHistory) {
    let store = Arc::new(InMemoryDraftStore::new());
    (store.clone(), DraftHistory::new(store, cap))
}

#[tokio::test]
async fn unidentified_drafts_with_same_topic_merge() {
    let (store, history) = history(50);

    let first = TopicDraft::new("A");
    let mut second = TopicDraft::new("  a ");
    second.context.background = "later edit".to_string();

    history.autosave(&first).await.unwrap();
    history.autosave(&second).await.unwrap();

    let entries = store.list().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, topic_key("A"));
    assert_eq!(entries[0].1.context.background, "later edit");
}

#[tokio::test]
async fn merge_keeps_creation_time_and_favorite() {
    let (store, history) = history(50);
    let mut first = TopicDraft::new("Harbor");
    first.created_at = Utc::now() - Duration::days(3);
    first.favorite = true;
    store.set(&topic_key("Harbor"), &first).await.unwrap();

    history.autosave(&TopicDraft::new("harbor")).await.unwrap();

    let stored = store.get(&topic_key("Harbor")).await.unwrap().unwrap();
    assert_eq!(stored.created_at, first.created_at);
    assert!(stored.favorite);
}

#[tokio::test]
async fn renamed_identified_draft_updates_same_identity() {
    let (store, history) = history(50);
    let mut draft = TopicDraft::new("A");
    let id = history.save_explicit(&mut draft).await.unwrap();

    draft.topic = "B".to_string();
    draft.touch();
    let key = history.autosave(&draft).await.unwrap();

    assert_eq!(key, Some(identity_key(id)));
    let entries = store.list().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].1.topic, "B");
    assert_eq!(entries[0].1.id, Some(id));
}

#[tokio::test]
async fn identified_draft_never_merges_with_topic_entry() {
    let (store, history) = history(50);
    history.autosave(&TopicDraft::new("Harbor")).await.unwrap();

    let forked = TopicDraft::with_identity("Harbor");
    history.autosave(&forked).await.unwrap();

    assert_eq!(store.list().await.unwrap().len(), 2);
    assert!(store.get(&topic_key("Harbor")).await.unwrap().is_some());
}

#[tokio::test]
async fn explicit_save_absorbs_topic_entry() {
    let (store, history) = history(50);
    let mut autosaved = TopicDraft::new("Harbor");
    autosaved.favorite = true;
    history.autosave(&autosaved).await.unwrap();

    let mut draft = TopicDraft::new("Harbor");
    let id = history.save_explicit(&mut draft).await.unwrap();

    assert_eq!(draft.id, Some(id));
    assert!(draft.favorite);
    let entries = store.list().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, identity_key(id));
}

#[tokio::test]
async fn explicit_save_is_idempotent_by_identity() {
    let (store, history) = history(50);
    let mut draft = TopicDraft::new("Harbor");

    let first = history.save_explicit(&mut draft).await.unwrap();
    let second = history.save_explicit(&mut draft).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn blank_topics_are_not_saved() {
    let (store, history) = history(50);

    assert_eq!(history.autosave(&TopicDraft::new("  ")).await.unwrap(), None);
    assert!(
        history
            .save_explicit(&mut TopicDraft::new(""))
            .await
            .is_err()
    );
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn load_by_identity_or_topic() {
    let (_, history) = history(50);
    let mut saved = TopicDraft::new("Night market");
    let id = history.save_explicit(&mut saved).await.unwrap();
    history.autosave(&TopicDraft::new("Harbor")).await.unwrap();

    let by_id = history.load(&id.to_string()).await.unwrap().unwrap();
    assert_eq!(by_id.topic, "Night market");

    let by_topic = history.load("  NIGHT   market ").await.unwrap().unwrap();
    assert_eq!(by_topic.id, Some(id));

    let unidentified = history.load("harbor").await.unwrap().unwrap();
    assert_eq!(unidentified.id, None);

    assert!(history.load("nothing here").await.unwrap().is_none());
}

#[tokio::test]
async fn list_is_most_recent_first() {
    let (store, history) = history(50);
    for (topic, age) in [("old", 3), ("new", 1), ("middle", 2)] {
        let mut draft = TopicDraft::with_identity(topic);
        draft.updated_at = Utc::now() - Duration::hours(age);
        store
            .set(&identity_key(draft.id.unwrap()), &draft)
            .await
            .unwrap();
    }

    let topics: Vec<String> = history
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.topic)
        .collect();
    assert_eq!(topics, vec!["new", "middle", "old"]);
}

#[tokio::test]
async fn toggle_favorite_and_delete() {
    let (_, history) = history(50);
    let mut draft = TopicDraft::new("Harbor");
    let id = history.save_explicit(&mut draft).await.unwrap();

    assert!(history.toggle_favorite(id).await.unwrap());
    assert!(history.load_by_id(id).await.unwrap().unwrap().favorite);
    assert!(!history.toggle_favorite(id).await.unwrap());

    assert!(history.delete(id).await.unwrap());
    assert!(!history.delete(id).await.unwrap());
    assert!(history.toggle_favorite(id).await.is_err());
}

#[test]
fn draft_ids_parse_or_report_the_bad_text() {
    let id = uuid::Uuid::new_v4();
    assert_eq!(parse_draft_id(&format!(" {} ", id)).unwrap(), id);

    let err = parse_draft_id("harbor").unwrap_err();
    match err.kind() {
        ScenecraftErrorKind::Storage(storage) => assert!(matches!(
            &storage.kind,
            StorageErrorKind::InvalidDraftId { id, .. } if id == "harbor"
        )),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn cap_evicts_oldest_non_favorites_first() {
    let (store, history) = history(3);
    let mut keys = Vec::new();
    for (i, favorite) in [(0, true), (1, false), (2, false)] {
        let mut draft = TopicDraft::with_identity(format!("draft {}", i));
        draft.updated_at = Utc::now() - Duration::hours(10 - i);
        draft.favorite = favorite;
        let key = identity_key(draft.id.unwrap());
        store.set(&key, &draft).await.unwrap();
        keys.push(key);
    }

    let mut newest = TopicDraft::new("draft 3");
    let id = history.save_explicit(&mut newest).await.unwrap();

    let remaining: Vec<String> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|(key, _)| key)
        .collect();
    assert_eq!(remaining.len(), 3);
    assert!(remaining.contains(&keys[0]), "favorite survives despite age");
    assert!(!remaining.contains(&keys[1]), "oldest non-favorite is evicted");
    assert!(remaining.contains(&keys[2]));
    assert!(remaining.contains(&identity_key(id)));
}
