//! Scene pipeline and draft history for SceneCraft.
//!
//! This crate holds the stages between a topic and a finished storyboard:
//!
//! - [`plan_scenes`] / [`replan`] split a duration into clip-sized scenes
//! - [`resolve_character_slots`] maps selected characters onto reference
//!   image slots
//! - [`estimate_cost`] projects spend from a [`PriceTable`]
//! - [`ScriptRequest`] and [`parse_script`] drive the script model
//! - [`SceneGenerator`] issues frame, clip and music calls
//! - [`DraftSession`] owns the in-progress draft
//! - [`DraftHistory`] and [`Autosaver`] persist drafts through a
//!   [`DraftStore`](scenecraft_interface::DraftStore)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod abort;
mod autosave;
mod characters;
mod cost;
mod generator;
mod history;
mod planner;
mod script;
mod session;
mod store;

pub use abort::AbortSignal;
pub use autosave::Autosaver;
pub use characters::{
    CharacterSlots, InMemoryCharacterRegistry, MAX_GENERATED_SLOTS, MAX_UPLOADED_SLOTS,
    SlotAssignment, resolve_character_slots,
};
pub use cost::{
    CategoryCost, CostBreakdown, CostEstimate, IMAGES_PER_SCENE, PriceTable, estimate_cost,
};
pub use generator::{SceneGenerator, SceneOutcome, SceneStatus, SeedMode};
pub use history::{DraftHistory, identity_key, key_for, parse_draft_id, topic_key};
pub use planner::{plan_scenes, planned_seconds, replan, scene_count};
pub use script::{
    DialogueLines, ScriptRequest, ScriptScene, apply_dialogue, apply_script, dialogue_prompt,
    parse_dialogue, parse_script,
};
pub use session::{DraftSession, PromptField};
pub use store::{FileDraftStore, InMemoryDraftStore};
