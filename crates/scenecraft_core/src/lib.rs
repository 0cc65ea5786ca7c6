//! Core data types for the SceneCraft generation pipeline.
//!
//! This crate provides the data model shared by every SceneCraft crate: style
//! selections, planned scenes, generated frames, characters, audio options,
//! the draft aggregate, and the generation request/response types exchanged
//! with the generation invoker.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod audio;
mod character;
mod draft;
mod frame;
mod preferences;
mod request;
mod scene;
mod style;

pub use audio::{AudioOptions, MusicOptions, NarrationOptions, SoundEffectOptions};
pub use character::{Character, CharacterRole, CharacterSelection, ImageSourceMode};
pub use draft::{DraftContext, TopicDraft, normalize_topic};
pub use frame::{FramePosition, GeneratedClip, GeneratedFrame};
pub use preferences::ModelPreferences;
pub use request::{GenerationKind, GenerationOutput, GenerationRequest, GenerationResponse};
pub use scene::Scene;
pub use style::{SceneSettings, StyleSelection};
