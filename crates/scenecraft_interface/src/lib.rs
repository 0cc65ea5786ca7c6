//! Collaborator traits for the SceneCraft generation pipeline.
//!
//! The pipeline never talks to a provider, a database or a character
//! service directly. It consumes these traits, so tests can drive it with
//! scripted doubles and the CLI can plug in HTTP and file-backed versions.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{CharacterRegistry, DraftStore, GenerationInvoker};
