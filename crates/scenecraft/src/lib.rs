//! SceneCraft - topic to storyboard video generation
//!
//! SceneCraft turns a topic and a style selection into a planned, scripted
//! and generated set of scenes: still frames per scene, a motion clip
//! anchored on those frames, and optional background music. Drafts are
//! autosaved and can be resumed later.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use scenecraft::{
//!     AbortSignal, CharacterSlots, DraftSession, HttpInvoker, RetryExecutor, RetryPolicy,
//!     ScenecraftConfig, SceneGenerator, SeedMode,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ScenecraftConfig::load()?;
//!     let invoker = Arc::new(HttpInvoker::from_env(&config.invoker)?);
//!     let executor = RetryExecutor::new(invoker, RetryPolicy::from(&config.retry));
//!
//!     let mut session = DraftSession::init(&config);
//!     session.new_topic("The last lighthouse keeper")?;
//!
//!     let generator = SceneGenerator::new(
//!         executor,
//!         session.preferences().clone(),
//!         *session.clip_seconds(),
//!     );
//!     let slots = CharacterSlots::default();
//!     let script = generator.write_script(session.draft(), &slots).await?;
//!     session.apply_script(script);
//!
//!     let outcomes = generator
//!         .generate_all(session.draft(), &slots, SeedMode::Fresh, 2, &AbortSignal::new())
//!         .await;
//!     for outcome in outcomes {
//!         session.apply_outcome(outcome);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `scenecraft_error` - Error types
//! - `scenecraft_core` - Data model (styles, scenes, frames, drafts, requests)
//! - `scenecraft_interface` - Invoker, draft store and character registry traits
//! - `scenecraft_style` - Style taxonomy and prompt compositor
//! - `scenecraft_invoke` - Configuration, failure classification, retrying executor
//! - `scenecraft_pipeline` - Planner, characters, cost, script, generator, history
//!
//! This crate (`scenecraft`) re-exports everything for convenience.

pub use scenecraft_core::*;
pub use scenecraft_error::*;
pub use scenecraft_interface::*;
pub use scenecraft_invoke::*;
pub use scenecraft_pipeline::*;
pub use scenecraft_style::*;
