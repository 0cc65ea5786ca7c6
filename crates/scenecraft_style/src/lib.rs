//! Style taxonomy and prompt compositor for SceneCraft.
//!
//! The taxonomy is a set of static, versioned tables (one per [`Dimension`]).
//! The compositor functions turn a [`StyleSelection`] and a scene's
//! [`SceneSettings`] into text: a static block for still-image calls, a
//! dynamic block for motion calls, and a long-form style guide for the
//! script model. Nothing here performs I/O.
//!
//! [`StyleSelection`]: scenecraft_core::StyleSelection
//! [`SceneSettings`]: scenecraft_core::SceneSettings

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod compositor;
mod dimension;
mod tables;

pub use compositor::{
    compose_frame_prompt, compose_image_prompt, compose_motion_prompt, compose_style_guide,
    compose_video_prompt,
};
pub use dimension::{
    Dimension, DurationEntry, FormatEntry, StyleEntry, TAXONOMY_VERSION, catalog, duration_entry,
    format_entry, is_known, lookup, normalize_selection,
};
