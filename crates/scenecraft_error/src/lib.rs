//! Error types for the SceneCraft pipeline.
//!
//! This crate provides the foundation error types used throughout the SceneCraft workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use scenecraft_error::{ScenecraftResult, HttpError};
//!
//! fn fetch_frame() -> ScenecraftResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_frame() {
//!     Ok(url) => println!("Got: {}", url),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod http;
mod json;
mod pipeline;
mod storage;

pub use config::ConfigError;
pub use error::{ScenecraftError, ScenecraftErrorKind, ScenecraftResult};
pub use generation::{GenerationError, GenerationErrorKind, RetryableError};
pub use http::HttpError;
pub use json::JsonError;
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use storage::{StorageError, StorageErrorKind};
