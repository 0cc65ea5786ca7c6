//! Generation calls for SceneCraft.
//!
//! This crate loads [`ScenecraftConfig`], classifies provider failure
//! messages through a versioned [`ClassificationTable`], wraps any
//! [`GenerationInvoker`] in the bounded-retry [`RetryExecutor`], and ships
//! [`HttpInvoker`], the production invoker.
//!
//! [`GenerationInvoker`]: scenecraft_interface::GenerationInvoker

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod classify;
mod config;
mod executor;
mod http;

pub use classify::{CLASSIFICATION_VERSION, ClassificationTable, FailureClass};
pub use config::{
    HistoryConfig, InvokerConfig, ModelsConfig, PlannerConfig, PricingConfig, RetryConfig,
    ScenecraftConfig, VideoPrice,
};
pub use executor::{
    AttemptRecord, AttemptState, InvocationOutcome, RetryExecutor, RetryPolicy,
    RetryPolicyBuilder,
};
pub use http::HttpInvoker;
