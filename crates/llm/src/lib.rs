//! Client for the OpenRouter chat-completions API.
//!
//! Provides:
//! - [`client::OpenRouterClient`] -- turns a prompt into SVG markup with one
//!   chat-completions call.
//! - [`client::SvgGenerator`] -- the trait handlers depend on, so tests can
//!   substitute a fake generator.
//! - [`catalog::ModelCatalog`] -- the selectable model list with a
//!   five-minute in-memory cache.

pub mod catalog;
pub mod client;
pub mod error;

pub use catalog::ModelCatalog;
pub use client::{GenerationParams, OpenRouterClient, Reasoning, SvgGenerator};
pub use error::GenerationError;
