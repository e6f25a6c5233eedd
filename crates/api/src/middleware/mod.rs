//! Request gating.
//!
//! - [`editing::RequireEditing`] -- Rejects mutations unless editing is enabled.
//! - [`rate_limit::limit_mutations`] -- Per-client sliding-window limit on
//!   mutating requests.

pub mod editing;
pub mod rate_limit;
