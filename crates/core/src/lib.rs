//! Domain logic shared by the persistence, generation and HTTP layers.
//!
//! Nothing in this crate performs I/O. It holds the error taxonomy,
//! parameter bounds and validation, prompt templating, code-fence
//! stripping for model output, and the pure parts of the model catalog
//! and gallery filtering.

pub mod artwork;
pub mod catalog;
pub mod error;
pub mod gallery;
pub mod prompt;
pub mod svg;
pub mod types;
