//! fv-core: stable foundation for fieldview.
//!
//! Contains:
//! - ids (external mesh entity identifiers)
//! - numeric (Real, NaN-aware range helpers)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{FvError, FvResult};
pub use ids::*;
pub use numeric::*;
