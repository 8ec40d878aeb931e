//! Filter implementations
//!
//! - [`Filter`] - Trait implemented by stateful per-frame filters
//! - [`SizeFilter`] - Stateless class-specific geometric gate
//! - [`TrackFilter`] - Single-target lifecycle filter
//! - [`ConfigError`] - Errors raised while building configurations

pub mod errors;
pub mod size;
pub mod track;
pub mod traits;

pub use errors::ConfigError;
pub use size::{SizeFilter, SizeRejection};
pub use track::{TrackFilter, TrackState};
pub use traits::Filter;
