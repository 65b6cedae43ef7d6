//! Shared types for the cardfuse workspace: the error taxonomy and the
//! run configuration threaded through matching and merging.

pub mod config;
pub mod error;

pub use config::{Grouping, MergeOptions, PhoneMatch};
pub use error::{CoreError, CoreResult};
