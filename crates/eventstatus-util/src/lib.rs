//! Shared utilities for eventstatus
//!
//! This crate provides:
//! - ID types (GroupId, ClientId)
//! - Time utilities (mockable wall clock, injectable `Clock`)
//! - Error types
//! - Rate limiting helpers
//! - Default paths for the config file and socket

mod error;
mod ids;
mod paths;
mod rate_limit;
mod time;

pub use error::*;
pub use ids::*;
pub use paths::*;
pub use rate_limit::*;
pub use time::*;
