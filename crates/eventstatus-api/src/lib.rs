//! Protocol types for eventstatusd IPC
//!
//! This crate defines the stable API between eventstatusd and clients:
//! - Commands (requests from clients)
//! - Responses
//! - Status values and views
//! - Versioning

mod commands;
mod types;

pub use commands::*;
pub use types::*;

/// Current API version
pub const API_VERSION: u32 = 1;
