//! Event status evaluation for eventstatusd
//!
//! This crate is the heart of eventstatus, containing:
//! - The status rule (active -> pendent -> done) as a pure function of time
//! - The lookup contract the rule is fed from
//! - The check operation tying one lookup to one evaluation
//! - Lookup implementations: the configured catalog and a scripted test double

mod catalog_lookup;
mod checker;
mod lookup;
mod mock;
mod status;

pub use catalog_lookup::*;
pub use checker::*;
pub use lookup::*;
pub use mock::*;
pub use status::*;

pub use eventstatus_api::EventStatus;
