//! Request handling for eventstatusd
//!
//! The binary owns sockets, signals and rate limiting; everything a request
//! can ask for is answered here so it can be tested without a running
//! service.

mod dispatch;

pub use dispatch::*;
