//! Configuration structures and loading utilities.
//!
//! Webhook secrets and tolerance, plus the receiver binary's own settings,
//! each with environment variable loading and default values.

pub mod server;
pub mod webhook;

pub use server::*;
pub use webhook::*;
