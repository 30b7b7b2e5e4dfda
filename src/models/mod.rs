//! Data models for webhook verification.
//!
//! Verification inputs and outcomes, audit events, and the JSON bodies
//! returned by the receiver endpoints.

pub mod api;
pub mod audit;
pub mod verification;

pub use api::*;
pub use audit::*;
pub use verification::*;
