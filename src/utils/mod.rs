//! Utility functions and helper modules.
//!
//! HMAC signature primitives and request metadata helpers.

pub mod hmac;
pub mod http;

pub use http::*;
