//! Custom middleware implementations for the receiver.
//!
//! Currently just webhook signature enforcement; endpoints opt in by
//! wrapping their scope or resource with [`EnsureWebhookSignature`].

pub mod webhook;

pub use webhook::*;
