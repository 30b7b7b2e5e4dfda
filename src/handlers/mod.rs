//! HTTP request handlers and the application factory.

pub mod app;
pub mod health;
pub mod metrics;
pub mod webhook;

pub use app::*;
pub use health::*;
pub use metrics::*;
pub use webhook::*;
