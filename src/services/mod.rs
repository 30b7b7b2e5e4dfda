//! Business logic and service layer modules.
//!
//! Request authentication, outbound signing, and verification metrics.

pub mod authenticator;
pub mod metrics;
pub mod signer;

pub use authenticator::*;
pub use metrics::*;
pub use signer::*;
