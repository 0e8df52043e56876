//! Chat-completion client abstractions.
//!
//! - `CompletionClient`: RPITIT trait implemented by concrete endpoint clients
//! - `BoxCompletionClient`: object-safe wrapper for runtime dispatch

pub mod box_client;
pub mod client;
