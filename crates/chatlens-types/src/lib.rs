//! Shared domain types for Chatlens.
//!
//! This crate contains the core domain types used across the Chatlens relay:
//! chat messages and their display metadata, the analysis snapshot, runtime
//! configuration, and the error types shared by every layer.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod analysis;
pub mod config;
pub mod error;
pub mod message;
