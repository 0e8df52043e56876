//! HTTP layer for Chatlens.
//!
//! Axum-based JSON API under `/api/` plus the front end's page shells.

pub mod error;
pub mod handlers;
pub mod router;
