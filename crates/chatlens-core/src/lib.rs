//! Message and prompt pipeline for Chatlens.
//!
//! Pure business logic with no HTTP or filesystem access:
//! - `template`: strict and tolerant placeholder substitution, data-to-text rendering
//! - `prompt`: prompt construction from a template, a context block and named fields
//! - `completion`: the `CompletionClient` trait and its type-erased wrapper
//! - `conversation`: the append-only conversation store
//! - `analysis`: keyword trigger and the fixed analysis snapshot
//! - `session`: the per-request orchestrator tying the above together

pub mod analysis;
pub mod completion;
pub mod conversation;
pub mod prompt;
pub mod session;
pub mod template;
