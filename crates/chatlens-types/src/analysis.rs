//! Analysis payload returned alongside a chat reply.

use serde::{Deserialize, Serialize};

/// Social media engagement figures shown by the front end's visualization
/// panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSnapshot {
    /// Engagement as a percentage of reach.
    pub engagement_rate: f64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub sentiment: String,
}
