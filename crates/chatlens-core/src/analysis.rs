//! Analysis trigger and placeholder analysis.
//!
//! A message asks for analysis when its lowercased text contains any of the
//! configured keywords. The analysis itself is a fixed snapshot until a real
//! engagement engine exists.

use chatlens_types::analysis::AnalysisSnapshot;
use chatlens_types::config::AnalysisConfig;

/// Keyword-triggered social media analyzer.
#[derive(Debug, Clone)]
pub struct SocialMediaAnalyzer {
    keywords: Vec<String>,
}

impl SocialMediaAnalyzer {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(&config.keywords)
    }

    /// Whether `text` asks for analysis.
    pub fn is_requested(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }

    /// Run the analysis if `text` asks for it.
    pub fn analyze_if_requested(&self, text: &str) -> Option<AnalysisSnapshot> {
        self.is_requested(text).then(|| analyze_social_media(text))
    }
}

impl Default for SocialMediaAnalyzer {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

/// Engagement figures for the message's subject.
///
/// Placeholder: returns the same snapshot for every message.
pub fn analyze_social_media(_message: &str) -> AnalysisSnapshot {
    AnalysisSnapshot {
        engagement_rate: 4.5,
        likes: 1200,
        comments: 45,
        shares: 30,
        sentiment: "positive".to_string(),
    }
}
