//! Router configuration.

use std::time::Duration;

/// Configuration parameters for route queries and suggestions.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Maximum number of fuzzy suggestions to return.
    pub max_suggestions: usize,

    /// Minimum normalized similarity for a fuzzy suggestion candidate.
    /// Candidates below this are only kept on a substring match.
    pub similarity_cutoff: f64,

    /// How often the background task refreshes network snapshots.
    pub refresh_interval: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_suggestions: 10,
            similarity_cutoff: 0.6,
            refresh_interval: Duration::from_secs(3 * 60 * 60), // 3 hours
        }
    }
}
