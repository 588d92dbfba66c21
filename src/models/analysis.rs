//! Result shape of the AI portfolio-vs-job-description comparison.

use serde::{Deserialize, Serialize};

/// Structured analysis returned by `POST /api/ai/compare-portfolio`.
///
/// Held transiently in the dashboard; never part of the persisted snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAnalysis {
    /// Overall fit score in percent (0-100).
    #[serde(default)]
    pub match_score: f64,

    /// Aspects of the portfolio that match the job description.
    #[serde(default)]
    pub strengths: Vec<String>,

    /// Requirements the portfolio does not cover.
    #[serde(default)]
    pub gaps: Vec<String>,

    /// Suggested improvements.
    #[serde(default)]
    pub recommendations: Vec<String>,

    /// Short prose summary of the comparison.
    #[serde(default)]
    pub summary: String,
}
