//! Persisted resume/portfolio snapshot models.
//!
//! The snapshot is the full projection the backend stores for a user: contact
//! fields, summary, skills, and the selected repositories with their custom
//! fields plus denormalized source data captured at save time. Every save is
//! a full replace; there is no incremental diff.

use serde::{Deserialize, Serialize};

/// Current snapshot schema version written on save.
pub const SNAPSHOT_VERSION: u32 = 1;

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

/// The persisted resume snapshot, as exchanged with `/api/user/resume`.
///
/// Every field defaults on deserialize so a partial or older record still
/// reconciles without implicit-absence branching.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSnapshot {
    /// Schema version; snapshots written before versioning read as 1.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Contact email.
    #[serde(default)]
    pub email: String,

    /// LinkedIn handle or URL.
    #[serde(default)]
    pub linked_in: String,

    /// Free-text professional summary.
    #[serde(default)]
    pub professional_summary: String,

    /// Skill labels, unique (case-sensitive) in insertion order.
    #[serde(default)]
    pub skills: Vec<String>,

    /// The curated repositories; only selected ones are ever stored.
    #[serde(default)]
    pub selected_repositories: Vec<SavedRepository>,
}

/// A selected repository as stored in the snapshot.
///
/// Carries the custom fields plus denormalized copies of the source fields at
/// save time, so the backend can render a resume without re-fetching the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRepository {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub star_count: i64,
    pub url: String,
    pub custom_title: String,
    #[serde(default)]
    pub custom_description: String,
    #[serde(default)]
    pub custom_bullet_points: Vec<String>,

    /// ISO 8601 timestamp of the save that produced this entry.
    pub added_at: String,
}
