//! Repository models: the read-only source record and its dashboard overlay.

use crate::models::snapshot::SavedRepository;
use serde::{Deserialize, Serialize};

/// A repository as served by `GET /api/user/repos`.
///
/// Sourced from the external host and immutable from the client's
/// perspective; customization lives in [`DashboardRepo`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    /// Stable identifier on the repository host.
    pub id: String,

    /// Repository name.
    pub name: String,

    /// Repository description, if set.
    pub description: Option<String>,

    /// Primary language, if the host detected one.
    pub language: Option<String>,

    /// Star count at fetch time.
    #[serde(default)]
    pub star_count: i64,

    /// Canonical URL on the host.
    pub url: String,
}

/// A repository with the client-local overlay layered on top.
///
/// `selected` is transient and derived at load time from whether a matching
/// entry exists in the saved resume snapshot; it is never persisted verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRepo {
    #[serde(flatten)]
    pub repository: Repository,

    /// Whether this repository is part of the curated selection.
    pub selected: bool,

    /// Custom resume title; defaults to the repository name.
    pub custom_title: String,

    /// Custom resume description; when empty, rendering falls back to the
    /// source description.
    #[serde(default)]
    pub custom_description: String,

    /// Ordered custom bullet points; defaults to empty.
    pub custom_bullet_points: Vec<String>,
}

impl DashboardRepo {
    /// Overlay with defaults for a repository with no saved entry.
    pub fn from_fetched(repository: Repository) -> Self {
        let custom_title = repository.name.clone();
        Self {
            repository,
            selected: false,
            custom_title,
            custom_description: String::new(),
            custom_bullet_points: Vec::new(),
        }
    }

    /// Overlay adopting the custom fields of a previously saved entry.
    pub fn from_saved(repository: Repository, saved: &SavedRepository) -> Self {
        Self {
            repository,
            selected: true,
            custom_title: saved.custom_title.clone(),
            custom_description: saved.custom_description.clone(),
            custom_bullet_points: saved.custom_bullet_points.clone(),
        }
    }

    /// Stable identifier, delegated to the source record.
    pub fn id(&self) -> &str {
        &self.repository.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(id: &str, name: &str) -> Repository {
        Repository {
            id: id.to_string(),
            name: name.to_string(),
            description: Some("a repo".to_string()),
            language: Some("Rust".to_string()),
            star_count: 7,
            url: format!("https://github.com/octocat/{}", name),
        }
    }

    #[test]
    fn test_from_fetched_defaults() {
        let entry = DashboardRepo::from_fetched(repo("r1", "foo"));
        assert!(!entry.selected);
        assert_eq!(entry.custom_title, "foo");
        assert!(entry.custom_description.is_empty());
        assert!(entry.custom_bullet_points.is_empty());
    }

    #[test]
    fn test_from_saved_adopts_custom_description() {
        let saved = SavedRepository {
            id: "r1".to_string(),
            name: "foo".to_string(),
            description: Some("a repo".to_string()),
            language: Some("Rust".to_string()),
            star_count: 7,
            url: "https://github.com/octocat/foo".to_string(),
            custom_title: "My Foo".to_string(),
            custom_description: "Rewritten for the resume".to_string(),
            custom_bullet_points: vec![],
            added_at: "2026-08-01T00:00:00Z".to_string(),
        };
        let entry = DashboardRepo::from_saved(repo("r1", "foo"), &saved);
        assert!(entry.selected);
        assert_eq!(entry.custom_description, "Rewritten for the resume");
    }

    #[test]
    fn test_overlay_flattens_on_the_wire() {
        let entry = DashboardRepo::from_fetched(repo("r1", "foo"));
        let json = serde_json::to_value(&entry).unwrap();
        // Source fields and overlay fields share one flat object.
        assert_eq!(json["id"], "r1");
        assert_eq!(json["starCount"], 7);
        assert_eq!(json["customTitle"], "foo");
        assert_eq!(json["selected"], false);
    }
}
