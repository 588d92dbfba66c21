//! User profile model.

use serde::{Deserialize, Serialize};

/// The authenticated user's profile as served by `GET /api/user/me`.
///
/// The host-provided fields (login, name, avatar, bio) are read-only; the
/// contact fields (`email`, `linked_in`, `professional_summary`) are locally
/// editable and only persisted on an explicit save.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Login handle on the repository host.
    pub login: String,

    /// Display name, if the user set one.
    pub name: Option<String>,

    /// Avatar image URL.
    pub avatar_url: String,

    /// Free-text biography from the host profile.
    pub bio: Option<String>,

    /// Contact email shown on the generated resume.
    #[serde(default)]
    pub email: String,

    /// LinkedIn handle or URL.
    #[serde(default)]
    pub linked_in: String,

    /// Free-text professional summary.
    #[serde(default)]
    pub professional_summary: String,

    /// Whether the account has access to premium-gated AI features.
    #[serde(default)]
    pub is_premium: bool,
}

impl Profile {
    /// The name to display, falling back to the login handle.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_profile() {
        // Backend omits editable fields until the user has saved once.
        let json = r#"{
            "login": "octocat",
            "name": null,
            "avatarUrl": "https://example.com/a.png",
            "bio": "I build things"
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.login, "octocat");
        assert_eq!(profile.display_name(), "octocat");
        assert_eq!(profile.email, "");
        assert!(!profile.is_premium);
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let profile = Profile {
            login: "octocat".to_string(),
            name: Some("The Octocat".to_string()),
            avatar_url: "https://example.com/a.png".to_string(),
            bio: None,
            email: "octo@example.com".to_string(),
            linked_in: "in/octocat".to_string(),
            professional_summary: String::new(),
            is_premium: true,
        };
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"avatarUrl\""));
        assert!(json.contains("\"linkedIn\""));
        assert!(json.contains("\"professionalSummary\""));
        assert!(json.contains("\"isPremium\":true"));
    }
}
