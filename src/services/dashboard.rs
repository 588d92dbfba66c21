//! Dashboard data controller.
//!
//! Orchestrates the initial parallel fetches (profile, repository list, saved
//! resume snapshot), reconciles them into a single view model, and exposes
//! the synchronous in-memory mutations plus the save/AI operations the
//! dashboard UI drives. All state lives behind a shared handle; the backend
//! only sees explicit saves and AI requests.

use crate::error::ApiError;
use crate::models::{
    DashboardRepo, PortfolioAnalysis, Profile, Repository, ResumeSnapshot, SavedRepository,
    SNAPSHOT_VERSION,
};
use crate::services::api_client::{
    ApiClient, ComparePortfolioRequest, CoverLetterRequest, ExtractSkillsRequest,
    GenerateBulletsRequest,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Lifecycle of the dashboard view model.
///
/// An authentication-required rejection never produces `Failed`; the state
/// stays `Loading` while the boundary performs the login navigation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "camelCase")]
pub enum DashboardState {
    /// Initial fetches are outstanding (or a login redirect is underway).
    Loading,

    /// All required data arrived and was reconciled.
    Ready(DashboardData),

    /// A required fetch failed; carries the first error message.
    Failed(String),
}

/// The reconciled in-memory view model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    /// Profile with contact fields seeded from the saved snapshot.
    pub profile: Profile,

    /// Repositories in fetch order, each with its overlay.
    pub repositories: Vec<DashboardRepo>,

    /// Skill labels, unique (case-sensitive) in insertion order.
    pub skills: Vec<String>,

    /// Last generated cover letter, held transiently.
    pub cover_letter: Option<String>,

    /// Last portfolio analysis, held transiently.
    pub analysis: Option<PortfolioAnalysis>,
}

/// Per-operation in-flight flags for the embedding UI.
///
/// Each flag is independent and readable while its request is outstanding; a
/// hung request leaves only its own flag set and never blocks unrelated
/// operations.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InFlight {
    pub saving: bool,
    pub generating_bullets: bool,
    pub generating_cover_letter: bool,
    pub analyzing: bool,
    pub extracting_skills: bool,
}

#[derive(Debug)]
struct Inner {
    state: DashboardState,
    in_flight: InFlight,
}

/// The dashboard controller: one per signed-in session.
///
/// Cloning is cheap and every clone shares the same view model and in-flight
/// flags, so the embedding UI can hand one clone to an async operation and
/// keep reading state and flags through another. The lock is never held
/// across a network call; operations copy what they need, issue the request,
/// then re-lock to apply the result.
#[derive(Debug, Clone)]
pub struct Dashboard {
    client: ApiClient,
    inner: Arc<Mutex<Inner>>,
}

/// Merge a freshly fetched repository list with the saved snapshot.
///
/// Pure function: fetch order is preserved, saved entries are matched by id,
/// and saved entries whose repository no longer exists are silently dropped.
/// The result does not depend on the order of the snapshot's list.
pub fn reconcile(
    repositories: Vec<Repository>,
    snapshot: Option<&ResumeSnapshot>,
) -> Vec<DashboardRepo> {
    let saved_by_id: HashMap<&str, &SavedRepository> = snapshot
        .map(|s| {
            s.selected_repositories
                .iter()
                .map(|r| (r.id.as_str(), r))
                .collect()
        })
        .unwrap_or_default();

    repositories
        .into_iter()
        .map(|repo| {
            let saved = saved_by_id.get(repo.id.as_str()).copied();
            match saved {
                Some(entry) => DashboardRepo::from_saved(repo, entry),
                None => DashboardRepo::from_fetched(repo),
            }
        })
        .collect()
}

/// Build the full snapshot to persist from the current view model.
///
/// Includes exactly the repositories with `selected = true`, each carrying
/// its live custom fields plus denormalized source fields. `added_at` is the
/// save timestamp stamped on every entry.
pub fn build_snapshot(
    profile: &Profile,
    skills: &[String],
    repositories: &[DashboardRepo],
    added_at: &str,
) -> ResumeSnapshot {
    let selected_repositories = repositories
        .iter()
        .filter(|entry| entry.selected)
        .map(|entry| SavedRepository {
            id: entry.repository.id.clone(),
            name: entry.repository.name.clone(),
            description: entry.repository.description.clone(),
            language: entry.repository.language.clone(),
            star_count: entry.repository.star_count,
            url: entry.repository.url.clone(),
            custom_title: entry.custom_title.clone(),
            custom_description: entry.custom_description.clone(),
            custom_bullet_points: entry.custom_bullet_points.clone(),
            added_at: added_at.to_string(),
        })
        .collect();

    ResumeSnapshot {
        version: SNAPSHOT_VERSION,
        email: profile.email.clone(),
        linked_in: profile.linked_in.clone(),
        professional_summary: profile.professional_summary.clone(),
        skills: skills.to_vec(),
        selected_repositories,
    }
}

/// User-facing message for a failed save or AI request.
///
/// Premium-gated rejections get dedicated copy; everything else shows the
/// error's own message.
pub fn failure_message(err: &ApiError) -> String {
    if err.is_premium_gated() {
        "This feature requires a premium account. Upgrade to use AI generation.".to_string()
    } else {
        err.to_string()
    }
}

impl DashboardData {
    /// Flip the selection of one repository. Unknown ids are no-ops.
    pub fn toggle_selection(&mut self, repo_id: &str) {
        if let Some(entry) = self.repo_mut(repo_id) {
            entry.selected = !entry.selected;
        }
    }

    /// Replace a repository's custom title. Unknown ids are no-ops.
    pub fn set_custom_title(&mut self, repo_id: &str, title: impl Into<String>) {
        if let Some(entry) = self.repo_mut(repo_id) {
            entry.custom_title = title.into();
        }
    }

    /// Replace a repository's custom description. Unknown ids are no-ops.
    pub fn set_custom_description(&mut self, repo_id: &str, description: impl Into<String>) {
        if let Some(entry) = self.repo_mut(repo_id) {
            entry.custom_description = description.into();
        }
    }

    /// Append a bullet point to a repository's list.
    pub fn add_bullet(&mut self, repo_id: &str, text: impl Into<String>) {
        if let Some(entry) = self.repo_mut(repo_id) {
            entry.custom_bullet_points.push(text.into());
        }
    }

    /// Replace the bullet point at `index`. Out-of-range indices are no-ops.
    pub fn update_bullet(&mut self, repo_id: &str, index: usize, text: impl Into<String>) {
        if let Some(entry) = self.repo_mut(repo_id) {
            if let Some(slot) = entry.custom_bullet_points.get_mut(index) {
                *slot = text.into();
            }
        }
    }

    /// Remove the bullet point at `index`, shifting later ones down.
    /// Out-of-range indices are no-ops.
    pub fn remove_bullet(&mut self, repo_id: &str, index: usize) {
        if let Some(entry) = self.repo_mut(repo_id) {
            if index < entry.custom_bullet_points.len() {
                entry.custom_bullet_points.remove(index);
            }
        }
    }

    /// Append a skill label.
    ///
    /// The label is trimmed first; an empty result or an exact case-sensitive
    /// duplicate leaves the set unchanged.
    pub fn add_skill(&mut self, label: &str) {
        let label = label.trim();
        if label.is_empty() || self.skills.iter().any(|s| s == label) {
            return;
        }
        self.skills.push(label.to_string());
    }

    /// Remove the skill at `index`. Out-of-range indices are no-ops.
    pub fn remove_skill(&mut self, index: usize) {
        if index < self.skills.len() {
            self.skills.remove(index);
        }
    }

    /// Names of the currently selected repositories, in list order.
    pub fn selected_repo_names(&self) -> Vec<String> {
        self.repositories
            .iter()
            .filter(|entry| entry.selected)
            .map(|entry| entry.repository.name.clone())
            .collect()
    }

    fn repo_mut(&mut self, repo_id: &str) -> Option<&mut DashboardRepo> {
        self.repositories.iter_mut().find(|r| r.id() == repo_id)
    }
}

impl Dashboard {
    /// Create a controller that talks through the given client.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            inner: Arc::new(Mutex::new(Inner {
                state: DashboardState::Loading,
                in_flight: InFlight::default(),
            })),
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock still holds a consistent view model; the critical
        // sections below never leave it half-written.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DashboardState {
        self.inner().state.clone()
    }

    /// The view model, when the controller is ready.
    pub fn data(&self) -> Option<DashboardData> {
        match &self.inner().state {
            DashboardState::Ready(data) => Some(data.clone()),
            _ => None,
        }
    }

    /// Run a mutation against the view model; a no-op before `Ready`.
    fn mutate(&self, f: impl FnOnce(&mut DashboardData)) {
        if let DashboardState::Ready(data) = &mut self.inner().state {
            f(data);
        }
    }

    fn ready_data(&self) -> Result<DashboardData, ApiError> {
        self.data()
            .ok_or_else(|| ApiError::validation("Dashboard is not loaded yet"))
    }

    /// In-flight flags for the embedding UI, current as of this call.
    pub fn in_flight(&self) -> InFlight {
        self.inner().in_flight
    }

    fn set_in_flight(&self, f: impl FnOnce(&mut InFlight)) {
        f(&mut self.inner().in_flight);
    }

    /// The identity provider's login URL, for the explicit login action and
    /// for the 401 redirect.
    pub fn login_url(&self, return_url: Option<&str>) -> String {
        self.client.login_url(return_url)
    }

    /// Load the dashboard: profile, repository list, and saved snapshot are
    /// fetched concurrently, then reconciled.
    ///
    /// Profile and repository failures are terminal (`Failed`); a missing or
    /// unreadable snapshot is not (defaults apply). An `AuthRequired` from
    /// any fetch propagates without touching the state, so the caller can
    /// navigate to the login URL instead of rendering an error.
    pub async fn load(&self) -> Result<(), ApiError> {
        self.inner().state = DashboardState::Loading;

        let (profile, repositories, snapshot) = tokio::join!(
            self.client.fetch_profile(),
            self.client.fetch_repositories(),
            self.client.fetch_snapshot(),
        );

        // A 401 from any fetch supersedes every other outcome: the caller
        // navigates to the login URL and no error state is rendered.
        let results = [
            profile.as_ref().err(),
            repositories.as_ref().err(),
            snapshot.as_ref().err(),
        ];
        if results.into_iter().flatten().any(ApiError::is_auth_required) {
            return Err(ApiError::auth_required(self.client.login_url(None)));
        }

        let mut profile = match profile {
            Ok(profile) => profile,
            Err(err) => return self.fail_load(err),
        };
        let repositories = match repositories {
            Ok(repositories) => repositories,
            Err(err) => return self.fail_load(err),
        };
        let snapshot = match snapshot {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                log::warn!("No saved resume snapshot, using defaults: {}", err);
                None
            }
        };

        // Seed the editable contact fields from the last save.
        if let Some(snapshot) = &snapshot {
            if !snapshot.email.is_empty() {
                profile.email = snapshot.email.clone();
            }
            if !snapshot.linked_in.is_empty() {
                profile.linked_in = snapshot.linked_in.clone();
            }
            if !snapshot.professional_summary.is_empty() {
                profile.professional_summary = snapshot.professional_summary.clone();
            }
        }

        let repositories = reconcile(repositories, snapshot.as_ref());
        let skills = snapshot.map(|s| s.skills).unwrap_or_default();

        log::info!(
            "Dashboard loaded: {} repositories, {} skills",
            repositories.len(),
            skills.len()
        );

        self.inner().state = DashboardState::Ready(DashboardData {
            profile,
            repositories,
            skills,
            cover_letter: None,
            analysis: None,
        });

        Ok(())
    }

    fn fail_load(&self, err: ApiError) -> Result<(), ApiError> {
        self.inner().state = DashboardState::Failed(err.to_string());
        Err(err)
    }

    // Synchronous in-memory mutations. All are no-ops until the controller
    // is ready; none of them touch the network, and each applies atomically
    // even while a save or AI request is outstanding.

    /// Flip the selection of one repository.
    pub fn toggle_selection(&self, repo_id: &str) {
        self.mutate(|data| data.toggle_selection(repo_id));
    }

    /// Replace a repository's custom title.
    pub fn set_custom_title(&self, repo_id: &str, title: impl Into<String>) {
        self.mutate(|data| data.set_custom_title(repo_id, title));
    }

    /// Replace a repository's custom description.
    pub fn set_custom_description(&self, repo_id: &str, description: impl Into<String>) {
        self.mutate(|data| data.set_custom_description(repo_id, description));
    }

    /// Append a bullet point to a repository.
    pub fn add_bullet(&self, repo_id: &str, text: impl Into<String>) {
        self.mutate(|data| data.add_bullet(repo_id, text));
    }

    /// Replace the bullet point at `index`.
    pub fn update_bullet(&self, repo_id: &str, index: usize, text: impl Into<String>) {
        self.mutate(|data| data.update_bullet(repo_id, index, text));
    }

    /// Remove the bullet point at `index`.
    pub fn remove_bullet(&self, repo_id: &str, index: usize) {
        self.mutate(|data| data.remove_bullet(repo_id, index));
    }

    /// Append a skill label (trimmed; duplicates and empties are no-ops).
    pub fn add_skill(&self, label: &str) {
        self.mutate(|data| data.add_skill(label));
    }

    /// Remove the skill at `index`.
    pub fn remove_skill(&self, index: usize) {
        self.mutate(|data| data.remove_skill(index));
    }

    /// Update the contact email.
    pub fn set_email(&self, email: impl Into<String>) {
        self.mutate(|data| data.profile.email = email.into());
    }

    /// Update the LinkedIn handle.
    pub fn set_linked_in(&self, linked_in: impl Into<String>) {
        self.mutate(|data| data.profile.linked_in = linked_in.into());
    }

    /// Update the professional summary.
    pub fn set_professional_summary(&self, summary: impl Into<String>) {
        self.mutate(|data| data.profile.professional_summary = summary.into());
    }

    /// Persist the current state as a full snapshot replace.
    ///
    /// On failure the local edits stay untouched and the user can retry.
    pub async fn save(&self) -> Result<(), ApiError> {
        let snapshot = {
            let data = self.ready_data()?;
            build_snapshot(
                &data.profile,
                &data.skills,
                &data.repositories,
                &chrono::Utc::now().to_rfc3339(),
            )
        };

        self.set_in_flight(|flags| flags.saving = true);
        let result = self.client.save_snapshot(&snapshot).await;
        self.set_in_flight(|flags| flags.saving = false);

        match &result {
            Ok(()) => log::info!(
                "Saved resume snapshot with {} repositories",
                snapshot.selected_repositories.len()
            ),
            Err(err) => log::warn!("Failed to save resume snapshot: {}", err),
        }

        result
    }

    /// Generate bullet points for one selected repository; on success they
    /// replace that repository's bullet list and nothing else.
    pub async fn generate_bullets(&self, repo_id: &str) -> Result<(), ApiError> {
        let request = {
            let data = self.ready_data()?;
            let entry = data
                .repositories
                .iter()
                .find(|r| r.id() == repo_id && r.selected)
                .ok_or_else(|| {
                    ApiError::validation_field(
                        "Select the repository before generating bullet points",
                        "repoId",
                    )
                })?;
            GenerateBulletsRequest {
                owner: data.profile.login.clone(),
                repo_name: entry.repository.name.clone(),
            }
        };

        self.set_in_flight(|flags| flags.generating_bullets = true);
        let result = self.client.generate_bullets(&request).await;
        self.set_in_flight(|flags| flags.generating_bullets = false);

        let response = result.inspect_err(|err| {
            log::warn!("Bullet generation failed for {}: {}", request.repo_name, err);
        })?;

        self.mutate(|data| {
            if let Some(entry) = data.repo_mut(repo_id) {
                entry.custom_bullet_points = response.bullet_points;
            }
        });

        Ok(())
    }

    /// Generate a cover letter from the selected repositories and the given
    /// position requirements; on success it replaces the held cover letter.
    pub async fn generate_cover_letter(&self, position_requirements: &str) -> Result<(), ApiError> {
        let request = {
            let data = self.ready_data()?;
            let repo_names = data.selected_repo_names();
            if repo_names.is_empty() {
                return Err(ApiError::validation(
                    "Select at least one repository to generate a cover letter",
                ));
            }
            let position_requirements = position_requirements.trim();
            if position_requirements.is_empty() {
                return Err(ApiError::validation_field(
                    "Position requirements are required",
                    "positionRequirements",
                ));
            }
            CoverLetterRequest {
                owner: data.profile.login.clone(),
                repo_names,
                position_requirements: position_requirements.to_string(),
            }
        };

        self.set_in_flight(|flags| flags.generating_cover_letter = true);
        let result = self.client.generate_cover_letter(&request).await;
        self.set_in_flight(|flags| flags.generating_cover_letter = false);

        let response = result.inspect_err(|err| {
            log::warn!("Cover letter generation failed: {}", err);
        })?;

        self.mutate(|data| data.cover_letter = Some(response.cover_letter));

        Ok(())
    }

    /// Compare the curated portfolio against a job description; on success
    /// the analysis result replaces the held one.
    pub async fn compare_portfolio(&self, job_description: &str) -> Result<(), ApiError> {
        let request = {
            let data = self.ready_data()?;
            if data.selected_repo_names().is_empty() {
                return Err(ApiError::validation(
                    "Select at least one repository to analyze your portfolio",
                ));
            }
            let job_description = job_description.trim();
            if job_description.is_empty() {
                return Err(ApiError::validation_field(
                    "Job description is required",
                    "jobDescription",
                ));
            }
            ComparePortfolioRequest {
                job_description: job_description.to_string(),
            }
        };

        self.set_in_flight(|flags| flags.analyzing = true);
        let result = self.client.compare_portfolio(&request).await;
        self.set_in_flight(|flags| flags.analyzing = false);

        let analysis = result.inspect_err(|err| {
            log::warn!("Portfolio analysis failed: {}", err);
        })?;

        self.mutate(|data| data.analysis = Some(analysis));

        Ok(())
    }

    /// Derive skills from the selected repositories; on success the skill
    /// set is replaced wholesale.
    pub async fn extract_skills(&self) -> Result<(), ApiError> {
        let request = {
            let data = self.ready_data()?;
            let repo_names = data.selected_repo_names();
            if repo_names.is_empty() {
                return Err(ApiError::validation(
                    "Select at least one repository to extract skills",
                ));
            }
            ExtractSkillsRequest {
                owner: data.profile.login.clone(),
                repo_names,
            }
        };

        self.set_in_flight(|flags| flags.extracting_skills = true);
        let result = self.client.extract_skills(&request).await;
        self.set_in_flight(|flags| flags.extracting_skills = false);

        let response = result.inspect_err(|err| {
            log::warn!("Skill extraction failed: {}", err);
        })?;

        self.mutate(|data| data.skills = response.skills);

        Ok(())
    }

    /// URL of the rendered resume PDF for the signed-in user.
    ///
    /// Not an API call: the embedding UI opens it in a new navigation
    /// context and nothing is read back.
    pub fn resume_pdf_url(&self) -> Result<String, ApiError> {
        let data = self.ready_data()?;
        Ok(self.client.resume_pdf_url(&data.profile.login))
    }
}
