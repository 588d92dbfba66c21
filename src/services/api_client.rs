//! PortfolioGen backend API client.
//!
//! Wraps outbound HTTP calls to the backend: presents the session cookie,
//! sets the JSON content type, classifies responses into typed results or
//! failures, and surfaces 401 as a distinguished authentication-required
//! error carrying the provider login URL.

use crate::error::ApiError;
use crate::models::{PortfolioAnalysis, Profile, Repository, ResumeSnapshot};
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Default backend deployment used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:10000";

/// Environment variable that overrides the backend base URL.
pub const BASE_URL_ENV: &str = "PORTFOLIOGEN_API_URL";

/// API client configuration.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of the backend (e.g. `http://localhost:10000`).
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiClientConfig {
    /// Build a configuration from the environment, falling back to the
    /// default deployment when `PORTFOLIOGEN_API_URL` is unset or empty.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            base_url,
            ..Self::default()
        }
    }
}

/// Authenticated client for the PortfolioGen backend.
///
/// Each call is independent: no retries, no deduplication, no caching. The
/// session credential is a cookie managed by the underlying cookie store, so
/// callers never handle tokens directly.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiClientConfig,
}

/// Request body for `POST /api/ai/generate-bullets`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBulletsRequest {
    pub owner: String,
    pub repo_name: String,
}

/// Response body for `POST /api/ai/generate-bullets`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBulletsResponse {
    pub bullet_points: Vec<String>,
}

/// Request body for `POST /api/ai/generate-cover-letter`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    pub owner: String,
    pub repo_names: Vec<String>,
    pub position_requirements: String,
}

/// Response body for `POST /api/ai/generate-cover-letter`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

/// Request body for `POST /api/ai/compare-portfolio`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparePortfolioRequest {
    pub job_description: String,
}

/// Request body for `POST /api/user/extract-skills`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractSkillsRequest {
    pub owner: String,
    pub repo_names: Vec<String>,
}

/// Response body for `POST /api/user/extract-skills`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractSkillsResponse {
    pub skills: Vec<String>,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        // Cookie store holds the opaque session set by the login callback.
        let client = Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// The configured backend base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// Build an absolute URL for a relative endpoint path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// The identity provider's login entry point.
    ///
    /// Used both for the explicit login action and as the navigation target
    /// when a call comes back 401. `return_url` records where to land after
    /// the provider round trip.
    pub fn login_url(&self, return_url: Option<&str>) -> String {
        match return_url {
            Some(target) => format!(
                "{}/auth/login?returnUrl={}",
                self.base_url(),
                urlencoding::encode(target)
            ),
            None => format!("{}/auth/login", self.base_url()),
        }
    }

    /// URL of the rendered resume PDF for a user.
    ///
    /// Opened by the embedding UI in a new navigation context, never parsed.
    pub fn resume_pdf_url(&self, login: &str) -> String {
        format!(
            "{}/api/pdf/resume/{}/pdf",
            self.base_url(),
            urlencoding::encode(login)
        )
    }

    /// Enforce the status contract shared by every endpoint.
    ///
    /// 401 becomes an authentication-required error carrying the login URL;
    /// any other non-2xx becomes an HTTP error whose message is extracted
    /// from a JSON body `message`/`error` field, falling back to the raw
    /// body text, falling back to the status line. A success response is
    /// passed through for body handling.
    async fn check_status(&self, response: Response, endpoint: &str) -> Result<Response, ApiError> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            // The session is missing or expired. Callers must not interpret
            // this as data; the boundary navigates to the login URL.
            return Err(ApiError::auth_required(self.login_url(None)));
        }

        if status.is_success() {
            return Ok(response);
        }

        let status_line = format!("{}", status);
        let body = response.text().await.unwrap_or_default();
        let body_message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                // Backend errors come as {"message": "..."} or {"error": "..."}
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(|m| m.as_str().map(String::from))
            });

        let message = body_message.unwrap_or_else(|| {
            if body.trim().is_empty() {
                status_line
            } else {
                body
            }
        });

        Err(ApiError::http_full(status.as_u16(), message, endpoint))
    }

    /// Classify a response: parsed JSON on 2xx, typed failure otherwise.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
        endpoint: &str,
    ) -> Result<T, ApiError> {
        let response = self.check_status(response, endpoint).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::decode_at(format!("Failed to parse response: {}", e), endpoint))
    }

    /// Issue a GET request and parse the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let response = self.client.get(self.url(endpoint)).send().await?;
        self.handle_response(response, endpoint).await
    }

    /// Issue a POST request with a JSON body and parse the JSON response.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.client.post(self.url(endpoint)).json(body).send().await?;
        self.handle_response(response, endpoint).await
    }

    /// Fetch the authenticated user's profile.
    pub async fn fetch_profile(&self) -> Result<Profile, ApiError> {
        self.get("/api/user/me").await
    }

    /// Fetch the user's repository list from the source host.
    pub async fn fetch_repositories(&self) -> Result<Vec<Repository>, ApiError> {
        self.get("/api/user/repos").await
    }

    /// Fetch the previously saved resume snapshot.
    ///
    /// Fails with an HTTP 404 error when nothing has been saved yet; the
    /// dashboard treats that as "no snapshot" rather than an error.
    pub async fn fetch_snapshot(&self) -> Result<ResumeSnapshot, ApiError> {
        self.get("/api/user/resume").await
    }

    /// Persist a resume snapshot as a full replace.
    ///
    /// The success body (if any) is ignored; failures are classified the same
    /// way as every other endpoint.
    pub async fn save_snapshot(&self, snapshot: &ResumeSnapshot) -> Result<(), ApiError> {
        let endpoint = "/api/user/resume";
        let response = self
            .client
            .post(self.url(endpoint))
            .json(snapshot)
            .send()
            .await?;

        self.check_status(response, endpoint).await?;
        Ok(())
    }

    /// Generate resume bullet points for one repository.
    pub async fn generate_bullets(
        &self,
        request: &GenerateBulletsRequest,
    ) -> Result<GenerateBulletsResponse, ApiError> {
        self.post("/api/ai/generate-bullets", request).await
    }

    /// Generate a cover letter from the selected repositories and a job
    /// description.
    pub async fn generate_cover_letter(
        &self,
        request: &CoverLetterRequest,
    ) -> Result<CoverLetterResponse, ApiError> {
        self.post("/api/ai/generate-cover-letter", request).await
    }

    /// Compare the curated portfolio against a job description.
    pub async fn compare_portfolio(
        &self,
        request: &ComparePortfolioRequest,
    ) -> Result<PortfolioAnalysis, ApiError> {
        self.post("/api/ai/compare-portfolio", request).await
    }

    /// Extract a skill list from the selected repositories.
    pub async fn extract_skills(
        &self,
        request: &ExtractSkillsRequest,
    ) -> Result<ExtractSkillsResponse, ApiError> {
        self.post("/api/user/extract-skills", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(ApiClientConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_url_construction_trims_trailing_slash() {
        let client = client("http://localhost:10000/");
        assert_eq!(
            client.url("/api/user/me"),
            "http://localhost:10000/api/user/me"
        );
    }

    #[test]
    fn test_login_url_without_return() {
        let client = client("http://localhost:10000");
        assert_eq!(client.login_url(None), "http://localhost:10000/auth/login");
    }

    #[test]
    fn test_login_url_encodes_return_url() {
        let client = client("http://localhost:10000");
        assert_eq!(
            client.login_url(Some("http://localhost:3000/dashboard")),
            "http://localhost:10000/auth/login?returnUrl=http%3A%2F%2Flocalhost%3A3000%2Fdashboard"
        );
    }

    #[test]
    fn test_resume_pdf_url() {
        let client = client("http://localhost:10000");
        assert_eq!(
            client.resume_pdf_url("octocat"),
            "http://localhost:10000/api/pdf/resume/octocat/pdf"
        );
    }

    #[test]
    fn test_config_from_env_default() {
        // The variable is not set in the test environment.
        std::env::remove_var(BASE_URL_ENV);
        let config = ApiClientConfig::from_env();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_ai_request_serialization() {
        let request = CoverLetterRequest {
            owner: "octocat".to_string(),
            repo_names: vec!["foo".to_string()],
            position_requirements: "Rust developer".to_string(),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"repoNames\":[\"foo\"]"));
        assert!(json.contains("\"positionRequirements\":\"Rust developer\""));
    }
}
