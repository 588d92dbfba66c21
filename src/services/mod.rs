//! Business logic services.
//!
//! This module contains the client-side logic of PortfolioGen: the
//! authenticated HTTP client for the backend API and the dashboard data
//! controller that owns the in-memory view model.
//!
//! Services are designed to be testable and independent of any UI shell.

pub mod api_client;
pub mod dashboard;

pub use api_client::{ApiClient, ApiClientConfig};
pub use dashboard::{Dashboard, DashboardData, DashboardState, InFlight};
