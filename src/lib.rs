//! PortfolioGen client data layer.
//!
//! The frontend-facing half of PortfolioGen: it fetches the signed-in user's
//! profile and repositories from the backend, reconciles them with the saved
//! resume snapshot, holds the editable view model, and issues save/AI/PDF
//! requests. Authentication is an opaque cookie session; a 401 anywhere
//! surfaces as a login redirect, never as an error screen.

pub mod error;
pub mod models;
pub mod services;

pub use error::ApiError;
pub use services::{ApiClient, ApiClientConfig, Dashboard, DashboardState};
