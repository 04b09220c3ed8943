//! Civic Client - HTTP client for the remote issue service
//!
//! Every call is a single request/response against `{base}/api`: no retry,
//! no pagination, no idempotency key. Failures surface as one [`ClientError`].

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::{AnalyticsApi, AnalyticsScope, IssueApi, IssueClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::models::{
    CitySummary, CreateIssueRequest, DepartmentSummary, IssueCategory, IssueRecord,
    IssueStatistics, IssueStatus, LeaderboardRow, LocalitySummary, Metric, TimeSeriesPoint,
};
