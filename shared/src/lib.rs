//! Shared types for the civic issue client
//!
//! Wire models exchanged with the remote issue service, the device-local
//! issue records, and the display derivation used by every screen flow.

pub mod display;
pub mod geo;
pub mod models;
pub mod types;
pub mod util;

// Re-exports
pub use display::{DisplayIssue, IssueId};
pub use models::{
    CreateIssueRequest, IssueCategory, IssueRecord, IssueStatistics, IssueStatus,
    LocalIssueRecord, NamedRef,
};
pub use serde::{Deserialize, Serialize};
pub use types::ParseEnumError;
