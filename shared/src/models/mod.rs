//! Data models
//!
//! Wire shapes of the remote issue service (camelCase JSON) and the
//! device-local issue cache. Server ids are `i64` (Java `Long`).

pub mod analytics;
pub mod issue;
pub mod local_issue;
pub mod statistics;

// Re-exports
pub use analytics::*;
pub use issue::*;
pub use local_issue::*;
pub use statistics::*;
