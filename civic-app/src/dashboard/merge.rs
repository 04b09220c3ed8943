//! Issue source reconciliation
//!
//! Pure part of the dashboard load: given the outcome of the remote fetch and
//! of the local cache read, build the display list. Remote cards always come
//! first; ordering never depends on which source answered first.

use super::placeholders::placeholder_issues;
use chrono::{DateTime, Utc};
use civic_client::ClientResult;
use shared::models::{IssueRecord, LocalIssueRecord};
use shared::DisplayIssue;
use std::collections::HashSet;

use crate::store::StoreResult;

/// Banner shown while only local data is available
pub const OFFLINE_BANNER: &str = "Unable to reach the server. Showing local data only.";

/// Result of one reconciliation pass
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    /// Raw local cache contents (empty if the cache could not be read)
    pub local_issues: Vec<LocalIssueRecord>,
    /// Display list: remote cards, then local cards (or placeholders when offline)
    pub issues: Vec<DisplayIssue>,
    /// User-visible banner, `None` when the server answered
    pub error: Option<String>,
}

pub fn merge_sources(
    remote: ClientResult<Vec<IssueRecord>>,
    local: StoreResult<Vec<LocalIssueRecord>>,
    now: DateTime<Utc>,
) -> MergeOutcome {
    match remote {
        Ok(remote) => {
            let local = local.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Local issue cache unreadable, showing server issues only");
                Vec::new()
            });

            // A local record already confirmed by the server is shown once, as the remote card
            let synced: HashSet<i64> = remote.iter().map(|issue| issue.id).collect();

            let issues = remote
                .iter()
                .map(|issue| DisplayIssue::from_remote(issue, now))
                .chain(
                    local
                        .iter()
                        .filter(|record| record.remote_id.is_none_or(|id| !synced.contains(&id)))
                        .map(|record| DisplayIssue::from_local(record, now)),
                )
                .collect();

            MergeOutcome {
                local_issues: local,
                issues,
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Issue fetch failed, falling back to local data");

            let (local_issues, mut issues) = match local {
                Ok(local) => {
                    let cards = local
                        .iter()
                        .map(|record| DisplayIssue::from_local(record, now))
                        .collect();
                    (local, cards)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Local issue cache unreadable, showing placeholders only");
                    (Vec::new(), Vec::new())
                }
            };
            issues.extend(placeholder_issues());

            MergeOutcome {
                local_issues,
                issues,
                error: Some(OFFLINE_BANNER.to_string()),
            }
        }
    }
}
