//! Dashboard: merged issue list plus statistics
//!
//! [`Dashboard::load_issues`] drives the remote fetch, the local cache read
//! and the statistics fetch concurrently, then reconciles them through
//! [`merge::merge_sources`]. Each load takes a ticket; a load whose ticket
//! was superseded by a newer one drops its results.

pub mod merge;
pub mod placeholders;

pub use merge::{MergeOutcome, OFFLINE_BANNER, merge_sources};
pub use placeholders::{PLACEHOLDER_COUNT, placeholder_issues};

use crate::store::{LocalStore, StoreError};
use chrono::Utc;
use civic_client::IssueApi;
use shared::models::{IssueStatistics, LocalIssueRecord};
use shared::DisplayIssue;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Notice shown when a card without a server identity is selected
pub const LOCAL_ISSUE_NOTICE: &str =
    "This issue has not been confirmed by the server yet, so no details are available.";

/// Observable dashboard state
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub local_issues: Vec<LocalIssueRecord>,
    pub issues: Vec<DisplayIssue>,
    /// Last statistics received; kept when a refresh fails
    pub statistics: Option<IssueStatistics>,
    pub error: Option<String>,
    pub loading: bool,
}

/// Where selecting a card leads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Open the detail view of a server issue
    Detail(i64),
    /// Show a notice instead
    Notice(String),
}

pub struct Dashboard<A: IssueApi + ?Sized> {
    api: Arc<A>,
    store: LocalStore,
    state: RwLock<DashboardState>,
    generation: AtomicU64,
}

impl<A: IssueApi + ?Sized> Dashboard<A> {
    pub fn new(api: Arc<A>, store: LocalStore) -> Self {
        Self {
            api,
            store,
            state: RwLock::new(DashboardState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Reload issues and statistics
    ///
    /// Returns `false` when a newer load started before this one finished and
    /// its results were discarded.
    pub async fn load_issues(&self) -> bool {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().await.loading = true;

        let store = self.store.clone();
        let (remote, local, statistics) = tokio::join!(
            self.api.list_issues(),
            async move {
                tokio::task::spawn_blocking(move || store.load_user_issues())
                    .await
                    .unwrap_or_else(|e| Err(StoreError::Task(e.to_string())))
            },
            self.api.statistics(),
        );

        let outcome = merge_sources(remote, local, Utc::now());

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, "Issue load superseded, discarding results");
            return false;
        }

        state.local_issues = outcome.local_issues;
        state.issues = outcome.issues;
        state.error = outcome.error;
        match statistics {
            Ok(statistics) => state.statistics = Some(statistics),
            Err(e) => tracing::warn!(error = %e, "Statistics refresh failed, keeping previous values"),
        }
        state.loading = false;

        tracing::info!(
            issues = state.issues.len(),
            local = state.local_issues.len(),
            offline = state.error.is_some(),
            "Issues loaded"
        );
        true
    }

    /// Resolve a card selection
    pub fn open_issue(&self, issue: &DisplayIssue) -> Navigation {
        match issue.id.remote() {
            Some(id) => Navigation::Detail(id),
            None => Navigation::Notice(LOCAL_ISSUE_NOTICE.to_string()),
        }
    }
}
