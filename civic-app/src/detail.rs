//! Issue detail flow

use civic_client::{ClientError, IssueApi};
use shared::display::{NO_DESCRIPTION, title_from_description};
use shared::models::{IssueRecord, IssueStatus};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetailError {
    #[error("Failed to load issue details. This might be demo data or the issue may not exist.")]
    NotAvailable(#[source] ClientError),

    #[error("Failed to update issue status: {0}")]
    UpdateFailed(#[source] ClientError),
}

/// One server issue opened from the list
pub struct IssueDetail<A: IssueApi + ?Sized> {
    api: Arc<A>,
    issue: IssueRecord,
}

impl<A: IssueApi + ?Sized> IssueDetail<A> {
    pub async fn load(api: Arc<A>, id: i64) -> Result<Self, DetailError> {
        let issue = api.get_issue(id).await.map_err(|e| {
            tracing::warn!(issue_id = id, error = %e, "Failed to load issue");
            DetailError::NotAvailable(e)
        })?;
        Ok(Self { api, issue })
    }

    pub fn issue(&self) -> &IssueRecord {
        &self.issue
    }

    /// Change the status on the server; the held issue is replaced on success
    pub async fn update_status(&mut self, status: IssueStatus) -> Result<&IssueRecord, DetailError> {
        let updated = self
            .api
            .update_status(self.issue.id, status)
            .await
            .map_err(DetailError::UpdateFailed)?;
        self.issue = updated;
        Ok(&self.issue)
    }

    /// Text handed to the share sheet
    pub fn share_message(&self) -> String {
        share_message(&self.issue)
    }

    pub fn status_marker_color(&self) -> &'static str {
        self.issue.status.marker_color()
    }

    pub fn category_marker_color(&self) -> &'static str {
        self.issue.category.marker_color()
    }
}

pub fn share_message(issue: &IssueRecord) -> String {
    let description = issue
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(NO_DESCRIPTION);
    format!(
        "Check out this issue: {}\n\nDescription: {}\nCategory: {}\nStatus: {}",
        title_from_description(issue.description.as_deref()),
        description,
        issue.category,
        issue.status,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeApi, issue};
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_load_and_update_status() {
        let api = Arc::new(FakeApi::with_issues(vec![issue(
            7,
            "Pothole",
            IssueStatus::Submitted,
            3,
        )]));

        let mut detail = IssueDetail::load(api.clone(), 7).await.unwrap();
        assert_eq!(detail.status_marker_color(), "#FFA726");
        assert_eq!(detail.category_marker_color(), "#795548");

        let updated = detail.update_status(IssueStatus::InProgress).await.unwrap();
        assert_eq!(updated.status, IssueStatus::InProgress);
        assert_eq!(detail.issue().status, IssueStatus::InProgress);
        assert_eq!(detail.status_marker_color(), "#42A5F5");
        assert!(api.calls().contains(&"update_status 7 IN_PROGRESS".to_string()));
    }

    #[tokio::test]
    async fn test_load_missing_issue() {
        let api = Arc::new(FakeApi::default());
        let err = IssueDetail::load(api, 42).await.err().unwrap();

        assert!(matches!(&err, DetailError::NotAvailable(e) if e.is_not_found()));
        assert!(err.to_string().contains("demo data"));
    }

    #[tokio::test]
    async fn test_failed_update_keeps_issue() {
        let api = Arc::new(FakeApi::with_issues(vec![issue(
            7,
            "Pothole",
            IssueStatus::Submitted,
            3,
        )]));
        let mut detail = IssueDetail::load(api.clone(), 7).await.unwrap();

        api.fail_writes.store(true, Ordering::SeqCst);
        assert!(detail.update_status(IssueStatus::Resolved).await.is_err());
        assert_eq!(detail.issue().status, IssueStatus::Submitted);
    }

    #[test]
    fn test_share_message() {
        let mut record = issue(1, &"B".repeat(55), IssueStatus::Resolved, 1);
        let message = share_message(&record);
        assert_eq!(
            message,
            format!(
                "Check out this issue: {}...\n\nDescription: {}\nCategory: ROADS\nStatus: RESOLVED",
                "B".repeat(50),
                "B".repeat(55)
            )
        );

        record.description = None;
        assert!(share_message(&record).starts_with("Check out this issue: No description\n\nDescription: No description"));
    }
}
