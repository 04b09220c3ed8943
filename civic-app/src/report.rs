//! Report flow
//!
//! A [`ReportDraft`] is validated, then either kept on the device only
//! ([`ReportService::save_offline`]) or created on the server and cached
//! with its server id ([`ReportService::submit`]).

use crate::location::{CoordinateError, coordinate_label, parse_coordinates};
use crate::store::{LocalStore, StoreError};
use chrono::Utc;
use civic_client::{ClientError, IssueApi};
use shared::display::title_from_description;
use shared::models::{CreateIssueRequest, IssueCategory, IssueRecord, IssueStatus, LocalIssueRecord};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Please add a photo of the issue.")]
    MissingPhoto,

    #[error("Please describe the issue.")]
    MissingDescription,

    #[error(transparent)]
    InvalidCoordinates(#[from] CoordinateError),

    #[error("Failed to submit the issue: {0}")]
    Remote(#[from] ClientError),

    #[error("Failed to save the issue locally: {0}")]
    Store(#[from] StoreError),
}

pub type ReportResult<T> = Result<T, ReportError>;

/// Issue being composed by the user
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDraft {
    pub category: IssueCategory,
    pub description: String,
    /// Photo reference handed over by the picker
    pub photo: Option<String>,
    pub location: String,
    /// Latitude as typed
    pub latitude: String,
    /// Longitude as typed
    pub longitude: String,
}

/// Draft that passed validation
#[derive(Debug)]
struct ValidDraft<'a> {
    draft: &'a ReportDraft,
    photo: &'a str,
    latitude: f64,
    longitude: f64,
}

impl ReportDraft {
    fn validate(&self) -> ReportResult<ValidDraft<'_>> {
        let photo = self
            .photo
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or(ReportError::MissingPhoto)?;
        if self.description.trim().is_empty() {
            return Err(ReportError::MissingDescription);
        }
        let (latitude, longitude) = parse_coordinates(&self.latitude, &self.longitude)?;

        Ok(ValidDraft {
            draft: self,
            photo,
            latitude,
            longitude,
        })
    }
}

impl ValidDraft<'_> {
    fn local_record(&self, remote_id: Option<i64>) -> LocalIssueRecord {
        LocalIssueRecord {
            id: shared::util::local_id(),
            image: Some(self.photo.to_string()),
            title: title_from_description(Some(&self.draft.description)),
            status: IssueStatus::Submitted.label().to_string(),
            location: self.draft.location.trim().to_string(),
            notes: self.draft.description.clone(),
            coordinates: coordinate_label(&self.draft.latitude, &self.draft.longitude),
            timestamp: Utc::now(),
            remote_id,
            status_color: None,
            time: None,
        }
    }

    fn create_request(&self) -> CreateIssueRequest {
        CreateIssueRequest {
            description: self.draft.description.trim().to_string(),
            category: self.draft.category,
            latitude: self.latitude,
            longitude: self.longitude,
            photo_url: Some(self.photo.to_string()),
        }
    }
}

/// Result of a server submission
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub issue: IssueRecord,
    /// Local copy, `None` if the cache write failed after the server accepted the issue
    pub local: Option<LocalIssueRecord>,
}

pub struct ReportService<A: IssueApi + ?Sized> {
    api: Arc<A>,
    store: LocalStore,
    city_id: i64,
    locality_id: i64,
}

impl<A: IssueApi + ?Sized> ReportService<A> {
    /// `city_id`/`locality_id` route every submission
    pub fn new(api: Arc<A>, store: LocalStore, city_id: i64, locality_id: i64) -> Self {
        Self {
            api,
            store,
            city_id,
            locality_id,
        }
    }

    /// Remember a picked photo; returns its cache key when it could be stored
    pub fn attach_photo(&self, uri: &str) -> Option<String> {
        match self.store.save_photo_ref(uri) {
            Ok(key) => {
                tracing::debug!(key = %key, "Photo reference stored");
                Some(key)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to store photo reference");
                None
            }
        }
    }

    /// Keep the issue on this device only
    pub fn save_offline(&self, draft: &ReportDraft) -> ReportResult<LocalIssueRecord> {
        let valid = draft.validate()?;
        let record = valid.local_record(None);
        self.store.prepend_user_issue(&record)?;

        tracing::info!(local_id = record.id, "Issue saved locally");
        Ok(record)
    }

    /// Create the issue on the server, then cache it with its server id
    pub async fn submit(&self, draft: &ReportDraft) -> ReportResult<SubmitOutcome> {
        let valid = draft.validate()?;
        let issue = self
            .api
            .create_issue(&valid.create_request(), self.city_id, self.locality_id)
            .await?;

        let record = valid.local_record(Some(issue.id));
        let store = self.store.clone();
        let cached = record.clone();
        let written = tokio::task::spawn_blocking(move || store.prepend_user_issue(&cached))
            .await
            .unwrap_or_else(|e| Err(StoreError::Task(e.to_string())));
        let local = match written {
            Ok(()) => Some(record),
            Err(e) => {
                tracing::warn!(issue_id = issue.id, error = %e, "Issue created but local copy not saved");
                None
            }
        };

        tracing::info!(issue_id = issue.id, category = %draft.category, "Issue submitted");
        Ok(SubmitOutcome { issue, local })
    }
}
