//! In-memory issue service used by the flow tests

use async_trait::async_trait;
use chrono::Utc;
use civic_client::{AnalyticsApi, AnalyticsScope, ClientError, ClientResult, IssueApi};
use shared::models::{
    CitySummary, CreateIssueRequest, DepartmentSummary, IssueCategory, IssueRecord,
    IssueStatistics, IssueStatus, LeaderboardRow, LocalitySummary, Metric, NamedRef,
    TimeSeriesPoint,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::time::Duration;

pub fn issue(id: i64, description: &str, status: IssueStatus, hours_ago: i64) -> IssueRecord {
    IssueRecord {
        id,
        description: Some(description.to_string()),
        category: IssueCategory::Roads,
        status,
        latitude: 34.0522,
        longitude: -118.2437,
        photo_url: None,
        created_at: Some((Utc::now() - chrono::Duration::hours(hours_ago)).naive_utc()),
        updated_at: None,
        resolved_at: None,
        city: Some(NamedRef {
            id: 1,
            name: "Springfield".into(),
        }),
        locality: Some(NamedRef {
            id: 1,
            name: "Downtown".into(),
        }),
        department: None,
    }
}

fn unavailable() -> ClientError {
    ClientError::Api {
        status: 503,
        body: "Service Unavailable".into(),
    }
}

fn not_found(id: i64) -> ClientError {
    ClientError::Api {
        status: 404,
        body: format!("Issue not found with id: {}", id),
    }
}

#[derive(Default)]
pub struct FakeApi {
    pub issues: Mutex<Vec<IssueRecord>>,
    pub stats: Mutex<IssueStatistics>,
    pub leaderboard: Mutex<Vec<LeaderboardRow>>,
    pub fail_list: AtomicBool,
    pub fail_stats: AtomicBool,
    pub fail_nearby: AtomicBool,
    pub fail_writes: AtomicBool,
    /// Delay applied to successive `list_issues` calls, after the snapshot is taken
    pub list_delays: Mutex<VecDeque<Duration>>,
    /// `(city_id, locality_id, request)` of every create call
    pub created: Mutex<Vec<(i64, i64, CreateIssueRequest)>>,
    pub calls: Mutex<Vec<String>>,
    next_id: AtomicI64,
}

impl FakeApi {
    pub fn with_issues(issues: Vec<IssueRecord>) -> Self {
        let api = Self::default();
        *api.issues.lock().unwrap() = issues;
        api
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn filtered(&self, keep: impl Fn(&IssueRecord) -> bool) -> Vec<IssueRecord> {
        self.issues
            .lock()
            .unwrap()
            .iter()
            .filter(|i| keep(i))
            .cloned()
            .collect()
    }

    fn modify(&self, id: i64, change: impl FnOnce(&mut IssueRecord)) -> ClientResult<IssueRecord> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut issues = self.issues.lock().unwrap();
        let issue = issues.iter_mut().find(|i| i.id == id).ok_or_else(|| not_found(id))?;
        change(issue);
        Ok(issue.clone())
    }
}

#[async_trait]
impl IssueApi for FakeApi {
    async fn create_issue(
        &self,
        request: &CreateIssueRequest,
        city_id: i64,
        locality_id: i64,
    ) -> ClientResult<IssueRecord> {
        self.record("create_issue");
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.created
            .lock()
            .unwrap()
            .push((city_id, locality_id, request.clone()));

        let id = 1000 + self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut created = issue(id, &request.description, IssueStatus::Submitted, 0);
        created.category = request.category;
        created.latitude = request.latitude;
        created.longitude = request.longitude;
        created.photo_url = request.photo_url.clone();
        self.issues.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_issues(&self) -> ClientResult<Vec<IssueRecord>> {
        self.record("list_issues");
        let snapshot = if self.fail_list.load(Ordering::SeqCst) {
            Err(unavailable())
        } else {
            Ok(self.issues.lock().unwrap().clone())
        };
        let delay = self.list_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        snapshot
    }

    async fn get_issue(&self, id: i64) -> ClientResult<IssueRecord> {
        self.record(format!("get_issue {}", id));
        self.filtered(|i| i.id == id)
            .into_iter()
            .next()
            .ok_or_else(|| not_found(id))
    }

    async fn list_by_status(&self, status: IssueStatus) -> ClientResult<Vec<IssueRecord>> {
        self.record("list_by_status");
        Ok(self.filtered(|i| i.status == status))
    }

    async fn list_by_category(&self, category: IssueCategory) -> ClientResult<Vec<IssueRecord>> {
        self.record("list_by_category");
        Ok(self.filtered(|i| i.category == category))
    }

    async fn list_by_city(&self, city_id: i64) -> ClientResult<Vec<IssueRecord>> {
        self.record("list_by_city");
        Ok(self.filtered(|i| i.city.as_ref().is_some_and(|c| c.id == city_id)))
    }

    async fn list_by_locality(&self, locality_id: i64) -> ClientResult<Vec<IssueRecord>> {
        self.record("list_by_locality");
        Ok(self.filtered(|i| i.locality.as_ref().is_some_and(|l| l.id == locality_id)))
    }

    async fn list_nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> ClientResult<Vec<IssueRecord>> {
        self.record("list_nearby");
        if self.fail_nearby.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.filtered(|i| {
            shared::geo::distance_km(latitude, longitude, i.latitude, i.longitude) <= radius_km
        }))
    }

    async fn update_status(&self, id: i64, status: IssueStatus) -> ClientResult<IssueRecord> {
        self.record(format!("update_status {} {}", id, status));
        self.modify(id, |issue| issue.status = status)
    }

    async fn update_location(
        &self,
        id: i64,
        city_id: i64,
        locality_id: i64,
    ) -> ClientResult<IssueRecord> {
        self.record(format!("update_location {}", id));
        self.modify(id, |issue| {
            issue.city = Some(NamedRef {
                id: city_id,
                name: format!("City {}", city_id),
            });
            issue.locality = Some(NamedRef {
                id: locality_id,
                name: format!("Locality {}", locality_id),
            });
        })
    }

    async fn delete_issue(&self, id: i64) -> ClientResult<()> {
        self.record(format!("delete_issue {}", id));
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut issues = self.issues.lock().unwrap();
        let before = issues.len();
        issues.retain(|i| i.id != id);
        if issues.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn statistics(&self) -> ClientResult<IssueStatistics> {
        self.record("statistics");
        if self.fail_stats.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(*self.stats.lock().unwrap())
    }
}

#[async_trait]
impl AnalyticsApi for FakeApi {
    async fn leaderboard(
        &self,
        scope: AnalyticsScope,
        metric: Metric,
        limit: u32,
    ) -> ClientResult<Vec<LeaderboardRow>> {
        self.record(format!("leaderboard {:?} {} {}", scope, metric.as_str(), limit));
        if self.fail_stats.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self
            .leaderboard
            .lock()
            .unwrap()
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn city_summary(&self, city_id: i64) -> ClientResult<CitySummary> {
        Err(not_found(city_id))
    }

    async fn locality_summary(&self, locality_id: i64) -> ClientResult<LocalitySummary> {
        Err(not_found(locality_id))
    }

    async fn department_summary(&self, department_id: i64) -> ClientResult<DepartmentSummary> {
        Err(not_found(department_id))
    }

    async fn city_new_issues(&self, _city_id: i64) -> ClientResult<Vec<TimeSeriesPoint>> {
        Ok(Vec::new())
    }
}
