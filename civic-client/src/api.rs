//! Issue service API
//!
//! [`IssueApi`] and [`AnalyticsApi`] are the seams the screen flows depend on;
//! [`IssueClient`] is the network implementation of both.
//!
//! | Operation | Request |
//! |-----------|---------|
//! | create | `POST /issues/city/{cityId}/locality/{localityId}` |
//! | list all | `GET /issues` |
//! | get | `GET /issues/{id}` |
//! | by status / category / city / locality | `GET /issues/{status,category,city,locality}/{value}` |
//! | nearby | `GET /issues/nearby?latitude=&longitude=&radiusKm=` |
//! | update status | `PATCH /issues/{id}/status?status=` |
//! | update location | `PATCH /issues/{id}/location?cityId=&localityId=` |
//! | delete | `DELETE /issues/{id}` |
//! | statistics | `GET /issues/stats` |

use crate::{ClientConfig, ClientResult, HttpClient};
use async_trait::async_trait;
use shared::models::{
    CitySummary, CreateIssueRequest, DepartmentSummary, IssueCategory, IssueRecord,
    IssueStatistics, IssueStatus, LeaderboardRow, LocalitySummary, Metric, TimeSeriesPoint,
};

/// Remote issue service
#[async_trait]
pub trait IssueApi: Send + Sync {
    /// Create an issue routed to a city/locality pair
    async fn create_issue(
        &self,
        request: &CreateIssueRequest,
        city_id: i64,
        locality_id: i64,
    ) -> ClientResult<IssueRecord>;
    async fn list_issues(&self) -> ClientResult<Vec<IssueRecord>>;
    async fn get_issue(&self, id: i64) -> ClientResult<IssueRecord>;
    async fn list_by_status(&self, status: IssueStatus) -> ClientResult<Vec<IssueRecord>>;
    async fn list_by_category(&self, category: IssueCategory) -> ClientResult<Vec<IssueRecord>>;
    async fn list_by_city(&self, city_id: i64) -> ClientResult<Vec<IssueRecord>>;
    async fn list_by_locality(&self, locality_id: i64) -> ClientResult<Vec<IssueRecord>>;
    /// Issues within `radius_km` of a coordinate
    async fn list_nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> ClientResult<Vec<IssueRecord>>;
    async fn update_status(&self, id: i64, status: IssueStatus) -> ClientResult<IssueRecord>;
    async fn update_location(
        &self,
        id: i64,
        city_id: i64,
        locality_id: i64,
    ) -> ClientResult<IssueRecord>;
    async fn delete_issue(&self, id: i64) -> ClientResult<()>;
    /// Counts per status plus total
    async fn statistics(&self) -> ClientResult<IssueStatistics>;
}

/// Grouping used by the analytics endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsScope {
    Cities,
    Localities,
    Departments,
}

impl AnalyticsScope {
    fn segment(&self) -> &'static str {
        match self {
            AnalyticsScope::Cities => "cities",
            AnalyticsScope::Localities => "localities",
            AnalyticsScope::Departments => "departments",
        }
    }
}

/// Network client for the issue service
#[derive(Debug, Clone)]
pub struct IssueClient {
    http: HttpClient,
}

impl IssueClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }
}

/// Aggregated views served by the analytics endpoints
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    /// Top entries of a city/locality/department leaderboard
    async fn leaderboard(
        &self,
        scope: AnalyticsScope,
        metric: Metric,
        limit: u32,
    ) -> ClientResult<Vec<LeaderboardRow>>;
    async fn city_summary(&self, city_id: i64) -> ClientResult<CitySummary>;
    async fn locality_summary(&self, locality_id: i64) -> ClientResult<LocalitySummary>;
    async fn department_summary(&self, department_id: i64) -> ClientResult<DepartmentSummary>;
    /// Daily count of new issues in a city
    async fn city_new_issues(&self, city_id: i64) -> ClientResult<Vec<TimeSeriesPoint>>;
}

#[async_trait]
impl AnalyticsApi for IssueClient {
    async fn leaderboard(
        &self,
        scope: AnalyticsScope,
        metric: Metric,
        limit: u32,
    ) -> ClientResult<Vec<LeaderboardRow>> {
        let path = format!("analytics/{}/leaderboard", scope.segment());
        let limit = limit.to_string();
        self.http
            .get_with_query(&path, &[("metric", metric.as_str()), ("limit", limit.as_str())])
            .await
    }

    async fn city_summary(&self, city_id: i64) -> ClientResult<CitySummary> {
        self.http.get(&format!("analytics/cities/{}/summary", city_id)).await
    }

    async fn locality_summary(&self, locality_id: i64) -> ClientResult<LocalitySummary> {
        self.http
            .get(&format!("analytics/localities/{}/summary", locality_id))
            .await
    }

    async fn department_summary(&self, department_id: i64) -> ClientResult<DepartmentSummary> {
        self.http
            .get(&format!("analytics/departments/{}/summary", department_id))
            .await
    }

    async fn city_new_issues(&self, city_id: i64) -> ClientResult<Vec<TimeSeriesPoint>> {
        self.http
            .get(&format!("analytics/cities/{}/timeseries/new-issues", city_id))
            .await
    }
}

#[async_trait]
impl IssueApi for IssueClient {
    async fn create_issue(
        &self,
        request: &CreateIssueRequest,
        city_id: i64,
        locality_id: i64,
    ) -> ClientResult<IssueRecord> {
        let path = format!("issues/city/{}/locality/{}", city_id, locality_id);
        let issue: IssueRecord = self.http.post(&path, request).await?;
        tracing::info!(issue_id = issue.id, "Issue created");
        Ok(issue)
    }

    async fn list_issues(&self) -> ClientResult<Vec<IssueRecord>> {
        self.http.get("issues").await
    }

    async fn get_issue(&self, id: i64) -> ClientResult<IssueRecord> {
        self.http.get(&format!("issues/{}", id)).await
    }

    async fn list_by_status(&self, status: IssueStatus) -> ClientResult<Vec<IssueRecord>> {
        self.http.get(&format!("issues/status/{}", status.as_str())).await
    }

    async fn list_by_category(&self, category: IssueCategory) -> ClientResult<Vec<IssueRecord>> {
        self.http
            .get(&format!("issues/category/{}", category.as_str()))
            .await
    }

    async fn list_by_city(&self, city_id: i64) -> ClientResult<Vec<IssueRecord>> {
        self.http.get(&format!("issues/city/{}", city_id)).await
    }

    async fn list_by_locality(&self, locality_id: i64) -> ClientResult<Vec<IssueRecord>> {
        self.http.get(&format!("issues/locality/{}", locality_id)).await
    }

    async fn list_nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> ClientResult<Vec<IssueRecord>> {
        self.http
            .get_with_query(
                "issues/nearby",
                &[("latitude", latitude), ("longitude", longitude), ("radiusKm", radius_km)],
            )
            .await
    }

    async fn update_status(&self, id: i64, status: IssueStatus) -> ClientResult<IssueRecord> {
        let issue: IssueRecord = self
            .http
            .patch(&format!("issues/{}/status", id), &[("status", status.as_str())])
            .await?;
        tracing::info!(issue_id = id, status = %status, "Issue status updated");
        Ok(issue)
    }

    async fn update_location(
        &self,
        id: i64,
        city_id: i64,
        locality_id: i64,
    ) -> ClientResult<IssueRecord> {
        self.http
            .patch(
                &format!("issues/{}/location", id),
                &[("cityId", city_id), ("localityId", locality_id)],
            )
            .await
    }

    async fn delete_issue(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("issues/{}", id)).await?;
        tracing::info!(issue_id = id, "Issue deleted");
        Ok(())
    }

    async fn statistics(&self) -> ClientResult<IssueStatistics> {
        self.http.get("issues/stats").await
    }
}
