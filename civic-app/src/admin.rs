//! Admin panel: statistics, derived rates, leaderboard

use civic_client::{AnalyticsApi, AnalyticsScope, ClientError, IssueApi};
use shared::models::{IssueStatistics, IssueStatus, LeaderboardRow, Metric};
use std::sync::Arc;

pub const LEADERBOARD_LIMIT: u32 = 10;

/// Percentages and counters shown under the statistics cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedRates {
    pub resolution_rate: u64,
    pub active: u64,
    pub rejection_rate: u64,
}

impl From<&IssueStatistics> for DerivedRates {
    fn from(stats: &IssueStatistics) -> Self {
        Self {
            resolution_rate: stats.resolution_rate(),
            active: stats.active(),
            rejection_rate: stats.rejection_rate(),
        }
    }
}

pub struct AdminPanel<A: ?Sized> {
    api: Arc<A>,
    statistics: Option<IssueStatistics>,
}

impl<A: IssueApi + AnalyticsApi + ?Sized> AdminPanel<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            statistics: None,
        }
    }

    pub fn statistics(&self) -> Option<&IssueStatistics> {
        self.statistics.as_ref()
    }

    pub fn rates(&self) -> Option<DerivedRates> {
        self.statistics.as_ref().map(DerivedRates::from)
    }

    /// Reload statistics; on error the previous values stay in place
    pub async fn refresh(&mut self) -> Result<&IssueStatistics, ClientError> {
        match self.api.statistics().await {
            Ok(stats) => {
                tracing::debug!(total = stats.total, "Statistics loaded");
                Ok(&*self.statistics.insert(stats))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load statistics");
                Err(e)
            }
        }
    }

    /// City leaderboard by the given metric
    pub async fn city_leaderboard(&self, metric: Metric) -> Result<Vec<LeaderboardRow>, ClientError> {
        self.api
            .leaderboard(AnalyticsScope::Cities, metric, LEADERBOARD_LIMIT)
            .await
    }
}

/// Bulk transitions are not supported by the service; this only describes the action
pub fn bulk_status_notice(from: IssueStatus, to: IssueStatus) -> String {
    format!(
        "This would update all {} issues to {}. This feature would be implemented with proper backend support.",
        from, to
    )
}
