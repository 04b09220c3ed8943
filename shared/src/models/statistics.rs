//! Aggregate issue statistics

use serde::{Deserialize, Serialize};

/// Counts per status plus total, as returned by the statistics endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueStatistics {
    pub total: u64,
    pub submitted: u64,
    pub in_progress: u64,
    pub resolved: u64,
    pub rejected: u64,
}

impl IssueStatistics {
    /// Issues still waiting on action (submitted + in progress)
    pub fn active(&self) -> u64 {
        self.submitted + self.in_progress
    }

    /// Resolved share of all issues, rounded percent (0 when empty)
    pub fn resolution_rate(&self) -> u64 {
        percent(self.resolved, self.total)
    }

    /// Rejected share of all issues, rounded percent (0 when empty)
    pub fn rejection_rate(&self) -> u64 {
        percent(self.rejected, self.total)
    }
}

fn percent(part: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_rates() {
        let stats = IssueStatistics {
            total: 3,
            submitted: 1,
            in_progress: 0,
            resolved: 2,
            rejected: 0,
        };
        assert_eq!(stats.active(), 1);
        assert_eq!(stats.resolution_rate(), 67);
        assert_eq!(stats.rejection_rate(), 0);
    }

    #[test]
    fn test_empty_statistics_have_zero_rates() {
        let stats = IssueStatistics::default();
        assert_eq!(stats.resolution_rate(), 0);
        assert_eq!(stats.rejection_rate(), 0);
    }

    #[test]
    fn test_wire_names() {
        let stats: IssueStatistics = serde_json::from_str(
            r#"{"total":10,"submitted":4,"inProgress":3,"resolved":2,"rejected":1}"#,
        )
        .unwrap();
        assert_eq!(stats.in_progress, 3);
        assert_eq!(stats.active(), 7);
    }
}
