//! Demo cards shown when the server cannot be reached
//!
//! They only keep the list from being empty; their ids are local and
//! never open a detail view.

use shared::display::{COLOR_IN_PROGRESS, COLOR_PENDING, COLOR_RESOLVED};
use shared::{DisplayIssue, IssueId};

pub const PLACEHOLDER_COUNT: usize = 5;

const CARDS: [(i64, &str, &str, &str, &str, &str); PLACEHOLDER_COUNT] = [
    (1, "Pothole on Main Street near Town Hall", "Pending", COLOR_PENDING, "2h ago", "Main St, Downtown"),
    (2, "Broken street light at Elm Avenue, making", "In Progress", COLOR_IN_PROGRESS, "1d ago", "Elm Ave, Residential"),
    (3, "Overflowing public trash bins at Central", "Resolved", COLOR_RESOLVED, "3d ago", "Central Park, Green Area"),
    (4, "Graffiti on the community center wall,", "Pending", COLOR_PENDING, "5h ago", "Community Center, North Side"),
    (5, "Blocked storm drain on Oak Street, causing", "In Progress", COLOR_IN_PROGRESS, "2d ago", "Oak St, Industrial Area"),
];

/// The fixed placeholder set, in display order
pub fn placeholder_issues() -> Vec<DisplayIssue> {
    CARDS
        .iter()
        .map(|&(id, title, status, color, time, location)| DisplayIssue {
            id: IssueId::Local(id),
            image: Some(format!("assets/images/card{}.png", id)),
            title: title.to_string(),
            status: status.to_string(),
            status_color: color.to_string(),
            time: time.to_string(),
            location: location.to_string(),
        })
        .collect()
}
