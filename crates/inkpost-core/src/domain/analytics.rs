use serde::Serialize;

use super::PostStatus;

/// Per-author dashboard numbers, tallied in memory from a narrow select of
/// the author's posts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardAnalytics {
    pub total_posts: u64,
    pub published_posts: u64,
    pub draft_posts: u64,
    pub total_views: i64,
}

impl DashboardAnalytics {
    /// Tally one `(status, view_count)` pair per post. A null view count
    /// counts as zero.
    pub fn tally<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (PostStatus, Option<i64>)>,
    {
        let mut summary = Self::default();
        for (status, views) in rows {
            summary.total_posts += 1;
            match status {
                PostStatus::Published => summary.published_posts += 1,
                PostStatus::Draft => summary.draft_posts += 1,
            }
            summary.total_views += views.unwrap_or(0);
        }
        summary
    }
}
