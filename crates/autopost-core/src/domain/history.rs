use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status given to every freshly recorded post.
pub const STATUS_PUBLISHED: &str = "published";

/// A post that went out to WordPress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub keywords: String,
    pub image_url: Option<String>,
    pub wordpress_post_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub status: String,
    pub template_used: Option<String>,
}

/// Data needed to append a history record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHistoryEntry {
    pub title: String,
    pub content: String,
    pub keywords: String,
    pub image_url: Option<String>,
    pub wordpress_post_id: i64,
    pub template_used: String,
}

/// Aggregate publishing statistics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PostStats {
    pub total_count: u64,
    pub distinct_active_days: u64,
    pub average_per_day: f64,
}

impl PostStats {
    /// Compute stats from the creation times of every recorded post.
    ///
    /// Days are UTC calendar dates. The average is rounded to one decimal.
    pub fn from_timestamps<I>(timestamps: I) -> Self
    where
        I: IntoIterator<Item = DateTime<Utc>>,
    {
        let mut total_count = 0u64;
        let mut days = BTreeSet::new();
        for ts in timestamps {
            total_count += 1;
            days.insert(ts.date_naive());
        }

        let distinct_active_days = days.len() as u64;
        let average_per_day = if distinct_active_days == 0 {
            0.0
        } else {
            let raw = total_count as f64 / distinct_active_days as f64;
            (raw * 10.0).round() / 10.0
        };

        Self {
            total_count,
            distinct_active_days,
            average_per_day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_empty_stats() {
        let stats = PostStats::from_timestamps(Vec::new());
        assert_eq!(stats, PostStats::default());
        assert_eq!(stats.average_per_day, 0.0);
    }

    #[test]
    fn test_three_posts_over_two_days() {
        let stats = PostStats::from_timestamps(vec![
            Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 1, 21, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap(),
        ]);

        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.distinct_active_days, 2);
        assert_eq!(stats.average_per_day, 1.5);
    }

    #[test]
    fn test_average_rounds_to_one_decimal() {
        let stats = PostStats::from_timestamps(vec![
            Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 3, 8, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 3, 9, 0, 0).unwrap(),
        ]);

        assert_eq!(stats.average_per_day, 1.3);
    }
}
