//! Dashboard figures derived from live listings.

use std::collections::BTreeMap;

use serde::Serialize;

use super::*;

pub const DEFAULT_ANALYTICS_SAMPLE: u32 = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_users: u64,
    pub total_videos: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VideoAnalytics {
    /// Videos the figures were computed over.
    pub sampled: u64,
    /// Videos the backend reports in total.
    pub total_videos: u64,
    pub total_size: u64,
    pub average_size: f64,
    pub by_format: BTreeMap<String, u64>,
}

impl VideoAnalytics {
    pub fn from_videos(videos: &[VideoResponse], total_videos: u64) -> Self {
        let total_size: u64 = videos.iter().map(|v| v.size).sum();
        let sampled = videos.len() as u64;
        let average_size = if sampled == 0 {
            0.0
        } else {
            total_size as f64 / sampled as f64
        };

        let mut by_format = BTreeMap::new();
        for v in videos {
            let format = v
                .format
                .as_deref()
                .filter(|f| !f.trim().is_empty())
                .map(str::to_ascii_lowercase)
                .unwrap_or_else(|| "unknown".to_string());
            *by_format.entry(format).or_insert(0) += 1;
        }

        Self {
            sampled,
            total_videos,
            total_size,
            average_size,
            by_format,
        }
    }
}

impl ApiClient {
    /// Totals read from one-element pages of the user and video listings.
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, ApiError> {
        let (users, videos) = tokio::try_join!(self.list_users(0, 1), self.list_videos(0, 1))?;
        Ok(DashboardSummary {
            total_users: users.total_elements,
            total_videos: videos.total_elements,
        })
    }

    pub async fn video_analytics(&self, sample: u32) -> Result<VideoAnalytics, ApiError> {
        let page = self.list_videos(0, sample.max(1)).await?;
        Ok(VideoAnalytics::from_videos(&page.content, page.total_elements))
    }
}

#[cfg(test)]
#[path = "../tests/remote/analytics_tests.rs"]
mod tests;
