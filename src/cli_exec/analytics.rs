use anyhow::{Context, Result};

use super::videos::human_size;
use super::*;
use crate::AnalyticsCommands;

pub(super) async fn handle_analytics_command(app: &App, command: AnalyticsCommands) -> Result<()> {
    app.require_session()?;
    match command {
        AnalyticsCommands::Dashboard => {
            let summary = app
                .client
                .dashboard_summary()
                .await
                .context("load dashboard summary")?;
            if app.json {
                return app.print_json(&summary, "dashboard");
            }
            println!("users: {}", summary.total_users);
            println!("videos: {}", summary.total_videos);
        }
        AnalyticsCommands::Videos { sample } => {
            let stats = app
                .client
                .video_analytics(sample)
                .await
                .context("load video analytics")?;
            if app.json {
                return app.print_json(&stats, "video analytics");
            }
            println!("sampled: {} of {}", stats.sampled, stats.total_videos);
            println!("total_size: {}", human_size(stats.total_size));
            println!("average_size: {}", human_size(stats.average_size.round() as u64));
            for (format, count) in &stats.by_format {
                println!("format {}: {}", format, count);
            }
        }
    }
    Ok(())
}
