use anyhow::{Context, Result};

use socialctl::upload::UploadRequest;

use super::*;
use crate::VideoCommands;

pub(super) async fn handle_video_command(app: &App, command: VideoCommands) -> Result<()> {
    app.require_session()?;
    let client = &app.client;
    match command {
        VideoCommands::List { user, page, size } => {
            let videos = match &user {
                Some(user_id) => client.list_user_videos(user_id, page, size).await,
                None => client.list_videos(page, size).await,
            }
            .context("list videos")?;
            if app.json {
                return app.print_json(&videos, "videos");
            }
            if videos.content.is_empty() {
                println!("No videos");
            }
            for v in &videos.content {
                let title = v.title.as_deref().unwrap_or(&v.file_name);
                println!(
                    "{} {} {} {}",
                    short_id(&v.id),
                    human_size(v.size),
                    v.format.as_deref().unwrap_or("-"),
                    title
                );
            }
            println!(
                "page {}/{} ({} videos)",
                page + 1,
                videos.total_pages.max(1),
                videos.total_elements
            );
        }
        VideoCommands::Upload {
            path,
            title,
            description,
            content_type,
        } => {
            let upload = UploadRequest::from_path(
                &path,
                content_type.as_deref(),
                title,
                description,
                &client.config().upload,
            )?;
            let video = client.upload_video(upload).await.context("upload video")?;
            if app.json {
                return app.print_json(&video, "video");
            }
            println!("Uploaded {} ({})", video.id, human_size(video.size));
            print_optional("url", Some(video.secure_url.as_str()));
        }
        VideoCommands::Delete { video_id } => {
            client.delete_video(&video_id).await.context("delete video")?;
            if !app.json {
                println!("Deleted video {}", video_id);
            }
        }
    }
    Ok(())
}

pub(super) fn human_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{}B", bytes)
    } else if b < KB * KB {
        format!("{:.1}KB", b / KB)
    } else {
        format!("{:.1}MB", b / (KB * KB))
    }
}
