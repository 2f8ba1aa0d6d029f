use super::*;

fn video(id: &str, size: u64, format: Option<&str>) -> VideoResponse {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "size": size,
        "format": format,
    }))
    .expect("parse video")
}

#[test]
fn figures_cover_the_sample() {
    let videos = vec![
        video("a", 100, Some("mp4")),
        video("b", 300, Some("MP4")),
        video("c", 200, Some("webm")),
        video("d", 0, None),
    ];
    let stats = VideoAnalytics::from_videos(&videos, 42);
    assert_eq!(stats.sampled, 4);
    assert_eq!(stats.total_videos, 42);
    assert_eq!(stats.total_size, 600);
    assert_eq!(stats.average_size, 150.0);
    assert_eq!(
        stats.by_format.into_iter().collect::<Vec<_>>(),
        vec![
            ("mp4".to_string(), 2),
            ("unknown".to_string(), 1),
            ("webm".to_string(), 1)
        ]
    );
}

#[test]
fn empty_sample_has_zero_average() {
    let stats = VideoAnalytics::from_videos(&[], 0);
    assert_eq!(stats, VideoAnalytics::default());
}
