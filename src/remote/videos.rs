use tracing::info;

use super::*;
use crate::upload::UploadRequest;

pub const DEFAULT_VIDEO_PAGE_SIZE: u32 = 10;

impl ApiClient {
    /// `GET /videos?page&size`.
    pub async fn list_videos(&self, page: u32, size: u32) -> Result<Page<VideoResponse>, ApiError> {
        let req = ApiRequest::get("list videos", "/videos")
            .query("page", page)
            .query("size", size);
        self.call(req).await?.into_result()
    }

    /// `GET /videos/user/{id}?page&size`.
    pub async fn list_user_videos(
        &self,
        user_id: &str,
        page: u32,
        size: u32,
    ) -> Result<Page<VideoResponse>, ApiError> {
        let req = ApiRequest::get("list user videos", "/videos/user").segment(user_id)
            .query("page", page)
            .query("size", size);
        self.call(req).await?.into_result()
    }

    /// `POST /videos/upload` as multipart. The upload is validated against
    /// the configured limits before anything is sent.
    pub async fn upload_video(&self, upload: UploadRequest) -> Result<VideoResponse, ApiError> {
        upload.validate(&self.config().upload)?;
        info!(
            file = %upload.file_name,
            bytes = upload.bytes.len(),
            "uploading video"
        );
        let req = ApiRequest::post("upload video", "/videos/upload").upload(upload);
        self.call(req).await?.into_result()
    }

    /// `DELETE /videos/{id}`.
    pub async fn delete_video(&self, video_id: &str) -> Result<(), ApiError> {
        let req = ApiRequest::delete("delete video", "/videos").segment(video_id);
        self.call::<serde_json::Value>(req).await?.into_unit()
    }
}
