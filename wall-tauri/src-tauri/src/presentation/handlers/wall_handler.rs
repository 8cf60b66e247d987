use crate::{
    application::services::{ShareOutcome, WallService},
    presentation::dto::{
        wall_dto::{PostResponse, ShareResponse, UpdateDraftRequest, WallViewResponse},
        PhotoFileRequest, Validate,
    },
    shared::error::AppError,
};
use chrono::Utc;
use std::sync::Arc;

pub struct WallHandler {
    wall_service: Arc<WallService>,
}

impl WallHandler {
    pub fn new(wall_service: Arc<WallService>) -> Self {
        Self { wall_service }
    }

    pub async fn open(&self) -> Result<WallViewResponse, AppError> {
        self.wall_service.open().await;
        self.view().await
    }

    pub async fn close(&self) -> Result<(), AppError> {
        self.wall_service.close().await;
        Ok(())
    }

    pub async fn view(&self) -> Result<WallViewResponse, AppError> {
        let snapshot = self.wall_service.snapshot().await;
        Ok(WallViewResponse::from_snapshot(snapshot, Utc::now()))
    }

    pub async fn update_draft(
        &self,
        request: UpdateDraftRequest,
    ) -> Result<WallViewResponse, AppError> {
        self.wall_service.set_body(&request.body).await;
        self.view().await
    }

    pub async fn select_photo(
        &self,
        request: PhotoFileRequest,
    ) -> Result<WallViewResponse, AppError> {
        request.validate().map_err(AppError::InvalidInput)?;

        self.wall_service.select_photo(request.into()).await;
        self.view().await
    }

    pub async fn share(&self) -> Result<ShareResponse, AppError> {
        let outcome = self.wall_service.share().await?;
        let now = Utc::now();
        let wall = WallViewResponse::from_snapshot(self.wall_service.snapshot().await, now);

        // DTOに変換
        Ok(match outcome {
            ShareOutcome::Skipped => ShareResponse {
                shared: false,
                post: None,
                wall,
            },
            ShareOutcome::Posted(post) => ShareResponse {
                shared: true,
                post: Some(PostResponse::from_post(&post, now)),
                wall,
            },
        })
    }
}
