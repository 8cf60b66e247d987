use crate::{
    presentation::{
        dto::{
            ApiResponse, PhotoFileRequest,
            wall_dto::{ShareResponse, UpdateDraftRequest, WallViewResponse},
        },
        handlers::WallHandler,
    },
    shared::AppError,
    state::AppState,
};
use tauri::State;

/// ウォールを表示する（フィード取得 + プッシュ購読開始）
#[tauri::command]
pub async fn open_wall(
    state: State<'_, AppState>,
) -> Result<ApiResponse<WallViewResponse>, AppError> {
    let handler = WallHandler::new(state.wall_service.clone());
    let result = handler.open().await;
    Ok(ApiResponse::from_result(result))
}

/// ウォールを閉じる（プッシュ購読を解放）
#[tauri::command]
pub async fn close_wall(state: State<'_, AppState>) -> Result<ApiResponse<()>, AppError> {
    let handler = WallHandler::new(state.wall_service.clone());
    let result = handler.close().await;
    Ok(ApiResponse::from_result(result))
}

/// 現在のウォール状態を取得する
#[tauri::command]
pub async fn get_wall(
    state: State<'_, AppState>,
) -> Result<ApiResponse<WallViewResponse>, AppError> {
    let handler = WallHandler::new(state.wall_service.clone());
    let result = handler.view().await;
    Ok(ApiResponse::from_result(result))
}

/// 下書き本文を更新する
#[tauri::command]
pub async fn update_draft(
    state: State<'_, AppState>,
    request: UpdateDraftRequest,
) -> Result<ApiResponse<WallViewResponse>, AppError> {
    let handler = WallHandler::new(state.wall_service.clone());
    let result = handler.update_draft(request).await;
    Ok(ApiResponse::from_result(result))
}

/// 投稿に添付する写真を選ぶ
#[tauri::command]
pub async fn select_post_photo(
    state: State<'_, AppState>,
    request: PhotoFileRequest,
) -> Result<ApiResponse<WallViewResponse>, AppError> {
    let handler = WallHandler::new(state.wall_service.clone());
    let result = handler.select_photo(request).await;
    Ok(ApiResponse::from_result(result))
}

/// 下書きを投稿する
#[tauri::command]
pub async fn share_post(
    state: State<'_, AppState>,
) -> Result<ApiResponse<ShareResponse>, AppError> {
    let handler = WallHandler::new(state.wall_service.clone());
    let result = handler.share().await;
    Ok(ApiResponse::from_result(result))
}
