use crate::{
    presentation::{
        dto::{
            ApiResponse, PhotoFileRequest,
            profile_dto::{
                ProfileCardResponse, UpdateDisplayNameRequest, UpdateProfileInfoRequest,
            },
        },
        handlers::ProfileHandler,
    },
    shared::AppError,
    state::AppState,
};
use tauri::State;

#[tauri::command]
pub async fn get_profile_card(
    state: State<'_, AppState>,
) -> Result<ApiResponse<ProfileCardResponse>, AppError> {
    let handler = ProfileHandler::new(state.profile_service.clone());
    let result = handler.card().await;
    Ok(ApiResponse::from_result(result))
}

/// プロフィール写真を変更する（10MB 超は拒否）
#[tauri::command]
pub async fn change_profile_photo(
    state: State<'_, AppState>,
    request: PhotoFileRequest,
) -> Result<ApiResponse<ProfileCardResponse>, AppError> {
    let handler = ProfileHandler::new(state.profile_service.clone());
    let result = handler.change_photo(request).await;
    Ok(ApiResponse::from_result(result))
}

#[tauri::command]
pub async fn toggle_profile_editing(
    state: State<'_, AppState>,
) -> Result<ApiResponse<ProfileCardResponse>, AppError> {
    let handler = ProfileHandler::new(state.profile_service.clone());
    let result = handler.toggle_editing().await;
    Ok(ApiResponse::from_result(result))
}

#[tauri::command]
pub async fn update_profile_info(
    state: State<'_, AppState>,
    request: UpdateProfileInfoRequest,
) -> Result<ApiResponse<ProfileCardResponse>, AppError> {
    let handler = ProfileHandler::new(state.profile_service.clone());
    let result = handler.update_info(request).await;
    Ok(ApiResponse::from_result(result))
}

/// 表示名を変更する（ウォール側の表示名に即時反映）
#[tauri::command]
pub async fn update_display_name(
    state: State<'_, AppState>,
    request: UpdateDisplayNameRequest,
) -> Result<ApiResponse<ProfileCardResponse>, AppError> {
    let handler = ProfileHandler::new(state.profile_service.clone());
    let result = handler.update_display_name(request).await;
    Ok(ApiResponse::from_result(result))
}
