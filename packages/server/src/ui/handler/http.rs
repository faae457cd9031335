//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    domain::RoomConfig,
    infrastructure::dto::{
        http::{ErrorResponseDto, ResetRoomQuery, RoomConfigRequestDto},
        room::RoomStateDto,
    },
    ui::state::AppState,
};

type ErrorResponse = (StatusCode, Json<ErrorResponseDto>);

fn room_not_found() -> ErrorResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponseDto::new("Room not found")),
    )
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Create a room, or update goal / lengths of an existing one
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RoomConfigRequestDto>,
) -> Result<Json<RoomStateDto>, ErrorResponse> {
    // DTO から Domain Model への変換（ここで検証される）
    let config = RoomConfig::try_from(body).map_err(|e| {
        tracing::warn!("Rejected room configuration: {}", e);
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponseDto::new(e.to_string())),
        )
    })?;

    let snapshot = state.upsert_room_usecase.execute(config).await;
    Ok(Json(snapshot.into()))
}

/// Get list of rooms
pub async fn list_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomStateDto>> {
    let rooms = state.get_rooms_usecase.execute().await;
    Json(rooms.into_iter().map(RoomStateDto::from).collect())
}

/// Get room snapshot by ID
pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomStateDto>, ErrorResponse> {
    match state.get_room_detail_usecase.execute(room_id).await {
        Ok(snapshot) => Ok(Json(snapshot.into())),
        Err(crate::usecase::GetRoomDetailError::RoomNotFound) => Err(room_not_found()),
    }
}

/// Reset the timer of a room on behalf of `user` (default "system")
pub async fn reset_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Query(query): Query<ResetRoomQuery>,
) -> Result<Json<RoomStateDto>, ErrorResponse> {
    match state.reset_room_usecase.execute(room_id, query.user).await {
        Ok(snapshot) => Ok(Json(snapshot.into())),
        Err(crate::usecase::ResetRoomError::RoomNotFound) => Err(room_not_found()),
    }
}
