use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    app::state::AppState,
    board::state::BoardState,
    dto::board::{
        AssignSectionRequest, CreateItemRequest, CreateSectionRequest, RenameBoardRequest,
        UpdateItemRequest, UpdateSectionRequest, ViewportRequest,
    },
    error::AppError,
    models::board::{BoardItem, Section},
    usecases::board::BoardService,
};

pub async fn get_board_handle(State(state): State<AppState>) -> Json<BoardState> {
    Json(BoardService::snapshot(&state.board).await)
}

pub async fn create_item_handle(
    State(state): State<AppState>,
    Json(req): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<BoardItem>), AppError> {
    let item = BoardService::create_item(&state.board, &state.store, req).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item_handle(
    State(state): State<AppState>,
    Path(item_id): Path<uuid::Uuid>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<BoardItem>, AppError> {
    let item = BoardService::update_item(&state.board, &state.store, item_id, req).await?;
    Ok(Json(item))
}

pub async fn assign_section_handle(
    State(state): State<AppState>,
    Path(item_id): Path<uuid::Uuid>,
    Json(req): Json<AssignSectionRequest>,
) -> Result<StatusCode, AppError> {
    BoardService::assign_section(&state.board, &state.store, item_id, req).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_item_handle(
    State(state): State<AppState>,
    Path(item_id): Path<uuid::Uuid>,
) -> Result<StatusCode, AppError> {
    BoardService::remove_item(&state.board, &state.store, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_section_handle(
    State(state): State<AppState>,
    Json(req): Json<CreateSectionRequest>,
) -> Result<(StatusCode, Json<Section>), AppError> {
    let section = BoardService::create_section(&state.board, &state.store, req).await?;
    Ok((StatusCode::CREATED, Json(section)))
}

pub async fn update_section_handle(
    State(state): State<AppState>,
    Path(section_id): Path<uuid::Uuid>,
    Json(req): Json<UpdateSectionRequest>,
) -> Result<Json<Section>, AppError> {
    let section =
        BoardService::update_section(&state.board, &state.store, section_id, req).await?;
    Ok(Json(section))
}

pub async fn delete_section_handle(
    State(state): State<AppState>,
    Path(section_id): Path<uuid::Uuid>,
) -> Result<StatusCode, AppError> {
    BoardService::remove_section(&state.board, &state.store, section_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_viewport_handle(
    State(state): State<AppState>,
    Json(req): Json<ViewportRequest>,
) -> Result<StatusCode, AppError> {
    BoardService::set_viewport(&state.board, &state.store, req).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn rename_board_handle(
    State(state): State<AppState>,
    Json(req): Json<RenameBoardRequest>,
) -> Result<StatusCode, AppError> {
    BoardService::rename(&state.board, &state.store, req).await?;
    Ok(StatusCode::NO_CONTENT)
}
