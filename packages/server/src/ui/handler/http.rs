//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::http::{ChannelDetailDto, ChannelSummaryDto},
    ui::state::AppState,
    usecase::GetChannelDetailError,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of channels
pub async fn get_channels(State(state): State<Arc<AppState>>) -> Json<Vec<ChannelSummaryDto>> {
    let channels = state.get_channels_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(channels.iter().map(ChannelSummaryDto::from).collect())
}

/// Get channel detail by ID
pub async fn get_channel_detail(
    State(state): State<Arc<AppState>>,
    Path(channel_id): Path<String>,
) -> Result<Json<ChannelDetailDto>, StatusCode> {
    match state.get_channel_detail_usecase.execute(channel_id).await {
        Ok(channel) => Ok(Json(channel.into())),
        Err(GetChannelDetailError::ChannelNotFound(id)) => {
            tracing::debug!("Channel '{}' not found", id);
            Err(StatusCode::NOT_FOUND)
        }
    }
}
