//! Voice Catalog HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::ListVoices;
use crate::infrastructure::http::dto::{SpeakersResponse, VoicesResponse};
use crate::infrastructure::http::state::AppState;

/// 按语言分组的音色列表
pub async fn list_voices(State(state): State<Arc<AppState>>) -> Json<VoicesResponse> {
    let response = state.list_voices_handler.handle(ListVoices);
    Json(VoicesResponse {
        voices: response.catalog,
    })
}

/// 说话人列表
pub async fn list_speakers(State(state): State<Arc<AppState>>) -> Json<SpeakersResponse> {
    let response = state.list_voices_handler.handle(ListVoices);
    Json(SpeakersResponse {
        speakers: response.catalog,
    })
}
