//! TTS HTTP Handlers

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::application::SynthesizeSpeech;
use crate::infrastructure::http::dto::{PlayResponse, TtsRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub const HEADER_GENERATION_TIME: &str = "X-Generation-Time";
pub const HEADER_AUDIO_DURATION: &str = "X-Audio-Duration";
pub const HEADER_RTF: &str = "X-RTF";
pub const HEADER_CHUNK_COUNT: &str = "X-Chunk-Count";

/// 合成并返回 WAV
///
/// 合成在独立任务中执行，客户端断开不会中断进行中的请求
pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TtsRequest>,
) -> Result<Response, ApiError> {
    let cmd = SynthesizeSpeech::from(req);
    let task_state = state.clone();
    let result =
        tokio::spawn(async move { task_state.synthesize_handler.handle(cmd).await }).await??;

    let stats = result.stats;
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/wav")
        .header(HEADER_GENERATION_TIME, format!("{:.2}", stats.generation_secs))
        .header(HEADER_AUDIO_DURATION, format!("{:.2}", stats.audio_duration_secs))
        .header(HEADER_CHUNK_COUNT, stats.chunks.to_string());
    if let Some(rtf) = stats.rtf {
        builder = builder.header(HEADER_RTF, format!("{:.3}", rtf));
    }

    builder
        .body(Body::from(result.wav_data))
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}

/// 合成后在服务端播放，播放结束后返回统计
pub async fn stream_play(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TtsRequest>,
) -> Result<Json<PlayResponse>, ApiError> {
    let cmd = SynthesizeSpeech::from(req);
    let task_state = state.clone();
    let result = tokio::spawn(async move { task_state.play_handler.handle(cmd).await }).await??;

    Ok(Json(PlayResponse::from(result)))
}
