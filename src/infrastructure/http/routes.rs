//! HTTP Routes
//!
//! API Endpoints:
//! - /                  GET   控制面板
//! - /ping              GET   健康检查
//! - /tts               POST  合成，返回 audio/wav
//! - /tts/stream-play   POST  服务端播放（仅 Kokoro）
//! - /voices            GET   按语言分组的音色（仅 Kokoro）
//! - /speakers          GET   说话人列表（仅 Qwen3）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;
use crate::domain::voice::ServiceKind;

/// 按服务类型创建路由
pub fn create_routes(kind: ServiceKind) -> Router<Arc<AppState>> {
    let common = Router::new()
        .route("/", get(handlers::index))
        .route("/ping", get(handlers::ping))
        .route("/tts", post(handlers::synthesize));

    match kind {
        ServiceKind::Kokoro => common
            .route("/tts/stream-play", post(handlers::stream_play))
            .route("/voices", get(handlers::list_voices)),
        ServiceKind::Qwen3 => common.route("/speakers", get(handlers::list_speakers)),
    }
}
