//! 控制面板页面

use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::domain::voice::ServiceKind;
use crate::infrastructure::http::state::AppState;

const KOKORO_PAGE: &str = include_str!("../assets/kokoro.html");
const QWEN3_PAGE: &str = include_str!("../assets/qwen3.html");

pub async fn index(State(state): State<Arc<AppState>>) -> Html<&'static str> {
    Html(match state.profile.kind() {
        ServiceKind::Kokoro => KOKORO_PAGE,
        ServiceKind::Qwen3 => QWEN3_PAGE,
    })
}
