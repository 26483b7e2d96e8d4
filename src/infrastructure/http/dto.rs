//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{PlaySpeechResponse, SynthesizeSpeech};
use crate::domain::voice::VoiceCatalog;

/// 保留指定小数位
fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

// ============================================================================
// TTS DTOs
// ============================================================================

/// `/tts` 与 `/tts/stream-play` 请求体
///
/// Qwen3 客户端发送 `speaker`，Kokoro 客户端发送 `voice`
#[derive(Debug, Deserialize)]
pub struct TtsRequest {
    pub text: String,
    #[serde(default, alias = "speaker")]
    pub voice: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub speed: Option<f32>,
    #[serde(default)]
    pub instruct: Option<String>,
}

impl From<TtsRequest> for SynthesizeSpeech {
    fn from(req: TtsRequest) -> Self {
        Self {
            text: req.text,
            voice: req.voice,
            language: req.language,
            speed: req.speed,
            instruct: req.instruct,
        }
    }
}

/// 服务端播放结果
#[derive(Debug, Serialize)]
pub struct PlayResponse {
    pub status: &'static str,
    pub chunks: usize,
    pub audio_duration: f64,
    pub generation_time: f64,
    pub playback_time: f64,
    pub rtf: Option<f64>,
}

impl From<PlaySpeechResponse> for PlayResponse {
    fn from(resp: PlaySpeechResponse) -> Self {
        let stats = resp.stats;
        Self {
            status: "ok",
            chunks: stats.chunks,
            audio_duration: round_to(stats.audio_duration_secs, 2),
            generation_time: round_to(stats.generation_secs, 2),
            playback_time: round_to(resp.playback_secs, 2),
            rtf: stats.rtf.map(|r| round_to(r, 3)),
        }
    }
}

// ============================================================================
// Catalog DTOs
// ============================================================================

/// `GET /voices`
#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: VoiceCatalog,
}

/// `GET /speakers`
#[derive(Debug, Serialize)]
pub struct SpeakersResponse {
    pub speakers: VoiceCatalog,
}
