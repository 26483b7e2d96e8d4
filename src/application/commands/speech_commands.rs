//! Speech Commands - 合成 / 服务端播放命令

use crate::domain::AudioBuffer;

/// 合成命令（`/tts` 与 `/tts/stream-play` 共用）
///
/// 未提供的字段由服务档案补全默认值
#[derive(Debug, Clone, Default)]
pub struct SynthesizeSpeech {
    pub text: String,
    pub voice: Option<String>,
    pub language: Option<String>,
    pub speed: Option<f32>,
    pub instruct: Option<String>,
}

/// 合成统计
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisStats {
    /// 片段数
    pub chunks: usize,
    /// 音频时长（秒）
    pub audio_duration_secs: f64,
    /// 生成耗时（秒）
    pub generation_secs: f64,
    /// 实时率，音频时长为 0 时为 None
    pub rtf: Option<f64>,
}

/// 流水线产出：拼接后的音频 + 统计
#[derive(Debug, Clone)]
pub struct RenderedSpeech {
    pub audio: AudioBuffer,
    pub stats: SynthesisStats,
}

/// 合成响应
#[derive(Debug, Clone)]
pub struct SynthesizeSpeechResponse {
    /// WAV 字节
    pub wav_data: Vec<u8>,
    pub stats: SynthesisStats,
}

/// 服务端播放响应
#[derive(Debug, Clone)]
pub struct PlaySpeechResponse {
    pub stats: SynthesisStats,
    /// 等待播放器退出的耗时（秒）
    pub playback_secs: f64,
}
