//! Voice Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("无效的音色名称: {0}")]
    InvalidName(String),

    #[error("不支持的语言: {0}")]
    UnsupportedLanguage(String),

    #[error("语速必须在 0.5 到 2.0 之间: {0}")]
    InvalidSpeed(f32),
}
