//! 应用层错误定义
//!
//! 三类失败：客户端输入无效 / 合成失败 / 播放失败，另加内部错误

use thiserror::Error;

use crate::application::ports::{CodecError, PlaybackError, SynthesisError};
use crate::domain::voice::VoiceError;
use crate::domain::StitchError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 合成失败（模型错误、空音频、采样率不一致）
    #[error("Synthesis error: {0}")]
    SynthesisError(String),

    /// 服务端播放失败
    #[error("Playback error: {0}")]
    PlaybackError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建合成错误
    pub fn synthesis(message: impl Into<String>) -> Self {
        Self::SynthesisError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<VoiceError> for ApplicationError {
    fn from(err: VoiceError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<SynthesisError> for ApplicationError {
    fn from(err: SynthesisError) -> Self {
        Self::SynthesisError(err.to_string())
    }
}

impl From<StitchError> for ApplicationError {
    fn from(err: StitchError) -> Self {
        Self::SynthesisError(err.to_string())
    }
}

impl From<PlaybackError> for ApplicationError {
    fn from(err: PlaybackError) -> Self {
        Self::PlaybackError(err.to_string())
    }
}

impl From<CodecError> for ApplicationError {
    fn from(err: CodecError) -> Self {
        Self::InternalError(err.to_string())
    }
}
