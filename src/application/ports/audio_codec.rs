//! Audio Codec Port - 音频编解码抽象
//!
//! WAV 编码（响应 / 播放）与模型返回音频的解码

use thiserror::Error;

use crate::domain::AudioBuffer;

/// 编解码错误
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),
}

/// Audio Codec Port
pub trait AudioCodecPort: Send + Sync {
    /// 将单声道缓冲区编码为 WAV 字节
    fn encode_wav(&self, audio: &AudioBuffer) -> Result<Vec<u8>, CodecError>;

    /// 解码音频字节为单声道缓冲区（多声道会被混缩）
    fn decode(&self, data: &[u8]) -> Result<AudioBuffer, CodecError>;
}
