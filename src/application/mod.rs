//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SpeechModel、AudioCodec、AudioPlayer）
//! - commands: 合成 / 服务端播放命令及处理器
//! - queries: 音色目录查询
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{PlaySpeechHandler, SpeechPipeline, SynthesizeSpeechHandler},
    PlaySpeechResponse, RenderedSpeech, SynthesisStats, SynthesizeSpeech,
    SynthesizeSpeechResponse,
};

pub use error::ApplicationError;

pub use ports::{
    AudioCodecPort, AudioPlayerPort, CodecError, PlaybackError, SpeechModelPort, SynthesisError,
    SynthesisRequest,
};

pub use queries::{
    handlers::{ListVoicesHandler, VoiceListResponse},
    ListVoices,
};
