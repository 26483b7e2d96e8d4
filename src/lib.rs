//! koe - 长文本 TTS 网关
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 语言、音色目录、服务档案
//! - 文本分割器与音频拼接
//!
//! 应用层 (application/):
//! - Ports: SpeechModel, AudioCodec, AudioPlayer
//! - Commands: 合成 / 服务端播放
//! - Queries: 音色目录
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 每个服务一个 Router（/tts、/tts/stream-play、/voices、/speakers、/）
//! - Adapters: HTTP / Fake 模型、WAV 编解码、外部播放器

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
