//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 语言与分隔符集合
//! - 服务档案（默认参数、支持语言）
//! - 音色 / 说话人目录

mod catalog;
mod errors;
mod value_objects;

pub use catalog::{
    ServiceKind, ServiceProfile, VoiceCatalog, DEFAULT_QWEN3_INSTRUCT, DEFAULT_QWEN3_SPEAKERS,
};
pub use errors::VoiceError;
pub use value_objects::{Language, Speed, SpeechParams, VoiceName};
