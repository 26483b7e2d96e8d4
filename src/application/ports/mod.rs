//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_codec;
mod audio_player;
mod speech_model;

pub use audio_codec::{AudioCodecPort, CodecError};
pub use audio_player::{AudioPlayerPort, PlaybackError};
pub use speech_model::{SpeechModelPort, SynthesisError, SynthesisRequest};
