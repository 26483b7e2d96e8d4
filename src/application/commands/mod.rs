//! 应用层 - 命令
//!
//! 合成 / 服务端播放

mod speech_commands;

pub mod handlers;

pub use speech_commands::*;
