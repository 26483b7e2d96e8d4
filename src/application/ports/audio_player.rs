//! Audio Player Port - 服务端播放抽象

use async_trait::async_trait;
use thiserror::Error;

/// 播放错误
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Failed to launch player {program}: {message}")]
    LaunchFailed { program: String, message: String },

    #[error("Player {program} exited with {status}")]
    PlayerFailed { program: String, status: String },
}

/// Audio Player Port
///
/// 阻塞直到播放结束；实现方保证临时文件在任何路径下都被删除
#[async_trait]
pub trait AudioPlayerPort: Send + Sync {
    async fn play(&self, wav_data: &[u8]) -> Result<(), PlaybackError>;
}
