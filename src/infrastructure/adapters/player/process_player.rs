//! Process Audio Player - 调用外部播放器进程
//!
//! 写入临时 WAV 文件后执行 `<program> <args…> <file>`，等待进程退出

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tokio::sync::Mutex;

use crate::application::ports::{AudioPlayerPort, PlaybackError};

/// 播放器配置
#[derive(Debug, Clone)]
pub struct ProcessPlayerConfig {
    /// 播放器程序
    pub program: String,
    /// 文件路径之前的参数
    pub args: Vec<String>,
    /// 临时文件目录，None 时使用系统临时目录
    pub temp_dir: Option<PathBuf>,
}

impl Default for ProcessPlayerConfig {
    fn default() -> Self {
        Self {
            program: "mpv".to_string(),
            args: vec!["--no-video".to_string(), "--really-quiet".to_string()],
            temp_dir: None,
        }
    }
}

/// 外部进程播放器
///
/// 同一时间只播放一段音频
pub struct ProcessAudioPlayer {
    config: ProcessPlayerConfig,
    lock: Mutex<()>,
}

impl ProcessAudioPlayer {
    pub fn new(config: ProcessPlayerConfig) -> Self {
        Self {
            config,
            lock: Mutex::new(()),
        }
    }

    fn temp_file(&self) -> std::io::Result<tempfile::NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("koe-play-").suffix(".wav");
        match &self.config.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
    }
}

#[async_trait]
impl AudioPlayerPort for ProcessAudioPlayer {
    async fn play(&self, wav_data: &[u8]) -> Result<(), PlaybackError> {
        let _guard = self.lock.lock().await;

        // NamedTempFile drop 时删除文件
        let temp = self
            .temp_file()
            .map_err(|e| PlaybackError::IoError(format!("Failed to create temp file: {}", e)))?;
        tokio::fs::write(temp.path(), wav_data)
            .await
            .map_err(|e| PlaybackError::IoError(format!("Failed to write temp file: {}", e)))?;

        tracing::debug!(
            program = %self.config.program,
            path = %temp.path().display(),
            bytes = wav_data.len(),
            "Starting playback"
        );

        let status = Command::new(&self.config.program)
            .args(&self.config.args)
            .arg(temp.path())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| PlaybackError::LaunchFailed {
                program: self.config.program.clone(),
                message: e.to_string(),
            })?;

        if !status.success() {
            return Err(PlaybackError::PlayerFailed {
                program: self.config.program.clone(),
                status: status.to_string(),
            });
        }

        Ok(())
    }
}
