//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::voice::{ServiceKind, DEFAULT_QWEN3_SPEAKERS};
use crate::domain::{SegmentConfig, DEFAULT_GATE_CHARS, DEFAULT_MAX_CHARS, DEFAULT_SAMPLE_RATE};

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,

    /// Kokoro 服务
    pub kokoro: ServiceConfig,

    /// Qwen3 服务
    pub qwen3: ServiceConfig,

    /// 服务端播放
    pub playback: PlaybackConfig,

    /// 日志配置
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            kokoro: ServiceConfig::kokoro(),
            qwen3: ServiceConfig::qwen3(),
            playback: PlaybackConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// 已启用的服务及其配置
    pub fn enabled_services(&self) -> Vec<(ServiceKind, &ServiceConfig)> {
        let mut services = Vec::new();
        if self.kokoro.enabled {
            services.push((ServiceKind::Kokoro, &self.kokoro));
        }
        if self.qwen3.enabled {
            services.push((ServiceKind::Qwen3, &self.qwen3));
        }
        services
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址（所有服务共用）
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
        }
    }
}

/// 单个服务的配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// 是否启动该服务
    pub enabled: bool,

    /// 监听端口
    pub port: u16,

    /// 模型后端
    pub model: ModelConfig,

    /// 长文本分割
    pub chunking: ChunkingConfig,

    /// 说话人列表（仅 Qwen3 使用）
    #[serde(default)]
    pub speakers: Vec<String>,
}

impl ServiceConfig {
    /// Kokoro 默认值
    pub fn kokoro() -> Self {
        Self {
            enabled: true,
            port: 8001,
            model: ModelConfig {
                model_id: "mlx-community/Kokoro-82M-bf16".to_string(),
                ..Default::default()
            },
            chunking: ChunkingConfig::default(),
            speakers: Vec::new(),
        }
    }

    /// Qwen3 默认值（不分割）
    pub fn qwen3() -> Self {
        Self {
            enabled: true,
            port: 8000,
            model: ModelConfig {
                model_id: "mlx-community/Qwen3-TTS-12Hz-1.7B-CustomVoice-bf16".to_string(),
                ..Default::default()
            },
            chunking: ChunkingConfig {
                enabled: false,
                ..Default::default()
            },
            speakers: DEFAULT_QWEN3_SPEAKERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// 模型后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelBackend {
    /// OpenAI 兼容的 HTTP 模型服务
    #[default]
    Http,
    /// 本地正弦音（开发 / 测试）
    Fake,
}

impl std::fmt::Display for ModelBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Fake => write!(f, "fake"),
        }
    }
}

/// 模型配置
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    pub backend: ModelBackend,

    /// 模型服务基础 URL
    pub url: String,

    /// 模型 ID
    pub model_id: String,

    /// 请求超时时间（秒）
    pub timeout_secs: u64,

    /// fake 后端输出采样率
    pub sample_rate: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            backend: ModelBackend::Http,
            url: "http://localhost:8880".to_string(),
            model_id: String::new(),
            timeout_secs: 300,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

/// 分割配置
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingConfig {
    pub enabled: bool,

    /// 超过该字符数才分割
    pub gate_chars: usize,

    /// 单片段目标字符数
    pub max_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            gate_chars: DEFAULT_GATE_CHARS,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl From<&ChunkingConfig> for SegmentConfig {
    fn from(config: &ChunkingConfig) -> Self {
        Self {
            enabled: config.enabled,
            gate_chars: config.gate_chars,
            max_chars: config.max_chars,
        }
    }
}

/// 服务端播放配置
#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackConfig {
    /// 播放器程序
    pub program: String,

    /// 文件路径前的参数
    pub args: Vec<String>,

    /// 临时文件目录，未设置时使用系统临时目录
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            program: "mpv".to_string(),
            args: vec!["--no-video".to_string(), "--really-quiet".to_string()],
            temp_dir: None,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    pub level: String,

    /// 是否启用 JSON 格式
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.kokoro.port, 8001);
        assert_eq!(config.qwen3.port, 8000);
        assert!(config.kokoro.chunking.enabled);
        assert!(!config.qwen3.chunking.enabled);
        assert_eq!(config.qwen3.speakers.len(), 9);
        assert_eq!(config.playback.program, "mpv");
    }

    #[test]
    fn test_enabled_services() {
        let mut config = AppConfig::default();
        assert_eq!(config.enabled_services().len(), 2);

        config.kokoro.enabled = false;
        let services = config.enabled_services();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].0, ServiceKind::Qwen3);
    }

    #[test]
    fn test_segment_config_from_chunking() {
        let segment = SegmentConfig::from(&ChunkingConfig::default());
        assert!(segment.enabled);
        assert_eq!(segment.gate_chars, 120);
        assert_eq!(segment.max_chars, 100);
    }
}
