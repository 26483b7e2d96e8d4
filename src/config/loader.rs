//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError as ConfigCrateError, Environment, File};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, ModelBackend, PlaybackConfig, ServiceConfig};
use crate::domain::voice::ServiceKind;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `KOE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `KOE_SERVER__HOST=127.0.0.1`
/// - `KOE_KOKORO__PORT=9001`
/// - `KOE_KOKORO__MODEL__URL=http://mlx-server:8880`
/// - `KOE_QWEN3__ENABLED=false`
/// - `KOE_QWEN3__SPEAKERS=Aiden,Vivian`（逗号分隔）
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder().set_default("server.host", "0.0.0.0")?;

    // 1. 默认值（最低优先级）
    builder = set_service_defaults(builder, "kokoro", &ServiceConfig::kokoro())?;
    builder = set_service_defaults(builder, "qwen3", &ServiceConfig::qwen3())?;
    builder = set_playback_defaults(builder, &PlaybackConfig::default())?;
    builder = builder
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 注意: 环境变量名会被转换为小写；列表字段以逗号分隔
    builder = builder.add_source(
        Environment::with_prefix("KOE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("qwen3.speakers")
            .with_list_parse_key("kokoro.speakers")
            .with_list_parse_key("playback.args"),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn set_service_defaults(
    builder: ConfigBuilder<DefaultState>,
    name: &str,
    service: &ServiceConfig,
) -> Result<ConfigBuilder<DefaultState>, ConfigCrateError> {
    let key = |field: &str| format!("{}.{}", name, field);

    builder
        .set_default(key("enabled"), service.enabled)?
        .set_default(key("port"), i64::from(service.port))?
        .set_default(key("model.backend"), service.model.backend.to_string())?
        .set_default(key("model.url"), service.model.url.clone())?
        .set_default(key("model.model_id"), service.model.model_id.clone())?
        .set_default(key("model.timeout_secs"), service.model.timeout_secs as i64)?
        .set_default(key("model.sample_rate"), i64::from(service.model.sample_rate))?
        .set_default(key("chunking.enabled"), service.chunking.enabled)?
        .set_default(key("chunking.gate_chars"), service.chunking.gate_chars as i64)?
        .set_default(key("chunking.max_chars"), service.chunking.max_chars as i64)?
        .set_default(key("speakers"), service.speakers.clone())
}

fn set_playback_defaults(
    builder: ConfigBuilder<DefaultState>,
    playback: &PlaybackConfig,
) -> Result<ConfigBuilder<DefaultState>, ConfigCrateError> {
    builder
        .set_default("playback.program", playback.program.clone())?
        .set_default("playback.args", playback.args.clone())
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let services = config.enabled_services();
    if services.is_empty() {
        return Err(ConfigError::ValidationError(
            "At least one service must be enabled".to_string(),
        ));
    }

    if config.server.host.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Server host cannot be empty".to_string(),
        ));
    }

    let mut ports = HashSet::new();
    for (kind, service) in &services {
        if service.port == 0 {
            return Err(ConfigError::ValidationError(format!(
                "{} port cannot be 0",
                kind
            )));
        }
        if !ports.insert(service.port) {
            return Err(ConfigError::ValidationError(format!(
                "Port {} is used by more than one service",
                service.port
            )));
        }

        let model = &service.model;
        if model.backend == ModelBackend::Http {
            if model.url.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{} model URL cannot be empty",
                    kind
                )));
            }
            if model.timeout_secs == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "{} model timeout cannot be 0",
                    kind
                )));
            }
        }
        // 采样率只用于 fake 后端，http 后端以模型返回的 WAV 为准
        if model.backend == ModelBackend::Fake && model.sample_rate == 0 {
            return Err(ConfigError::ValidationError(format!(
                "{} sample rate cannot be 0",
                kind
            )));
        }

        if *kind == ServiceKind::Qwen3 && service.speakers.is_empty() {
            return Err(ConfigError::ValidationError(
                "qwen3 speakers cannot be empty".to_string(),
            ));
        }

        let chunking = &service.chunking;
        if chunking.max_chars == 0 {
            return Err(ConfigError::ValidationError(format!(
                "{} chunking max_chars cannot be 0",
                kind
            )));
        }
        if chunking.gate_chars < chunking.max_chars {
            return Err(ConfigError::ValidationError(format!(
                "{} chunking gate_chars ({}) must be >= max_chars ({})",
                kind, chunking.gate_chars, chunking.max_chars
            )));
        }
    }

    if config.playback.program.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Playback program cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Host: {}", config.server.host);
    for (kind, service) in config.enabled_services() {
        tracing::info!(
            "[{}] port={} backend={} url={} model={}",
            kind,
            service.port,
            service.model.backend,
            service.model.url,
            service.model.model_id
        );
        if service.chunking.enabled {
            tracing::info!(
                "[{}] chunking: gate={} max={}",
                kind,
                service.chunking.gate_chars,
                service.chunking.max_chars
            );
        } else {
            tracing::info!("[{}] chunking: disabled", kind);
        }
    }
    tracing::info!(
        "Playback: {} {}",
        config.playback.program,
        config.playback.args.join(" ")
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
