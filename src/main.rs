//! koe - 长文本 TTS 网关
//!
//! 启动流程：加载配置 → 初始化日志 → 为每个启用的服务构建 AppState →
//! 探测模型健康 → 各服务独立端口并发运行，收到信号后统一优雅关闭

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing_subscriber::prelude::*;
use tracing_subscriber::Layer;

use koe::application::{AudioCodecPort, AudioPlayerPort, SpeechModelPort};
use koe::config::{load_config, print_config, LogConfig, ModelBackend, ServiceConfig};
use koe::domain::voice::{ServiceKind, ServiceProfile};
use koe::domain::SegmentConfig;
use koe::infrastructure::adapters::{
    FakeSpeechModel, FakeSpeechModelConfig, HttpSpeechModel, HttpSpeechModelConfig,
    ProcessAudioPlayer, ProcessPlayerConfig, WavCodec,
};
use koe::infrastructure::http::{AppState, HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().context("Failed to load config")?;

    init_tracing(&config.log);

    tracing::info!("koe {} - 长文本 TTS 网关", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    // 所有服务共用的编解码器与播放器
    let codec: Arc<dyn AudioCodecPort> = Arc::new(WavCodec::new());
    let player: Arc<dyn AudioPlayerPort> = Arc::new(ProcessAudioPlayer::new(ProcessPlayerConfig {
        program: config.playback.program.clone(),
        args: config.playback.args.clone(),
        temp_dir: config.playback.temp_dir.clone(),
    }));

    let mut servers = Vec::new();
    for (kind, service) in config.enabled_services() {
        let model = build_model(kind, service, codec.clone())?;

        if !model.health_check().await {
            tracing::warn!(
                service = %kind,
                url = %service.model.url,
                "Model backend is not reachable yet; requests will fail until it is up"
            );
        }

        let profile = match kind {
            ServiceKind::Kokoro => ServiceProfile::kokoro(),
            ServiceKind::Qwen3 => ServiceProfile::qwen3(service.speakers.clone()),
        };
        let state = AppState::new(
            profile,
            model,
            SegmentConfig::from(&service.chunking),
            codec.clone(),
            player.clone(),
        );
        servers.push(HttpServer::new(
            ServerConfig::new(&config.server.host, service.port),
            state,
        ));
    }

    // 关闭信号广播给所有服务
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let shutdown_tx = Arc::new(shutdown_tx);

    let mut tasks = JoinSet::new();
    for server in servers {
        let mut rx = shutdown_rx.clone();
        tasks.spawn(server.run_with_shutdown(async move {
            let _ = rx.wait_for(|stop| *stop).await;
        }));
    }

    let signal_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = signal_tx.send(true);
    });

    // 任一服务异常退出时关闭其余服务
    let mut result = Ok(());
    while let Some(joined) = tasks.join_next().await {
        let outcome = joined
            .context("Server task panicked")
            .and_then(|r| r.context("Server failed"));
        if let Err(e) = outcome {
            tracing::error!(error = %e, "Server stopped with error");
            let _ = shutdown_tx.send(true);
            if result.is_ok() {
                result = Err(e);
            }
        }
    }

    tracing::info!("Server shutdown complete");
    result
}

/// 初始化日志：RUST_LOG 优先，其次 log.level；可选 JSON 输出
fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},koe={},tower_http=debug", log.level, log.level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    let fmt_layer = if log.json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn build_model(
    kind: ServiceKind,
    service: &ServiceConfig,
    codec: Arc<dyn AudioCodecPort>,
) -> anyhow::Result<Arc<dyn SpeechModelPort>> {
    let model = &service.model;
    Ok(match model.backend {
        ModelBackend::Http => {
            let http_config = HttpSpeechModelConfig::new(&model.url, &model.model_id)
                .with_timeout(model.timeout_secs)
                .with_lang_code(kind == ServiceKind::Kokoro);
            Arc::new(
                HttpSpeechModel::new(http_config, codec)
                    .with_context(|| format!("Failed to create {} model client", kind))?,
            )
        }
        ModelBackend::Fake => Arc::new(FakeSpeechModel::new(FakeSpeechModelConfig {
            sample_rate: model.sample_rate,
            ..Default::default()
        })),
    })
}

/// 等待 Ctrl+C 或 SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
