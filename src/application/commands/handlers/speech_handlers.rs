//! Speech Command Handlers

use std::sync::Arc;
use std::time::Instant;

use super::speech_pipeline::SpeechPipeline;
use crate::application::commands::speech_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{AudioCodecPort, AudioPlayerPort};

/// SynthesizeSpeech Handler - 合成并返回 WAV
pub struct SynthesizeSpeechHandler {
    pipeline: Arc<SpeechPipeline>,
    codec: Arc<dyn AudioCodecPort>,
}

impl SynthesizeSpeechHandler {
    pub fn new(pipeline: Arc<SpeechPipeline>, codec: Arc<dyn AudioCodecPort>) -> Self {
        Self { pipeline, codec }
    }

    pub async fn handle(
        &self,
        cmd: SynthesizeSpeech,
    ) -> Result<SynthesizeSpeechResponse, ApplicationError> {
        let rendered = self.pipeline.render(cmd).await?;
        let wav_data = self.codec.encode_wav(&rendered.audio)?;

        Ok(SynthesizeSpeechResponse {
            wav_data,
            stats: rendered.stats,
        })
    }
}

/// PlaySpeech Handler - 合成后在服务端播放
pub struct PlaySpeechHandler {
    pipeline: Arc<SpeechPipeline>,
    codec: Arc<dyn AudioCodecPort>,
    player: Arc<dyn AudioPlayerPort>,
}

impl PlaySpeechHandler {
    pub fn new(
        pipeline: Arc<SpeechPipeline>,
        codec: Arc<dyn AudioCodecPort>,
        player: Arc<dyn AudioPlayerPort>,
    ) -> Self {
        Self {
            pipeline,
            codec,
            player,
        }
    }

    pub async fn handle(&self, cmd: SynthesizeSpeech) -> Result<PlaySpeechResponse, ApplicationError> {
        if !self.pipeline.profile().supports_stream_play() {
            return Err(ApplicationError::validation(format!(
                "Server playback is not available for {}",
                self.pipeline.profile().kind()
            )));
        }

        let rendered = self.pipeline.render(cmd).await?;
        let wav_data = self.codec.encode_wav(&rendered.audio)?;

        let started = Instant::now();
        self.player.play(&wav_data).await.map_err(|e| {
            tracing::error!(error = %e, "Server playback failed");
            ApplicationError::from(e)
        })?;
        let playback_secs = started.elapsed().as_secs_f64();

        tracing::info!(
            chunks = rendered.stats.chunks,
            playback_time = playback_secs,
            "Server playback finished"
        );

        Ok(PlaySpeechResponse {
            stats: rendered.stats,
            playback_secs,
        })
    }
}
