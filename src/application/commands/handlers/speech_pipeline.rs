//! Speech Pipeline - 分段 → 逐段合成 → 拼接
//!
//! 每个服务持有一个模型实例和一把锁：请求之间串行，请求内部逐段顺序合成。

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::application::commands::speech_commands::{RenderedSpeech, SynthesisStats, SynthesizeSpeech};
use crate::application::error::ApplicationError;
use crate::application::ports::{SpeechModelPort, SynthesisRequest};
use crate::domain::voice::ServiceProfile;
use crate::domain::{real_time_factor, segment_text, stitch, SegmentConfig};

/// 合成流水线
pub struct SpeechPipeline {
    profile: Arc<ServiceProfile>,
    model: Arc<dyn SpeechModelPort>,
    segment_config: SegmentConfig,
    /// 模型不可重入，整个请求的分段循环持有该锁
    model_lock: Mutex<()>,
}

impl SpeechPipeline {
    pub fn new(
        profile: Arc<ServiceProfile>,
        model: Arc<dyn SpeechModelPort>,
        segment_config: SegmentConfig,
    ) -> Self {
        Self {
            profile,
            model,
            segment_config,
            model_lock: Mutex::new(()),
        }
    }

    pub fn profile(&self) -> &ServiceProfile {
        &self.profile
    }

    /// 执行一次完整合成
    ///
    /// 任一片段失败即整体失败，不返回部分音频
    pub async fn render(&self, cmd: SynthesizeSpeech) -> Result<RenderedSpeech, ApplicationError> {
        if cmd.text.trim().is_empty() {
            return Err(ApplicationError::validation("Text cannot be empty"));
        }

        let params = self
            .profile
            .resolve(cmd.voice, cmd.language, cmd.speed, cmd.instruct)?;

        let request_id = Uuid::new_v4();
        let segments = segment_text(&cmd.text, params.language, &self.segment_config);

        tracing::info!(
            request_id = %request_id,
            service = %self.profile.kind(),
            voice = %params.voice,
            language = %params.language,
            text_chars = cmd.text.chars().count(),
            chunks = segments.len(),
            "Synthesizing speech"
        );

        let _guard = self.model_lock.lock().await;
        let started = Instant::now();

        let mut buffers = Vec::with_capacity(segments.len());
        for (index, text) in segments.iter().enumerate() {
            let request = SynthesisRequest {
                text: text.clone(),
                params: params.clone(),
            };

            let results = self.model.generate(&request).await.map_err(|e| {
                tracing::error!(
                    request_id = %request_id,
                    chunk = index,
                    error = %e,
                    "Chunk synthesis failed"
                );
                ApplicationError::from(e)
            })?;

            let audio = stitch(results)?;
            tracing::debug!(
                request_id = %request_id,
                chunk = index,
                chunk_chars = text.chars().count(),
                samples = audio.len(),
                "Chunk synthesized"
            );
            buffers.push(audio);
        }

        let audio = stitch(buffers)?;
        let elapsed = started.elapsed();
        drop(_guard);

        if audio.is_empty() {
            return Err(ApplicationError::synthesis("Model returned empty audio"));
        }

        let audio_duration_secs = audio.duration_secs();
        let stats = SynthesisStats {
            chunks: segments.len(),
            audio_duration_secs,
            generation_secs: elapsed.as_secs_f64(),
            rtf: real_time_factor(elapsed, audio_duration_secs),
        };

        tracing::info!(
            request_id = %request_id,
            chunks = stats.chunks,
            audio_duration = stats.audio_duration_secs,
            generation_time = stats.generation_secs,
            rtf = ?stats.rtf,
            "Speech synthesized"
        );

        Ok(RenderedSpeech { audio, stats })
    }
}
