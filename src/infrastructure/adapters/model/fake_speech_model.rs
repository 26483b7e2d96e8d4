//! Fake Speech Model - 用于开发与测试的模型
//!
//! 不调用任何外部服务，按文本长度生成正弦音

use async_trait::async_trait;
use std::f32::consts::TAU;
use std::time::Duration;

use crate::application::ports::{SpeechModelPort, SynthesisError, SynthesisRequest};
use crate::domain::{AudioBuffer, DEFAULT_SAMPLE_RATE};

/// Fake Speech Model 配置
#[derive(Debug, Clone)]
pub struct FakeSpeechModelConfig {
    /// 采样率
    pub sample_rate: u32,
    /// 每个字符对应的音频时长（毫秒）
    pub millis_per_char: u32,
    /// 正弦频率（Hz）
    pub frequency: f32,
    /// 模拟推理延迟
    pub latency: Duration,
}

impl Default for FakeSpeechModelConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            millis_per_char: 80,
            frequency: 440.0,
            latency: Duration::from_millis(50),
        }
    }
}

/// Fake Speech Model
///
/// 时长与字符数成正比、与语速成反比
pub struct FakeSpeechModel {
    config: FakeSpeechModelConfig,
}

impl FakeSpeechModel {
    pub fn new(config: FakeSpeechModelConfig) -> Self {
        tracing::info!(
            sample_rate = config.sample_rate,
            millis_per_char = config.millis_per_char,
            "FakeSpeechModel initialized"
        );
        Self { config }
    }

    fn sample_count(&self, chars: usize, speed: f32) -> usize {
        let secs = chars as f64 * self.config.millis_per_char as f64 / 1000.0 / speed as f64;
        (secs * self.config.sample_rate as f64).round() as usize
    }
}

#[async_trait]
impl SpeechModelPort for FakeSpeechModel {
    async fn generate(
        &self,
        request: &SynthesisRequest,
    ) -> Result<Vec<AudioBuffer>, SynthesisError> {
        let speed = request.params.speed.map(|s| s.value()).unwrap_or(1.0);
        let count = self.sample_count(request.text.chars().count(), speed);

        tracing::debug!(
            text_len = request.text.chars().count(),
            samples = count,
            "FakeSpeechModel: generating tone"
        );

        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        let step = TAU * self.config.frequency / self.config.sample_rate as f32;
        let samples = (0..count).map(|i| 0.2 * (step * i as f32).sin()).collect();

        Ok(vec![AudioBuffer::new(samples, self.config.sample_rate)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::{Language, SpeechParams, Speed, VoiceName};

    fn model() -> FakeSpeechModel {
        FakeSpeechModel::new(FakeSpeechModelConfig {
            latency: Duration::ZERO,
            ..Default::default()
        })
    }

    fn request(text: &str, speed: Option<f32>) -> SynthesisRequest {
        SynthesisRequest {
            text: text.to_string(),
            params: SpeechParams {
                voice: VoiceName::new("jf_alpha").unwrap(),
                language: Language::Japanese,
                speed: speed.map(|s| Speed::new(s).unwrap()),
                instruct: None,
            },
        }
    }

    #[tokio::test]
    async fn test_duration_follows_text_length() {
        let audio = model().generate(&request("あいうえお", None)).await.unwrap();

        assert_eq!(audio.len(), 1);
        // 5 字 * 80ms = 0.4s
        assert!((audio[0].duration_secs() - 0.4).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_faster_speed_is_shorter() {
        let normal = model().generate(&request("テスト", None)).await.unwrap();
        let fast = model().generate(&request("テスト", Some(2.0))).await.unwrap();

        assert_eq!(fast[0].len() * 2, normal[0].len());
    }

    #[tokio::test]
    async fn test_samples_in_range() {
        let audio = model().generate(&request("abc", None)).await.unwrap();
        assert!(audio[0].samples().iter().all(|s| s.abs() <= 0.2 + f32::EPSILON));
    }
}
