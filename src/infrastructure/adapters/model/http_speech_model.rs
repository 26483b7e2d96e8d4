//! HTTP Speech Model - 调用外部 TTS 模型服务
//!
//! 实现 SpeechModelPort trait，通过 OpenAI 兼容接口调用模型服务
//!
//! 外部 API:
//! POST {base_url}/v1/audio/speech
//! Request: {"model": "...", "input": "...", "voice": "...", ...}  (JSON)
//! Response: audio/wav binary

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    AudioCodecPort, SpeechModelPort, SynthesisError, SynthesisRequest,
};
use crate::domain::AudioBuffer;

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SpeechHttpRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    speed: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lang_code: Option<&'static str>,
    language: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    instruct: Option<&'a str>,
    response_format: &'static str,
}

/// HTTP 模型客户端配置
#[derive(Debug, Clone)]
pub struct HttpSpeechModelConfig {
    /// 模型服务基础 URL
    pub base_url: String,
    /// 模型 ID
    pub model_id: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 是否发送单字母语言代码（Kokoro）
    pub send_lang_code: bool,
}

impl Default for HttpSpeechModelConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8880".to_string(),
            model_id: String::new(),
            timeout_secs: 300,
            send_lang_code: false,
        }
    }
}

impl HttpSpeechModelConfig {
    pub fn new(base_url: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model_id: model_id.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_lang_code(mut self, send: bool) -> Self {
        self.send_lang_code = send;
        self
    }
}

/// HTTP 模型客户端
///
/// 返回的 WAV 通过 codec 解码为单声道缓冲区
pub struct HttpSpeechModel {
    client: Client,
    config: HttpSpeechModelConfig,
    codec: Arc<dyn AudioCodecPort>,
}

impl HttpSpeechModel {
    pub fn new(
        config: HttpSpeechModelConfig,
        codec: Arc<dyn AudioCodecPort>,
    ) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SynthesisError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            config,
            codec,
        })
    }

    fn speech_url(&self) -> String {
        format!("{}/v1/audio/speech", self.config.base_url)
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url)
    }
}

#[async_trait]
impl SpeechModelPort for HttpSpeechModel {
    async fn generate(
        &self,
        request: &SynthesisRequest,
    ) -> Result<Vec<AudioBuffer>, SynthesisError> {
        let params = &request.params;
        let body = SpeechHttpRequest {
            model: &self.config.model_id,
            input: &request.text,
            voice: params.voice.as_str(),
            speed: params.speed.map(|s| s.value()),
            lang_code: self
                .config
                .send_lang_code
                .then(|| params.language.lang_code()),
            language: params.language.name(),
            instruct: params.instruct.as_deref(),
            response_format: "wav",
        };

        tracing::debug!(
            url = %self.speech_url(),
            text_len = request.text.chars().count(),
            voice = %params.voice.as_str(),
            language = %params.language,
            "Sending speech request"
        );

        let response = self
            .client
            .post(self.speech_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SynthesisError::Timeout
                } else if e.is_connect() {
                    SynthesisError::NetworkError(format!("Cannot connect to model service: {}", e))
                } else {
                    SynthesisError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SynthesisError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SynthesisError::Timeout
                } else {
                    SynthesisError::InvalidResponse(format!("Failed to read audio: {}", e))
                }
            })?;

        let audio = self
            .codec
            .decode(&audio_data)
            .map_err(|e| SynthesisError::InvalidResponse(e.to_string()))?;

        tracing::debug!(
            audio_size = audio_data.len(),
            samples = audio.len(),
            sample_rate = audio.sample_rate(),
            "Speech request completed"
        );

        Ok(vec![audio])
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
