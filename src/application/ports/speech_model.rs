//! Speech Model Port - 语音合成模型抽象
//!
//! 定义语音合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::voice::SpeechParams;
use crate::domain::AudioBuffer;

/// 合成错误
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 单次合成请求（一个片段）
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// 要合成的片段文本
    pub text: String,
    /// 合成参数（同一请求的所有片段相同）
    pub params: SpeechParams,
}

/// Speech Model Port
///
/// 模型实例不可重入，调用方负责串行化
#[async_trait]
pub trait SpeechModelPort: Send + Sync {
    /// 合成一个片段，返回一个或多个音频结果（按顺序）
    async fn generate(&self, request: &SynthesisRequest) -> Result<Vec<AudioBuffer>, SynthesisError>;

    /// 检查模型后端是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
