//! Voice Queries

/// 列出服务支持的音色 / 说话人
#[derive(Debug, Clone)]
pub struct ListVoices;
