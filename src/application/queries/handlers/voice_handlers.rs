//! Voice Query Handlers

use std::sync::Arc;

use crate::application::queries::ListVoices;
use crate::domain::voice::{ServiceProfile, VoiceCatalog};

/// 音色列表响应
#[derive(Debug, Clone)]
pub struct VoiceListResponse {
    pub catalog: VoiceCatalog,
}

/// ListVoices Handler
pub struct ListVoicesHandler {
    profile: Arc<ServiceProfile>,
}

impl ListVoicesHandler {
    pub fn new(profile: Arc<ServiceProfile>) -> Self {
        Self { profile }
    }

    pub fn handle(&self, _query: ListVoices) -> VoiceListResponse {
        VoiceListResponse {
            catalog: self.profile.catalog().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_kokoro_voices() {
        let handler = ListVoicesHandler::new(Arc::new(ServiceProfile::kokoro()));
        let response = handler.handle(ListVoices);
        assert_eq!(response.catalog.len(), 14);
        assert!(matches!(response.catalog, VoiceCatalog::ByLanguage(_)));
    }

    #[test]
    fn test_list_configured_speakers() {
        let profile = ServiceProfile::qwen3(vec!["Aiden".to_string(), "Vivian".to_string()]);
        let handler = ListVoicesHandler::new(Arc::new(profile));
        let response = handler.handle(ListVoices);
        assert_eq!(
            response.catalog,
            VoiceCatalog::Speakers(vec!["Aiden".to_string(), "Vivian".to_string()])
        );
    }
}
