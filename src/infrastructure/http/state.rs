//! Application State
//!
//! 每个服务一份：服务档案与各 Handler

use std::sync::Arc;

use crate::application::{
    AudioCodecPort, AudioPlayerPort, ListVoicesHandler, PlaySpeechHandler, SpeechModelPort,
    SpeechPipeline, SynthesizeSpeechHandler,
};
use crate::domain::voice::ServiceProfile;
use crate::domain::SegmentConfig;

/// 应用状态
pub struct AppState {
    // ========== Service ==========
    pub profile: Arc<ServiceProfile>,

    // ========== Command Handlers ==========
    pub synthesize_handler: SynthesizeSpeechHandler,
    pub play_handler: PlaySpeechHandler,

    // ========== Query Handlers ==========
    pub list_voices_handler: ListVoicesHandler,
}

impl AppState {
    /// 创建应用状态
    ///
    /// 合成与播放共用同一条流水线（同一把模型锁）
    pub fn new(
        profile: ServiceProfile,
        model: Arc<dyn SpeechModelPort>,
        segment_config: SegmentConfig,
        codec: Arc<dyn AudioCodecPort>,
        player: Arc<dyn AudioPlayerPort>,
    ) -> Self {
        let profile = Arc::new(profile);
        let pipeline = Arc::new(SpeechPipeline::new(
            profile.clone(),
            model,
            segment_config,
        ));

        Self {
            profile: profile.clone(),

            synthesize_handler: SynthesizeSpeechHandler::new(pipeline.clone(), codec.clone()),
            play_handler: PlaySpeechHandler::new(pipeline, codec, player),

            list_voices_handler: ListVoicesHandler::new(profile),
        }
    }
}
