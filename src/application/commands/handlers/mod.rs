//! Command Handlers 实现

mod speech_handlers;
mod speech_pipeline;

pub use speech_handlers::*;
pub use speech_pipeline::SpeechPipeline;
