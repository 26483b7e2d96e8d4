//! Domain Layer - 领域层
//!
//! - Voice Context: 语言、音色目录、服务档案
//! - 文本分割器：长文本按句读切分
//! - 音频：缓冲区拼接与实时率

pub mod audio;
pub mod voice;

mod text_segmenter;

pub use audio::{real_time_factor, stitch, AudioBuffer, StitchError, DEFAULT_SAMPLE_RATE};
pub use text_segmenter::{
    segment, segment_text, SegmentConfig, DEFAULT_GATE_CHARS, DEFAULT_MAX_CHARS,
};
