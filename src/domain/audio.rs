//! 音频缓冲区与拼接
//!
//! 每个片段合成得到一个 `AudioBuffer`，按片段顺序原样拼接：
//! 不重采样、不交叉淡化、不插入静音。

use std::time::Duration;

use thiserror::Error;

/// 默认采样率（Hz）
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;

/// 拼接错误
#[derive(Debug, Error, PartialEq)]
pub enum StitchError {
    #[error("没有可拼接的音频")]
    Empty,

    #[error("采样率不一致: 期望 {expected} Hz, 实际 {actual} Hz")]
    SampleRateMismatch { expected: u32, actual: u32 },
}

/// 单声道 PCM 音频缓冲区
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 音频时长（秒）
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// 按顺序拼接音频缓冲区
///
/// 采样率取第一个缓冲区的值并原样沿用，任一缓冲区不一致即报错。
pub fn stitch(buffers: Vec<AudioBuffer>) -> Result<AudioBuffer, StitchError> {
    let sample_rate = buffers.first().ok_or(StitchError::Empty)?.sample_rate;

    let total: usize = buffers.iter().map(AudioBuffer::len).sum();
    let mut samples = Vec::with_capacity(total);

    for buffer in buffers {
        if buffer.sample_rate != sample_rate {
            return Err(StitchError::SampleRateMismatch {
                expected: sample_rate,
                actual: buffer.sample_rate,
            });
        }
        samples.extend(buffer.samples);
    }

    Ok(AudioBuffer::new(samples, sample_rate))
}

/// 实时率 (RTF) = 生成耗时 / 音频时长
///
/// 音频时长为 0 时返回 None
pub fn real_time_factor(elapsed: Duration, audio_duration_secs: f64) -> Option<f64> {
    if audio_duration_secs <= 0.0 {
        return None;
    }
    Some(elapsed.as_secs_f64() / audio_duration_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(samples: &[f32]) -> AudioBuffer {
        AudioBuffer::new(samples.to_vec(), DEFAULT_SAMPLE_RATE)
    }

    #[test]
    fn test_stitch_concatenates_in_order() {
        let a = buffer(&[0.1, 0.2]);
        let b = buffer(&[0.3]);
        let c = buffer(&[0.4, 0.5, 0.6]);
        let expected_len = a.len() + b.len() + c.len();

        let stitched = stitch(vec![a, b, c]).unwrap();

        assert_eq!(stitched.len(), expected_len);
        assert_eq!(stitched.samples(), &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        assert_eq!(stitched.sample_rate(), DEFAULT_SAMPLE_RATE);
    }

    #[test]
    fn test_stitch_keeps_empty_buffers_neutral() {
        let stitched = stitch(vec![buffer(&[]), buffer(&[0.5]), buffer(&[])]).unwrap();
        assert_eq!(stitched.samples(), &[0.5]);
    }

    #[test]
    fn test_stitch_carries_sample_rate() {
        let stitched = stitch(vec![AudioBuffer::new(vec![0.0; 10], 16_000)]).unwrap();
        assert_eq!(stitched.sample_rate(), 16_000);
    }

    #[test]
    fn test_stitch_rejects_empty_list() {
        assert_eq!(stitch(Vec::new()), Err(StitchError::Empty));
    }

    #[test]
    fn test_stitch_rejects_mismatched_rates() {
        let result = stitch(vec![
            AudioBuffer::new(vec![0.0], 24_000),
            AudioBuffer::new(vec![0.0], 22_050),
        ]);
        assert_eq!(
            result,
            Err(StitchError::SampleRateMismatch {
                expected: 24_000,
                actual: 22_050
            })
        );
    }

    #[test]
    fn test_duration_secs() {
        let audio = AudioBuffer::new(vec![0.0; 36_000], 24_000);
        assert!((audio.duration_secs() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_real_time_factor() {
        let rtf = real_time_factor(Duration::from_millis(500), 2.0).unwrap();
        assert!((rtf - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_real_time_factor_zero_duration() {
        assert_eq!(real_time_factor(Duration::from_secs(1), 0.0), None);
    }
}
