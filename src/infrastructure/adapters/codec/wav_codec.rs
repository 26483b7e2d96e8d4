//! WAV Codec - 基于 symphonia 的音频编解码器
//!
//! 支持：
//! - 模型返回音频的解码（多声道混缩为单声道）
//! - 单声道 f32 → 16 位 PCM WAV 编码

use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioCodecPort, CodecError};
use crate::domain::AudioBuffer;

const BITS_PER_SAMPLE: u16 = 16;

/// WAV 编解码器
#[derive(Debug, Default, Clone, Copy)]
pub struct WavCodec;

impl WavCodec {
    pub fn new() -> Self {
        Self
    }

    /// 使用 symphonia 解码为交错 f32 样本
    fn decode_interleaved(&self, data: &[u8]) -> Result<(Vec<f32>, u32, usize), CodecError> {
        let cursor = Cursor::new(data.to_vec());
        let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

        let mut hint = Hint::new();
        hint.with_extension("wav");

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| CodecError::DecodingError(format!("Probe failed: {}", e)))?;

        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| CodecError::DecodingError("No audio track found".to_string()))?;

        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| CodecError::DecodingError("Unknown sample rate".to_string()))?;

        let channels = track
            .codec_params
            .channels
            .map(|c| c.count())
            .ok_or_else(|| CodecError::DecodingError("Unknown channel count".to_string()))?;

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| CodecError::DecodingError(format!("Decoder creation failed: {}", e)))?;

        let track_id = track.id;
        let mut samples: Vec<f32> = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                Err(symphonia::core::errors::Error::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => {
                    return Err(CodecError::DecodingError(format!(
                        "Packet read error: {}",
                        e
                    )));
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!("Decode error (skipping packet): {}", e);
                    continue;
                }
            };

            let spec = *decoded.spec();
            let num_frames = decoded.frames();
            let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
            sample_buf.copy_interleaved_ref(decoded);
            let actual_samples = num_frames * spec.channels.count();
            samples.extend(&sample_buf.samples()[..actual_samples]);
        }

        Ok((samples, sample_rate, channels))
    }
}

/// 交错多声道混缩为单声道（取平均）
fn downmix(samples: Vec<f32>, channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples;
    }
    samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

impl AudioCodecPort for WavCodec {
    fn encode_wav(&self, audio: &AudioBuffer) -> Result<Vec<u8>, CodecError> {
        let sample_rate = audio.sample_rate();
        if sample_rate == 0 {
            return Err(CodecError::InvalidInput("Sample rate cannot be 0".to_string()));
        }

        let num_channels: u16 = 1;
        let bytes_per_sample = (BITS_PER_SAMPLE / 8) as u32;
        let byte_rate = sample_rate * num_channels as u32 * bytes_per_sample;
        let block_align = num_channels * (BITS_PER_SAMPLE / 8);

        let data_size = audio.len() * bytes_per_sample as usize;
        let data_size_u32 = u32::try_from(data_size)
            .ok()
            .filter(|size| size.checked_add(36).is_some())
            .ok_or_else(|| CodecError::EncodingError("Audio too long for WAV".to_string()))?;

        let mut wav = Vec::with_capacity(44 + data_size);

        // RIFF header
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(36 + data_size_u32).to_le_bytes());
        wav.extend_from_slice(b"WAVE");

        // fmt chunk
        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes()); // chunk size
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM format
        wav.extend_from_slice(&num_channels.to_le_bytes());
        wav.extend_from_slice(&sample_rate.to_le_bytes());
        wav.extend_from_slice(&byte_rate.to_le_bytes());
        wav.extend_from_slice(&block_align.to_le_bytes());
        wav.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

        // data chunk
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&data_size_u32.to_le_bytes());

        for &sample in audio.samples() {
            let clamped = sample.clamp(-1.0, 1.0);
            wav.extend_from_slice(&((clamped * 32767.0) as i16).to_le_bytes());
        }

        Ok(wav)
    }

    fn decode(&self, data: &[u8]) -> Result<AudioBuffer, CodecError> {
        if data.is_empty() {
            return Err(CodecError::InvalidInput("Audio data is empty".to_string()));
        }

        let (samples, sample_rate, channels) = self.decode_interleaved(data)?;
        Ok(AudioBuffer::new(downmix(samples, channels), sample_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 构造 16 位 PCM WAV
    fn create_test_wav(sample_rate: u32, num_channels: u16, samples: &[i16]) -> Vec<u8> {
        let data_size = samples.len() * 2;
        let mut wav = Vec::with_capacity(44 + data_size);

        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&((36 + data_size) as u32).to_le_bytes());
        wav.extend_from_slice(b"WAVE");

        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
        wav.extend_from_slice(&num_channels.to_le_bytes());
        wav.extend_from_slice(&sample_rate.to_le_bytes());
        let byte_rate = sample_rate * num_channels as u32 * 2;
        wav.extend_from_slice(&byte_rate.to_le_bytes());
        wav.extend_from_slice(&(num_channels * 2).to_le_bytes());
        wav.extend_from_slice(&16u16.to_le_bytes());

        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&(data_size as u32).to_le_bytes());
        for s in samples {
            wav.extend_from_slice(&s.to_le_bytes());
        }

        wav
    }

    #[test]
    fn test_encode_wav_header() {
        let codec = WavCodec::new();
        let audio = AudioBuffer::new(vec![0.0; 24_000], 24_000);

        let wav = codec.encode_wav(&audio).unwrap();

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(u16::from_le_bytes([wav[22], wav[23]]), 1); // mono
        assert_eq!(
            u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]),
            24_000
        );
        assert_eq!(u16::from_le_bytes([wav[34], wav[35]]), 16);
        assert_eq!(wav.len(), 44 + 24_000 * 2);
    }

    #[test]
    fn test_encode_clamps_samples() {
        let codec = WavCodec::new();
        let audio = AudioBuffer::new(vec![2.0, -2.0], 24_000);

        let wav = codec.encode_wav(&audio).unwrap();

        assert_eq!(i16::from_le_bytes([wav[44], wav[45]]), 32767);
        assert_eq!(i16::from_le_bytes([wav[46], wav[47]]), -32767);
    }

    #[test]
    fn test_encode_rejects_zero_sample_rate() {
        let codec = WavCodec::new();
        assert!(codec.encode_wav(&AudioBuffer::new(vec![0.0], 0)).is_err());
    }

    #[test]
    fn test_decode_encoded_audio() {
        let codec = WavCodec::new();
        let original = AudioBuffer::new(vec![0.0, 0.5, -0.5, 0.25], 24_000);

        let decoded = codec.decode(&codec.encode_wav(&original).unwrap()).unwrap();

        assert_eq!(decoded.sample_rate(), 24_000);
        assert_eq!(decoded.len(), original.len());
        for (a, b) in decoded.samples().iter().zip(original.samples()) {
            assert!((a - b).abs() < 1e-3, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_decode_downmixes_stereo() {
        let codec = WavCodec::new();
        // 两帧: (16384, 0) (-16384, -16384)
        let wav = create_test_wav(16_000, 2, &[16384, 0, -16384, -16384]);

        let decoded = codec.decode(&wav).unwrap();

        assert_eq!(decoded.sample_rate(), 16_000);
        assert_eq!(decoded.len(), 2);
        assert!((decoded.samples()[0] - 0.25).abs() < 1e-3);
        assert!((decoded.samples()[1] + 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let codec = WavCodec::new();
        assert!(codec.decode(b"").is_err());
        assert!(codec.decode(b"definitely not audio").is_err());
    }

    #[test]
    fn test_downmix_mono_passthrough() {
        assert_eq!(downmix(vec![0.1, 0.2], 1), vec![0.1, 0.2]);
    }
}
