//! WAV Codec - 基于 symphonia 的音频编解码器
//!
//! 支持：
//! - WAV → 交错 f32 PCM 解码
//! - PCM → 16 位 WAV 编码
//! - 多段 PCM 无缝拼接（采样率不一致时线性重采样）

use std::io::Cursor;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioCodecPort, CodecError, PcmAudio};

/// WAV 编解码器
///
/// 编码固定输出 16 位 PCM 单/多声道 WAV，与解码无损往返
pub struct WavCodec;

impl WavCodec {
    pub fn new() -> Self {
        Self
    }

    /// 线性插值重采样
    fn resample(samples: &[f32], from_rate: u32, to_rate: u32, channels: u8) -> Vec<f32> {
        if from_rate == to_rate || samples.is_empty() || channels == 0 {
            return samples.to_vec();
        }

        let ratio = to_rate as f64 / from_rate as f64;
        let channel_count = channels as usize;
        let frame_count = samples.len() / channel_count;
        if frame_count == 0 {
            return Vec::new();
        }
        let new_frame_count = (frame_count as f64 * ratio) as usize;
        let mut resampled = Vec::with_capacity(new_frame_count * channel_count);

        for i in 0..new_frame_count {
            let src_pos = i as f64 / ratio;
            let src_idx = src_pos as usize;
            let frac = src_pos - src_idx as f64;

            for ch in 0..channel_count {
                let idx0 = src_idx * channel_count + ch;
                let idx1 = ((src_idx + 1).min(frame_count - 1)) * channel_count + ch;

                let s0 = samples.get(idx0).copied().unwrap_or(0.0);
                let s1 = samples.get(idx1).copied().unwrap_or(s0);

                resampled.push(s0 + (s1 - s0) * frac as f32);
            }
        }

        resampled
    }
}

impl Default for WavCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioCodecPort for WavCodec {
    fn decode(&self, data: &[u8]) -> Result<PcmAudio, CodecError> {
        let cursor = Cursor::new(data.to_vec());
        let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

        let mut hint = Hint::new();
        hint.with_extension("wav");

        let format_opts = FormatOptions::default();
        let metadata_opts = MetadataOptions::default();

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &format_opts, &metadata_opts)
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
            .map(|c| c.count() as u8)
            .ok_or_else(|| CodecError::DecodingError("Unknown channel count".to_string()))?;

        let decoder_opts = DecoderOptions::default();
        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &decoder_opts)
            .map_err(|e| CodecError::DecodingError(format!("Decoder creation failed: {}", e)))?;

        let mut samples: Vec<f32> = Vec::new();
        let track_id = track.id;

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
            // 只取实际采样，不取整个缓冲区容量
            let actual_samples = num_frames * spec.channels.count();
            samples.extend(&sample_buf.samples()[..actual_samples]);
        }

        Ok(PcmAudio {
            samples,
            sample_rate,
            channels,
        })
    }

    fn encode(&self, pcm: &PcmAudio) -> Result<Vec<u8>, CodecError> {
        if pcm.channels == 0 || pcm.sample_rate == 0 {
            return Err(CodecError::InvalidInput(
                "PCM audio has no channels or zero sample rate".to_string(),
            ));
        }

        let bits_per_sample: u16 = 16;
        let num_channels = pcm.channels as u16;
        let sample_rate = pcm.sample_rate;
        let byte_rate = sample_rate * num_channels as u32 * (bits_per_sample / 8) as u32;
        let block_align = num_channels * (bits_per_sample / 8);

        let data_size = pcm.samples.len() * 2;
        let file_size = 36 + data_size;

        let mut wav = Vec::with_capacity(44 + data_size);

        // RIFF header
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&(file_size as u32).to_le_bytes());
        wav.extend_from_slice(b"WAVE");

        // fmt chunk
        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM format
        wav.extend_from_slice(&num_channels.to_le_bytes());
        wav.extend_from_slice(&sample_rate.to_le_bytes());
        wav.extend_from_slice(&byte_rate.to_le_bytes());
        wav.extend_from_slice(&block_align.to_le_bytes());
        wav.extend_from_slice(&bits_per_sample.to_le_bytes());

        // data chunk
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&(data_size as u32).to_le_bytes());

        for &sample in &pcm.samples {
            let clamped = sample.clamp(-1.0, 1.0);
            wav.extend_from_slice(&((clamped * 32767.0) as i16).to_le_bytes());
        }

        Ok(wav)
    }

    fn concatenate(&self, segments: Vec<PcmAudio>) -> Result<PcmAudio, CodecError> {
        if segments.is_empty() {
            return Err(CodecError::InvalidInput(
                "No segments to concatenate".to_string(),
            ));
        }

        // 第一段决定输出规格
        let target_rate = segments[0].sample_rate;
        let target_channels = segments[0].channels;
        if target_channels == 0 || target_rate == 0 {
            return Err(CodecError::InvalidInput(
                "First segment has no channels or zero sample rate".to_string(),
            ));
        }

        let mut samples: Vec<f32> = Vec::new();
        for (i, segment) in segments.iter().enumerate() {
            if segment.channels != target_channels {
                return Err(CodecError::InvalidInput(format!(
                    "Segment {} has {} channels, expected {}",
                    i, segment.channels, target_channels
                )));
            }

            if segment.sample_rate != target_rate {
                tracing::debug!(
                    segment = i,
                    from_rate = segment.sample_rate,
                    to_rate = target_rate,
                    "Resampling segment"
                );
                samples.extend(Self::resample(
                    &segment.samples,
                    segment.sample_rate,
                    target_rate,
                    target_channels,
                ));
            } else {
                samples.extend_from_slice(&segment.samples);
            }
        }

        Ok(PcmAudio {
            samples,
            sample_rate: target_rate,
            channels: target_channels,
        })
    }
}
