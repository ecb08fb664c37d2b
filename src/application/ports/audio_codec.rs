//! Audio Codec Port - 音频编解码抽象
//!
//! 定义装配器依赖的解码/编码/拼接能力。
//! 纯 CPU 运算，接口为同步；要求编解码在所选容器内无损往返。

use thiserror::Error;

/// 编解码错误
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}

/// 解码后的 PCM 音频
///
/// samples 为交错排列的 f32 采样，范围 [-1.0, 1.0]
#[derive(Debug, Clone)]
pub struct PcmAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u8,
}

impl PcmAudio {
    /// 每声道帧数
    pub fn frame_count(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    /// 时长（毫秒）
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        (self.frame_count() as u64 * 1000) / self.sample_rate as u64
    }
}

/// Audio Codec Port
pub trait AudioCodecPort: Send + Sync {
    /// 解码音频字节为 PCM 采样
    fn decode(&self, data: &[u8]) -> Result<PcmAudio, CodecError>;

    /// 将 PCM 采样编码为音频字节
    fn encode(&self, pcm: &PcmAudio) -> Result<Vec<u8>, CodecError>;

    /// 按顺序无缝拼接多段 PCM 音频
    ///
    /// 采样率不一致时重采样到第一段的采样率
    fn concatenate(&self, segments: Vec<PcmAudio>) -> Result<PcmAudio, CodecError>;
}
