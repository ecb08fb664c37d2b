//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TtsEngine、TextExtractor、AudioCodec）
//! - pipeline: 转换管线（分块 → 并发合成 → 定序装配）
//! - error: 应用层错误定义

pub mod error;
pub mod pipeline;
pub mod ports;

pub use error::ConversionError;
pub use pipeline::{AudioAssembler, ConversionPipeline, PipelineConfig, PoolConfig, SynthesisPool};
pub use ports::{
    AudioCodecPort, CodecError, ExtractionError, PcmAudio, SynthesisRequest, SynthesisResponse,
    TextExtractorPort, TtsEnginePort, TtsError,
};
