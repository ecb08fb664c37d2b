//! Lector - 文档转语音管线
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Conversion Context: 转换上下文（分块、剪辑、最终音频）
//! - 文本分块器: 按词对齐的贪心切分
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TtsEngine, TextExtractor, AudioCodec）
//! - Pipeline: 转换管线编排（分块 → 并发合成 → 定序装配）
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: HTTP/Fake TTS Client, WAV Codec, Plain Text Extractor

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
