//! Domain Layer - 领域层
//!
//! 包含转换限界上下文与共享的文本分块器

pub mod conversion;

// 共享的文本分块器
mod chunker;

pub use chunker::{split_text, SplitConfig, DEFAULT_MAX_CHUNK_SIZE};
pub use conversion::{
    AssembledAudio, AudioClip, ConversionRequest, LanguageCode, RequestId, TextChunk,
};
