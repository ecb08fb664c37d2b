//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod codec;
pub mod extractor;
pub mod tts;

pub use codec::WavCodec;
pub use extractor::PlainTextExtractor;
pub use tts::*;
