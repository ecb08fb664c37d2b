//! Text Extractor Adapter - 文档文本提取实现

mod plain_text_extractor;

pub use plain_text_extractor::PlainTextExtractor;
