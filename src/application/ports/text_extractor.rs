//! Text Extractor Port - 文档文本提取抽象
//!
//! 定义"给定文档，产出完整文本"的协作方接口。
//! 具体的文档格式解析不属于核心管线，由适配器负责。

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// 提取错误
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Document unreadable: {0}")]
    Unreadable(String),

    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),
}

/// Text Extractor Port
///
/// 内容为空的文档允许返回空字符串，由管线判定为无内容
#[async_trait]
pub trait TextExtractorPort: Send + Sync {
    /// 提取文档的完整文本
    async fn extract_text(&self, source: &Path) -> Result<String, ExtractionError>;
}
