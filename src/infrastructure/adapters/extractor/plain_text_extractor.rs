//! Plain Text Extractor - 纯文本文档提取器
//!
//! 读取 UTF-8 文本文件并返回完整内容。
//! 其他文档格式的解析由各自的适配器实现。

use async_trait::async_trait;
use std::path::Path;

use crate::application::ports::{ExtractionError, TextExtractorPort};

/// 纯文本提取器
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractorPort for PlainTextExtractor {
    async fn extract_text(&self, source: &Path) -> Result<String, ExtractionError> {
        let bytes = tokio::fs::read(source).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ExtractionError::NotFound(source.display().to_string())
            } else {
                ExtractionError::Unreadable(format!("{}: {}", source.display(), e))
            }
        })?;

        let text = String::from_utf8(bytes)
            .map_err(|_| ExtractionError::InvalidEncoding(source.display().to_string()))?;

        tracing::debug!(
            path = %source.display(),
            text_chars = text.chars().count(),
            "Extracted document text"
        );

        Ok(text)
    }
}
