//! 应用层错误定义
//!
//! 转换管线面向调用方的统一错误类型

use thiserror::Error;

use crate::application::ports::{CodecError, ExtractionError, TtsError};

/// 转换错误
///
/// 管线任一阶段失败即终止本次调用，绝不返回部分音频
#[derive(Debug, Error)]
pub enum ConversionError {
    /// 源文本为空或全空白（调用方错误）
    #[error("No content: source text is empty or whitespace-only")]
    NoContent,

    /// 某个分块的合成失败（至少标识一个失败分块）
    #[error("Synthesis failed for chunk {index}: {source}")]
    Synthesis {
        index: usize,
        #[source]
        source: TtsError,
    },

    /// 所有分块退化为空，没有产出任何音频
    #[error("Empty result: no audio was produced")]
    EmptyResult,

    /// 上游文本提取失败，原样传播
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    /// 装配阶段的编解码失败
    #[error("Audio codec error: {0}")]
    Codec(#[from] CodecError),

    /// 一致性校验：非空分块缺少对应剪辑
    #[error("Missing audio clip for chunk {index}")]
    MissingClip { index: usize },

    /// 内部错误
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConversionError {
    /// 是否属于调用方错误（对应 4xx 语义）
    pub fn is_caller_fault(&self) -> bool {
        matches!(self, Self::NoContent | Self::EmptyResult)
    }
}
