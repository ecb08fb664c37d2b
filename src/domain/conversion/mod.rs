//! Conversion Context - 转换限界上下文
//!
//! 职责:
//! - 一次转换调用的值对象（分块、剪辑、最终音频）
//! - 语言代码与请求标识

mod value_objects;

pub use value_objects::{
    AssembledAudio, AudioClip, ConversionRequest, LanguageCode, RequestId, TextChunk,
};
