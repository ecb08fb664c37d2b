//! Conversion Pipeline - 转换管线编排
//!
//! 把分块、并发合成、定序装配接成一次 `text → audio` 操作：
//!
//! ```text
//! Idle -> Chunking -> Synthesizing -> Assembling -> Complete
//!              \----------+---------------/
//!                         v
//!                      Failed（终态，中止后续阶段）
//! ```
//!
//! 严格线性、不可恢复；各次调用互不共享状态（并发上限除外），
//! 失败时绝不返回部分音频。

mod assembler;
mod pool;

pub use assembler::AudioAssembler;
pub use pool::{PoolConfig, SynthesisPool};

use std::sync::Arc;

use crate::application::error::ConversionError;
use crate::application::ports::{AudioCodecPort, TtsEnginePort};
use crate::domain::{
    split_text, AssembledAudio, ConversionRequest, SplitConfig, DEFAULT_MAX_CHUNK_SIZE,
};

/// 管线配置
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// 单个分块的最大字符数
    pub max_chunk_size: usize,
    /// 最大并发合成数
    pub max_concurrent: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            max_concurrent: 4,
        }
    }
}

/// 转换管线
pub struct ConversionPipeline {
    split_config: SplitConfig,
    pool: SynthesisPool,
    assembler: AudioAssembler,
}

impl ConversionPipeline {
    pub fn new(
        config: PipelineConfig,
        engine: Arc<dyn TtsEnginePort>,
        codec: Arc<dyn AudioCodecPort>,
    ) -> Self {
        Self {
            split_config: SplitConfig {
                max_chunk_size: config.max_chunk_size,
            },
            pool: SynthesisPool::new(
                engine,
                PoolConfig {
                    max_concurrent: config.max_concurrent,
                },
            ),
            assembler: AudioAssembler::new(codec),
        }
    }

    /// 执行一次完整转换
    ///
    /// 调用方挂起直到所有分块合成并装配完成，或任一阶段失败
    pub async fn convert(
        &self,
        request: ConversionRequest,
    ) -> Result<AssembledAudio, ConversionError> {
        if request.text.trim().is_empty() {
            return Err(ConversionError::NoContent);
        }

        // Chunking
        let chunks = split_text(&request.text, &self.split_config);
        if chunks.is_empty() {
            return Err(ConversionError::NoContent);
        }
        tracing::info!(
            request_id = %request.id,
            language = %request.language,
            text_chars = request.text.chars().count(),
            chunk_count = chunks.len(),
            "Text split into chunks"
        );

        // Synthesizing
        let clips = self.pool.synthesize_all(&chunks, &request.language).await?;

        // Assembling
        let expected: Vec<usize> = chunks
            .iter()
            .filter(|c| !c.is_blank())
            .map(|c| c.index())
            .collect();
        let audio = self.assembler.assemble(clips, &expected)?;

        tracing::info!(
            request_id = %request.id,
            clip_count = audio.clip_count,
            audio_size = audio.data.len(),
            duration_ms = ?audio.duration_ms,
            "Conversion complete"
        );

        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::application::ports::{
        SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError,
    };
    use crate::domain::LanguageCode;
    use crate::infrastructure::adapters::{FakeTtsClient, WavCodec};

    fn pipeline_with(engine: Arc<dyn TtsEnginePort>, config: PipelineConfig) -> ConversionPipeline {
        ConversionPipeline::new(config, engine, Arc::new(WavCodec::new()))
    }

    fn request(text: &str) -> ConversionRequest {
        ConversionRequest::new(text, LanguageCode::new("en").unwrap())
    }

    #[tokio::test]
    async fn test_convert_empty_text_fails_with_no_content() {
        let pipeline = pipeline_with(
            Arc::new(FakeTtsClient::with_defaults()),
            PipelineConfig::default(),
        );
        let err = pipeline.convert(request("")).await.unwrap_err();
        assert!(matches!(err, ConversionError::NoContent));
    }

    #[tokio::test]
    async fn test_convert_whitespace_text_fails_with_no_content() {
        let pipeline = pipeline_with(
            Arc::new(FakeTtsClient::with_defaults()),
            PipelineConfig::default(),
        );
        let err = pipeline.convert(request("   \n\t ")).await.unwrap_err();
        assert!(matches!(err, ConversionError::NoContent));
        assert!(err.is_caller_fault());
    }

    #[tokio::test]
    async fn test_convert_short_text_takes_single_clip_fast_path() {
        // 分块上限 ≥ 文本长度 → 恰好一个分块，跳过扇出退化
        let pipeline = pipeline_with(
            Arc::new(FakeTtsClient::with_defaults()),
            PipelineConfig {
                max_chunk_size: 11,
                max_concurrent: 4,
            },
        );

        let audio = pipeline.convert(request("hello world")).await.unwrap();
        assert_eq!(audio.clip_count, 1);
        assert!(!audio.data.is_empty());
        // 直通路径字节即 WAV
        assert_eq!(&audio.data[0..4], b"RIFF");
    }

    #[tokio::test]
    async fn test_convert_long_text_concatenates_in_order() {
        let pipeline = pipeline_with(
            Arc::new(FakeTtsClient::with_defaults()),
            PipelineConfig {
                max_chunk_size: 16,
                max_concurrent: 4,
            },
        );

        let text = "one two three four five six seven eight nine ten";
        let audio = pipeline.convert(request(text)).await.unwrap();

        assert!(audio.clip_count > 1);
        assert_eq!(&audio.data[0..4], b"RIFF");
        assert!(audio.duration_ms.unwrap() > 0);
    }

    /// 在指定内容上失败的引擎
    struct PoisonEngine;

    #[async_trait]
    impl TtsEnginePort for PoisonEngine {
        async fn synthesize(
            &self,
            request: SynthesisRequest,
        ) -> Result<SynthesisResponse, TtsError> {
            if request.text.contains("poison") {
                return Err(TtsError::ServiceError("backend failure".to_string()));
            }
            // 有效的最小 WAV 由 FakeTtsClient 测试覆盖，这里字节不会被装配
            Ok(SynthesisResponse {
                audio_data: vec![0; 64],
                duration_ms: Some(10),
                sample_rate: Some(16000),
            })
        }
    }

    #[tokio::test]
    async fn test_single_chunk_failure_fails_conversion_with_no_audio() {
        // 约 5000 字符、2000 上限 → 3 个分块；其中一块注入失败
        let mut words = vec!["abcd"; 900];
        words.push("poison");
        let text = words.join(" ");

        let pipeline = pipeline_with(Arc::new(PoisonEngine), PipelineConfig::default());
        let err = pipeline.convert(request(&text)).await.unwrap_err();

        match err {
            ConversionError::Synthesis { index, .. } => assert_eq!(index, 2),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_each_invocation_is_independent() {
        let pipeline = pipeline_with(
            Arc::new(FakeTtsClient::with_defaults()),
            PipelineConfig::default(),
        );

        let first = pipeline.convert(request("hello world")).await.unwrap();
        let second = pipeline.convert(request("hello world")).await.unwrap();
        assert_eq!(first.data, second.data);
    }
}
