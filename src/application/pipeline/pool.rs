//! Synthesis Pool - 并发合成工作池
//!
//! 对分块序列做受限并发的扇出合成：
//! - 空白分块直接跳过，不产生剪辑
//! - 每个任务把结果写入按分块序号预留的槽位，扇入无需加锁
//! - 任一分块失败立即中止未完成任务，整体失败，不返回部分结果

use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::application::error::ConversionError;
use crate::application::ports::{SynthesisRequest, TtsEnginePort, TtsError};
use crate::domain::{AudioClip, LanguageCode, TextChunk};

/// 工作池配置
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// 最大并发合成数
    pub max_concurrent: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { max_concurrent: 4 }
    }
}

/// 合成工作池
///
/// 除受限的任务队列外，工作任务之间不共享可变状态
pub struct SynthesisPool {
    engine: Arc<dyn TtsEnginePort>,
    config: PoolConfig,
}

impl SynthesisPool {
    pub fn new(engine: Arc<dyn TtsEnginePort>, config: PoolConfig) -> Self {
        Self { engine, config }
    }

    /// 并发合成所有分块
    ///
    /// 返回的剪辑各自保留来源分块的序号；完成顺序不保证与提交顺序一致。
    /// 不做内部重试，失败立即向上传播。
    pub async fn synthesize_all(
        &self,
        chunks: &[TextChunk],
        language: &LanguageCode,
    ) -> Result<Vec<AudioClip>, ConversionError> {
        // 按分块数量预留结果槽位，每个任务只写自己的槽
        let mut slots: Vec<Option<AudioClip>> = vec![None; chunks.len()];

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent.max(1)));
        let mut tasks: JoinSet<Result<AudioClip, (usize, TtsError)>> = JoinSet::new();

        for chunk in chunks {
            if chunk.is_blank() {
                tracing::debug!(chunk_index = chunk.index(), "Skipping blank chunk");
                continue;
            }

            let engine = self.engine.clone();
            let semaphore = semaphore.clone();
            let index = chunk.index();
            let request = SynthesisRequest {
                text: chunk.content().to_string(),
                language: language.clone(),
            };

            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|_| (index, TtsError::ServiceError("Worker pool closed".to_string())))?;

                tracing::debug!(
                    chunk_index = index,
                    text_len = request.text.len(),
                    "Synthesizing chunk"
                );

                match engine.synthesize(request).await {
                    Ok(response) => Ok(AudioClip {
                        index,
                        data: response.audio_data,
                        duration_ms: response.duration_ms,
                    }),
                    Err(e) => Err((index, e)),
                }
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(clip)) => {
                    let idx = clip.index;
                    debug_assert!(idx < slots.len());
                    debug_assert!(slots[idx].is_none(), "duplicate clip index");
                    slots[idx] = Some(clip);
                }
                Ok(Err((index, source))) => {
                    tracing::error!(chunk_index = index, error = %source, "Chunk synthesis failed");
                    tasks.abort_all();
                    return Err(ConversionError::Synthesis { index, source });
                }
                Err(e) if e.is_cancelled() => continue,
                Err(e) => {
                    tasks.abort_all();
                    return Err(ConversionError::Internal(format!(
                        "Synthesis task panicked: {}",
                        e
                    )));
                }
            }
        }

        Ok(slots.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::application::ports::SynthesisResponse;
    use crate::domain::{split_text, SplitConfig};

    /// 回显引擎：返回以文本内容构造的"音频"，并记录峰值并发
    struct EchoEngine {
        active: AtomicUsize,
        peak: AtomicUsize,
    }

    impl EchoEngine {
        fn new() -> Self {
            Self {
                active: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TtsEnginePort for EchoEngine {
        async fn synthesize(
            &self,
            request: SynthesisRequest,
        ) -> Result<SynthesisResponse, TtsError> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            self.active.fetch_sub(1, Ordering::SeqCst);

            Ok(SynthesisResponse {
                audio_data: request.text.into_bytes(),
                duration_ms: Some(1),
                sample_rate: Some(16000),
            })
        }
    }

    /// 在含有标记的分块上失败的引擎
    struct PoisonEngine;

    #[async_trait]
    impl TtsEnginePort for PoisonEngine {
        async fn synthesize(
            &self,
            request: SynthesisRequest,
        ) -> Result<SynthesisResponse, TtsError> {
            if request.text.contains("poison") {
                return Err(TtsError::ServiceError("backend rejected chunk".to_string()));
            }
            Ok(SynthesisResponse {
                audio_data: vec![1, 2, 3],
                duration_ms: None,
                sample_rate: None,
            })
        }
    }

    fn language() -> LanguageCode {
        LanguageCode::new("en").unwrap()
    }

    #[tokio::test]
    async fn test_every_nonempty_chunk_yields_one_clip_with_its_index() {
        let chunks = split_text(
            "alpha beta gamma delta epsilon zeta eta theta",
            &SplitConfig { max_chunk_size: 12 },
        );
        let pool = SynthesisPool::new(Arc::new(EchoEngine::new()), PoolConfig::default());

        let clips = pool.synthesize_all(&chunks, &language()).await.unwrap();

        assert_eq!(clips.len(), chunks.len());
        for (clip, chunk) in clips.iter().zip(chunks.iter()) {
            assert_eq!(clip.index, chunk.index());
            assert_eq!(clip.data, chunk.content().as_bytes());
        }
    }

    #[tokio::test]
    async fn test_blank_chunks_are_skipped() {
        let chunks = vec![
            TextChunk::new(0, "hello"),
            TextChunk::new(1, "   "),
            TextChunk::new(2, "world"),
        ];
        let pool = SynthesisPool::new(Arc::new(EchoEngine::new()), PoolConfig::default());

        let clips = pool.synthesize_all(&chunks, &language()).await.unwrap();

        let indices: Vec<usize> = clips.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[tokio::test]
    async fn test_concurrency_stays_within_limit() {
        let text = vec!["word"; 64].join(" ");
        let chunks = split_text(&text, &SplitConfig { max_chunk_size: 4 });
        assert!(chunks.len() >= 32);

        let engine = Arc::new(EchoEngine::new());
        let pool = SynthesisPool::new(engine.clone(), PoolConfig { max_concurrent: 3 });

        pool.synthesize_all(&chunks, &language()).await.unwrap();
        assert!(engine.peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_single_failure_fails_whole_operation() {
        let chunks = vec![
            TextChunk::new(0, "fine"),
            TextChunk::new(1, "poison here"),
            TextChunk::new(2, "also fine"),
        ];
        let pool = SynthesisPool::new(Arc::new(PoisonEngine), PoolConfig::default());

        let err = pool.synthesize_all(&chunks, &language()).await.unwrap_err();
        match err {
            ConversionError::Synthesis { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_chunk_sequence_yields_no_clips() {
        let pool = SynthesisPool::new(Arc::new(EchoEngine::new()), PoolConfig::default());
        let clips = pool.synthesize_all(&[], &language()).await.unwrap();
        assert!(clips.is_empty());
    }
}
