//! Audio Assembler - 剪辑定序与装配
//!
//! 把无序到达的剪辑还原为原文顺序并拼接成单一音频制品。
//! 分块顺序即文档叙述顺序，乱序拼接会无声地破坏叙述。

use std::sync::Arc;

use crate::application::error::ConversionError;
use crate::application::ports::{AudioCodecPort, PcmAudio};
use crate::domain::{AssembledAudio, AudioClip};

/// 装配器
///
/// 最终输出的唯一所有者；装配完成后所有权移交调用方
pub struct AudioAssembler {
    codec: Arc<dyn AudioCodecPort>,
}

impl AudioAssembler {
    pub fn new(codec: Arc<dyn AudioCodecPort>) -> Self {
        Self { codec }
    }

    /// 装配剪辑为单一音频
    ///
    /// `expected_indices` 为应当产出剪辑的分块序号（即非空分块）。
    /// 缺少任一序号说明工作池的失败未被上游拦截，这里快速失败兜底。
    ///
    /// 恰好一个剪辑时直接透传其字节（管线两端均为 WAV，容器字节兼容，
    /// 无需重编码）；多个剪辑时逐个解码、按序号升序无缝拼接、一次重编码。
    pub fn assemble(
        &self,
        mut clips: Vec<AudioClip>,
        expected_indices: &[usize],
    ) -> Result<AssembledAudio, ConversionError> {
        if clips.is_empty() {
            return Err(ConversionError::EmptyResult);
        }

        // 工作池的完成顺序不保证与提交顺序一致，先还原原文顺序
        clips.sort_by_key(|c| c.index);

        for &expected in expected_indices {
            if clips.binary_search_by_key(&expected, |c| c.index).is_err() {
                return Err(ConversionError::MissingClip { index: expected });
            }
        }

        if clips.len() == 1 {
            let clip = clips.remove(0);
            tracing::debug!(
                chunk_index = clip.index,
                audio_size = clip.data.len(),
                "Single clip, passing bytes through"
            );
            return Ok(AssembledAudio {
                data: clip.data,
                duration_ms: clip.duration_ms,
                clip_count: 1,
            });
        }

        tracing::debug!(clip_count = clips.len(), "Concatenating audio clips");

        let mut segments: Vec<PcmAudio> = Vec::with_capacity(clips.len());
        for clip in &clips {
            let pcm = self.codec.decode(&clip.data)?;
            segments.push(pcm);
        }

        let combined = self.codec.concatenate(segments)?;
        let duration_ms = combined.duration_ms();
        let data = self.codec.encode(&combined)?;

        Ok(AssembledAudio {
            data,
            duration_ms: Some(duration_ms),
            clip_count: clips.len(),
        })
    }
}
