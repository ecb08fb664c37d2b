//! 文本分块器
//!
//! 将长文本切分为大小受限、按词对齐的有序分块

use crate::domain::conversion::TextChunk;

/// 默认最大分块字符数
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 2000;

/// 分块配置
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// 单个分块的最大字符数
    pub max_chunk_size: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
        }
    }
}

/// 按词贪心切分文本
///
/// 切分策略:
/// 1. 按空白分词，保持原始顺序
/// 2. 贪心累积：加入下一个词（含分隔空格）会超过 max_chunk_size 时，
///    关闭当前分块并以该词开启新分块
/// 3. 超过 max_chunk_size 的单词不切断，独占一个分块
///
/// 空白或空输入产生空序列。纯函数，相同输入总是产生相同的分块序列。
pub fn split_text(text: &str, config: &SplitConfig) -> Vec<TextChunk> {
    let mut chunks: Vec<TextChunk> = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();

        if current_chars > 0 && current_chars + 1 + word_chars > config.max_chunk_size {
            chunks.push(TextChunk::new(chunks.len(), std::mem::take(&mut current)));
            current_chars = 0;
        }

        if current_chars > 0 {
            current.push(' ');
            current_chars += 1;
        }
        current.push_str(word);
        current_chars += word_chars;
    }

    // 剩余内容
    if current_chars > 0 {
        chunks.push(TextChunk::new(chunks.len(), current));
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn join_words(chunks: &[TextChunk]) -> Vec<String> {
        chunks
            .iter()
            .flat_map(|c| c.content().split_whitespace())
            .map(|w| w.to_string())
            .collect()
    }

    #[test]
    fn test_round_trip_preserves_word_sequence() {
        let text = "the quick  brown\tfox\njumps over   the lazy dog";
        let chunks = split_text(text, &SplitConfig { max_chunk_size: 10 });

        let expected: Vec<String> = text.split_whitespace().map(|w| w.to_string()).collect();
        assert_eq!(join_words(&chunks), expected);
    }

    #[test]
    fn test_chunks_respect_max_size() {
        let text = "aa bb cc dd ee ff gg hh";
        let chunks = split_text(text, &SplitConfig { max_chunk_size: 8 });

        for chunk in &chunks {
            assert!(chunk.char_count() <= 8, "chunk too long: {:?}", chunk);
        }
        // "aa bb cc" 恰好 8 字符
        assert_eq!(chunks[0].content(), "aa bb cc");
    }

    #[test]
    fn test_oversized_word_is_never_split() {
        let text = "short supercalifragilistic short";
        let chunks = split_text(text, &SplitConfig { max_chunk_size: 10 });

        // 超长单词独占一个分块，允许超过名义上限
        let oversized: Vec<_> = chunks
            .iter()
            .filter(|c| c.char_count() > 10)
            .collect();
        assert_eq!(oversized.len(), 1);
        assert_eq!(oversized[0].content(), "supercalifragilistic");
    }

    #[test]
    fn test_indices_are_contiguous_from_zero() {
        let text = "a b c d e f g h i j";
        let chunks = split_text(text, &SplitConfig { max_chunk_size: 3 });

        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index(), i);
        }
    }

    #[test]
    fn test_empty_and_whitespace_input_yield_no_chunks() {
        assert!(split_text("", &SplitConfig::default()).is_empty());
        assert!(split_text("   \t\n  ", &SplitConfig::default()).is_empty());
    }

    #[test]
    fn test_splitting_is_deterministic() {
        let text = "one two three four five six seven eight nine ten";
        let config = SplitConfig { max_chunk_size: 12 };

        let first = split_text(text, &config);
        let second = split_text(text, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_chunk_when_text_fits() {
        let chunks = split_text("hello world", &SplitConfig { max_chunk_size: 11 });
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content(), "hello world");
    }

    #[test]
    fn test_five_thousand_chars_yield_three_chunks() {
        // 1000 个 4 字符词，共 4999 字符；2000 上限下每块容纳 400 词
        let text = vec!["abcd"; 1000].join(" ");
        assert_eq!(text.chars().count(), 4999);

        let chunks = split_text(&text, &SplitConfig { max_chunk_size: 2000 });
        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert!(chunk.char_count() <= 2000);
        }
    }

    #[test]
    fn test_unicode_length_counted_in_chars() {
        // 中文字符按字符数而不是字节数计
        let text = "你好 世界 你好 世界";
        let chunks = split_text(text, &SplitConfig { max_chunk_size: 5 });

        for chunk in &chunks {
            assert!(chunk.char_count() <= 5);
        }
        assert_eq!(chunks[0].content(), "你好 世界");
    }
}
