//! Conversion Context - Value Objects

use uuid::Uuid;

/// 转换请求唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 语言代码
///
/// 不变量:
/// - 非空，不超过 16 字符
/// - 只包含 ASCII 字母、数字和连字符
/// - 统一归一化为小写（如 "en"、"zh-cn"、"pt-br"）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl Into<String>) -> Result<Self, &'static str> {
        let code = code.into().trim().to_lowercase();
        if code.is_empty() {
            return Err("语言代码不能为空");
        }
        if code.len() > 16 {
            return Err("语言代码长度不能超过16字符");
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err("语言代码只能包含字母、数字和连字符");
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 文本分块 - 独立合成的最小单位
///
/// 不变量:
/// - index 从 0 开始且在分块序列内连续
/// - content 非空（分块器不产生空分块）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    index: usize,
    content: String,
}

impl TextChunk {
    pub fn new(index: usize, content: impl Into<String>) -> Self {
        Self {
            index,
            content: content.into(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// 内容是否为空白（此类分块被工作池跳过，不产生音频）
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// 音频剪辑 - 单个分块的合成结果
///
/// index 与来源分块一一对应；任何两个剪辑不共享 index
#[derive(Debug, Clone)]
pub struct AudioClip {
    /// 来源分块的序号
    pub index: usize,
    /// 编码后的音频数据（WAV）
    pub data: Vec<u8>,
    /// 音频时长提示（毫秒），由合成后端给出
    pub duration_ms: Option<u64>,
}

/// 装配完成的最终音频制品
///
/// 每次转换调用恰好产生一个；创建后不再变更，所有权移交调用方
#[derive(Debug, Clone)]
pub struct AssembledAudio {
    /// 最终音频数据（WAV）
    pub data: Vec<u8>,
    /// 总时长（毫秒），单剪辑直通路径下取后端提示
    pub duration_ms: Option<u64>,
    /// 参与装配的剪辑数量
    pub clip_count: usize,
}

/// 转换请求 - 一次 text → audio 转换的工作单元
///
/// 进程内短命对象，只存活于一次 convert 调用期间，不做持久化
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// 请求标识（仅用于日志关联）
    pub id: RequestId,
    /// 待转换的完整文本
    pub text: String,
    /// 目标语言
    pub language: LanguageCode,
}

impl ConversionRequest {
    pub fn new(text: impl Into<String>, language: LanguageCode) -> Self {
        Self {
            id: RequestId::new(),
            text: text.into(),
            language,
        }
    }
}
