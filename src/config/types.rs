//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 管线配置
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// TTS 引擎配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            tts: TtsConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// 管线配置
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// 单个分块的最大字符数
    #[serde(default = "default_max_chunk_size")]
    pub max_chunk_size: usize,

    /// 最大并发合成数
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

fn default_max_chunk_size() -> usize {
    2000
}

fn default_max_concurrent() -> usize {
    4
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: default_max_chunk_size(),
            max_concurrent: default_max_concurrent(),
        }
    }
}

/// TTS 后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TtsBackend {
    /// 外部 HTTP 合成服务
    #[default]
    Http,
    /// 本地假引擎（离线冒烟运行）
    Fake,
}

/// TTS 引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// 后端类型
    #[serde(default)]
    pub backend: TtsBackend,

    /// TTS 服务基础 URL
    #[serde(default = "default_tts_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,

    /// 默认语言代码
    #[serde(default = "default_language")]
    pub default_language: String,
}

fn default_tts_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_tts_timeout() -> u64 {
    120
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            backend: TtsBackend::default(),
            url: default_tts_url(),
            timeout_secs: default_tts_timeout(),
            default_language: default_language(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.pipeline.max_chunk_size, 2000);
        assert_eq!(config.pipeline.max_concurrent, 4);
        assert_eq!(config.tts.backend, TtsBackend::Http);
        assert_eq!(config.tts.url, "http://localhost:8000");
        assert_eq!(config.tts.default_language, "en");
    }

    #[test]
    fn test_backend_deserializes_from_lowercase() {
        let backend: TtsBackend = serde_json::from_str("\"fake\"").unwrap();
        assert_eq!(backend, TtsBackend::Fake);
    }
}
