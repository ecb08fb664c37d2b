//! Lector - 文档转语音 CLI
//!
//! 读取文本文档，经转换管线合成为单个 WAV 文件：
//! - Domain: conversion/（值对象）+ 文本分块器
//! - Application: pipeline（分块 → 并发合成 → 定序装配）+ ports
//! - Infrastructure: HTTP/Fake TTS Client, WAV Codec, Plain Text Extractor

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use lector::application::pipeline::{ConversionPipeline, PipelineConfig};
use lector::application::ports::{TextExtractorPort, TtsEnginePort};
use lector::application::ConversionError;
use lector::config::{load_config, print_config, TtsBackend};
use lector::domain::{ConversionRequest, LanguageCode};
use lector::infrastructure::adapters::{
    FakeTtsClient, HttpTtsClient, HttpTtsClientConfig, PlainTextExtractor, WavCodec,
};

/// 文档转语音转换器
#[derive(Debug, Parser)]
#[command(name = "lector", version, about = "Convert a text document to spoken audio")]
struct Cli {
    /// 输入文档路径（UTF-8 文本）
    input: PathBuf,

    /// 输出音频路径（WAV）
    #[arg(short, long, default_value = "output.wav")]
    output: PathBuf,

    /// 语言代码（默认取配置中的 default_language）
    #[arg(short, long)]
    language: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!("{},lector={}", config.log.level, config.log.level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("Lector - 文档转语音管线");
    print_config(&config);

    // 创建 TTS 引擎
    let engine: Arc<dyn TtsEnginePort> = match config.tts.backend {
        TtsBackend::Http => {
            let tts_config = HttpTtsClientConfig {
                base_url: config.tts.url.clone(),
                timeout_secs: config.tts.timeout_secs,
            };
            Arc::new(HttpTtsClient::new(tts_config)?)
        }
        TtsBackend::Fake => Arc::new(FakeTtsClient::with_defaults()),
    };

    // 解析目标语言
    let language_tag = cli
        .language
        .unwrap_or_else(|| config.tts.default_language.clone());
    let language = LanguageCode::new(language_tag).map_err(|e| anyhow::anyhow!(e))?;

    // 提取文档文本
    let extractor = PlainTextExtractor::new();
    let text = extractor
        .extract_text(&cli.input)
        .await
        .map_err(ConversionError::Extraction)
        .with_context(|| format!("Failed to extract text from {}", cli.input.display()))?;

    // 执行转换
    let pipeline = ConversionPipeline::new(
        PipelineConfig {
            max_chunk_size: config.pipeline.max_chunk_size,
            max_concurrent: config.pipeline.max_concurrent,
        },
        engine,
        Arc::new(WavCodec::new()),
    );

    let request = ConversionRequest::new(text, language);
    let request_id = request.id;
    let audio = pipeline.convert(request).await.map_err(|e| {
        if e.is_caller_fault() {
            anyhow::anyhow!("Document rejected: {}", e)
        } else {
            anyhow::anyhow!("Conversion failed: {}", e)
        }
    })?;

    // 写出最终音频
    tokio::fs::write(&cli.output, &audio.data)
        .await
        .with_context(|| format!("Failed to write audio to {}", cli.output.display()))?;

    tracing::info!(
        request_id = %request_id,
        output = %cli.output.display(),
        audio_size = audio.data.len(),
        clip_count = audio.clip_count,
        duration_ms = ?audio.duration_ms,
        "Audio written"
    );

    Ok(())
}
