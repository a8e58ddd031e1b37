//! 外部 AI 服务客户端
//!
//! 评测流水线只依赖这里的 trait，便于在测试中替换为假实现。

pub mod embedding;
pub mod llm;
pub mod speech;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::AppConfig;
use crate::errors::Result;

pub use embedding::OllamaEmbeddingClient;
pub use llm::OllamaClient;
pub use speech::WhisperClient;

/// 文本生成模型
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
    /// 服务是否可达
    async fn is_healthy(&self) -> bool;
    fn model_name(&self) -> &str;
}

/// 代码向量模型
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
    fn model_name(&self) -> &str;
}

/// 语音转写模型
#[async_trait]
pub trait SpeechModel: Send + Sync {
    async fn transcribe(&self, media: Vec<u8>, file_name: &str) -> Result<Transcript>;
}

/// 转写中的一段
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TranscriptSegment {
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub text: String,
}

/// 转写结果
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transcript {
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub segments: Vec<TranscriptSegment>,
}

/// 流水线用到的全部 AI 客户端
#[derive(Clone)]
pub struct AiClients {
    pub llm: Arc<dyn LanguageModel>,
    pub embedding: Arc<dyn EmbeddingModel>,
    pub speech: Arc<dyn SpeechModel>,
}

impl AiClients {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            llm: Arc::new(OllamaClient::new(&config.llm)?),
            embedding: Arc::new(OllamaEmbeddingClient::new(&config.embedding)?),
            speech: Arc::new(WhisperClient::new(&config.speech)?),
        })
    }
}

/// 去掉末尾斜杠后拼接路径
pub(crate) fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        assert_eq!(
            endpoint("http://ollama:11434/", "/api/generate"),
            "http://ollama:11434/api/generate"
        );
        assert_eq!(
            endpoint("http://whisper:9001", "/v1/audio/transcriptions"),
            "http://whisper:9001/v1/audio/transcriptions"
        );
    }

    #[test]
    fn test_transcript_tolerates_missing_fields() {
        let t: Transcript = serde_json::from_str(r#"{"text": "hola"}"#).unwrap();
        assert_eq!(t.text, "hola");
        assert_eq!(t.duration, 0.0);
        assert!(t.segments.is_empty());
    }
}
