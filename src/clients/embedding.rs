//! Ollama 兼容的向量模型客户端

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{EmbeddingModel, endpoint};
use crate::config::EmbeddingConfig;
use crate::errors::{CodeMentorError, Result};
use crate::utils::truncate_chars;

pub struct OllamaEmbeddingClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    max_input_chars: usize,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    embedding: Vec<f32>,
}

impl OllamaEmbeddingClient {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            http,
            base_url: config.url.clone(),
            model: config.model.clone(),
            max_input_chars: config.max_input_chars,
        })
    }
}

#[async_trait]
impl EmbeddingModel for OllamaEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let prompt = truncate_chars(text, self.max_input_chars);

        let response = self
            .http
            .post(endpoint(&self.base_url, "/api/embeddings"))
            .json(&EmbeddingRequest {
                model: &self.model,
                prompt,
            })
            .send()
            .await
            .map_err(|e| CodeMentorError::external_service(format!("向量模型请求失败: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CodeMentorError::external_service(format!(
                "向量模型返回 {status}"
            )));
        }

        let body: EmbeddingResponse = response.json().await.map_err(|e| {
            CodeMentorError::external_service(format!("向量模型响应无法解析: {e}"))
        })?;

        if body.embedding.is_empty() {
            return Err(CodeMentorError::external_service("向量模型返回空向量"));
        }
        Ok(body.embedding)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client(url: String, max_input_chars: usize) -> OllamaEmbeddingClient {
        OllamaEmbeddingClient::new(&EmbeddingConfig {
            url,
            model: "embed-test".to_string(),
            max_input_chars,
            ..EmbeddingConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_embed_sends_truncated_prompt() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/embeddings")
            .match_body(Matcher::Json(json!({
                "model": "embed-test",
                "prompt": "class",
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"embedding":[0.5,-0.25,1.0]}"#)
            .create_async()
            .await;

        let vector = client(server.url(), 5)
            .embed("class Account {}")
            .await
            .unwrap();
        assert_eq!(vector, vec![0.5, -0.25, 1.0]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_embed_rejects_empty_vector() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/embeddings")
            .with_status(200)
            .with_body(r#"{"embedding":[]}"#)
            .create_async()
            .await;

        let err = client(server.url(), 100).embed("x").await.unwrap_err();
        assert_eq!(err.code(), "E013");
        assert!(err.message().contains("空向量"));
    }

    #[tokio::test]
    async fn test_embed_error_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/embeddings")
            .with_status(404)
            .create_async()
            .await;

        let err = client(server.url(), 100).embed("x").await.unwrap_err();
        assert!(err.message().contains("404"));
    }
}
