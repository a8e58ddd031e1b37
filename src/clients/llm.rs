//! Ollama 兼容的文本生成客户端

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{LanguageModel, endpoint};
use crate::config::LlmConfig;
use crate::errors::{CodeMentorError, Result};

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

impl OllamaClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            http,
            base_url: config.url.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl LanguageModel for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!("Calling LLM {} ({} prompt chars)", self.model, prompt.len());

        let response = self
            .http
            .post(endpoint(&self.base_url, "/api/generate"))
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await
            .map_err(|e| CodeMentorError::external_service(format!("LLM 请求失败: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CodeMentorError::external_service(format!(
                "LLM 返回 {status}: {body}"
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| CodeMentorError::external_service(format!("LLM 响应无法解析: {e}")))?;
        Ok(body.response)
    }

    async fn is_healthy(&self) -> bool {
        match self
            .http
            .get(&self.base_url)
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!("LLM health check failed: {}", e);
                false
            }
        }
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

    fn client(url: String) -> OllamaClient {
        OllamaClient::new(&LlmConfig {
            url,
            model: "llama-test".to_string(),
            ..LlmConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_posts_non_streaming_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "model": "llama-test",
                "prompt": "grade this",
                "stream": false,
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"model":"llama-test","response":"{\"design_score\": 4}","done":true}"#)
            .create_async()
            .await;

        let reply = client(server.url()).generate("grade this").await.unwrap();
        assert_eq!(reply, r#"{"design_score": 4}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_error_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/generate")
            .with_status(500)
            .with_body("model not loaded")
            .create_async()
            .await;

        let err = client(server.url()).generate("x").await.unwrap_err();
        assert_eq!(err.code(), "E013");
        assert!(err.message().contains("500"));
        assert!(err.message().contains("model not loaded"));
    }

    #[tokio::test]
    async fn test_generate_unparseable_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/generate")
            .with_status(200)
            .with_body("<html>proxy error</html>")
            .create_async()
            .await;

        let err = client(server.url()).generate("x").await.unwrap_err();
        assert_eq!(err.code(), "E013");
    }

    #[tokio::test]
    async fn test_is_healthy() {
        let mut server = Server::new_async().await;
        let up = server
            .mock("GET", "/")
            .with_status(200)
            .with_body("Ollama is running")
            .create_async()
            .await;
        assert!(client(server.url()).is_healthy().await);
        up.assert_async().await;

        let mut down = Server::new_async().await;
        let _mock = down.mock("GET", "/").with_status(503).create_async().await;
        assert!(!client(down.url()).is_healthy().await);
    }
}
