//! Whisper 兼容的语音转写客户端

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use super::{SpeechModel, Transcript, endpoint};
use crate::config::SpeechConfig;
use crate::errors::{CodeMentorError, Result};

pub struct WhisperClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    language: String,
    extract_audio: bool,
    ffmpeg_path: String,
}

impl WhisperClient {
    pub fn new(config: &SpeechConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            http,
            base_url: config.url.clone(),
            model: config.model.clone(),
            language: config.language.clone(),
            extract_audio: config.extract_audio,
            ffmpeg_path: config.ffmpeg_path.clone(),
        })
    }

    /// 用 ffmpeg 提取 16 kHz 单声道 WAV
    async fn extract_wav(&self, media: &[u8], file_name: &str) -> Result<Vec<u8>> {
        let dir = tempfile::tempdir()?;
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("mp4");
        let input = dir.path().join(format!("input.{extension}"));
        let output = dir.path().join("audio.wav");
        tokio::fs::write(&input, media).await?;

        let status = tokio::process::Command::new(&self.ffmpeg_path)
            .arg("-y")
            .arg("-i")
            .arg(&input)
            .args(["-vn", "-acodec", "pcm_s16le", "-ac", "1", "-ar", "16000"])
            .arg(&output)
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .await
            .map_err(|e| CodeMentorError::external_service(format!("无法启动 ffmpeg: {e}")))?;

        if !status.success() {
            return Err(CodeMentorError::external_service(format!(
                "ffmpeg 提取音频失败: {status}"
            )));
        }
        Ok(tokio::fs::read(&output).await?)
    }
}

#[async_trait]
impl SpeechModel for WhisperClient {
    async fn transcribe(&self, media: Vec<u8>, file_name: &str) -> Result<Transcript> {
        let (payload, upload_name) = if self.extract_audio {
            match self.extract_wav(&media, file_name).await {
                Ok(wav) => (wav, "audio.wav".to_string()),
                Err(e) => {
                    warn!("Audio extraction failed, sending original media: {}", e);
                    (media, file_name.to_string())
                }
            }
        } else {
            (media, file_name.to_string())
        };

        debug!(
            "Sending {} bytes to speech model {}",
            payload.len(),
            self.model
        );

        let form = Form::new()
            .part("file", Part::bytes(payload).file_name(upload_name))
            .text("model", self.model.clone())
            .text("language", self.language.clone())
            .text("response_format", "verbose_json");

        let response = self
            .http
            .post(endpoint(&self.base_url, "/v1/audio/transcriptions"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| CodeMentorError::external_service(format!("语音转写请求失败: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CodeMentorError::external_service(format!(
                "语音转写服务返回 {status}: {body}"
            )));
        }

        let mut transcript: Transcript = response.json().await.map_err(|e| {
            CodeMentorError::external_service(format!("语音转写响应无法解析: {e}"))
        })?;

        // 部分实现不返回 duration，取最后一段的结束时间
        if transcript.duration <= 0.0 {
            transcript.duration = transcript
                .segments
                .iter()
                .map(|s| s.end)
                .fold(0.0, f64::max);
        }
        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn client(url: String) -> WhisperClient {
        WhisperClient::new(&SpeechConfig {
            url,
            model: "whisper-test".to_string(),
            language: "es".to_string(),
            extract_audio: false,
            ..SpeechConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_transcribe_uploads_multipart_verbose_json() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/audio/transcriptions")
            .match_header("content-type", Matcher::Regex("^multipart/form-data".to_string()))
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="file"; filename="demo.mp4""#.to_string()),
                Matcher::Regex("fake video bytes".to_string()),
                Matcher::Regex(r#"name="model"\r\n\r\nwhisper-test"#.to_string()),
                Matcher::Regex(r#"name="language"\r\n\r\nes"#.to_string()),
                Matcher::Regex(r#"name="response_format"\r\n\r\nverbose_json"#.to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"text":"hola equipo","language":"spanish","duration":12.5,
                   "segments":[{"start":0.0,"end":3.0,"text":"hola"},{"start":5.0,"end":9.0,"text":"equipo"}]}"#,
            )
            .create_async()
            .await;

        let transcript = client(server.url())
            .transcribe(b"fake video bytes".to_vec(), "demo.mp4")
            .await
            .unwrap();
        assert_eq!(transcript.text, "hola equipo");
        assert_eq!(transcript.language.as_deref(), Some("spanish"));
        assert_eq!(transcript.duration, 12.5);
        assert_eq!(transcript.segments.len(), 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_duration_falls_back_to_last_segment() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/audio/transcriptions")
            .with_status(200)
            .with_body(
                r#"{"text":"uno dos","segments":[{"start":0.0,"end":4.0,"text":"uno"},{"start":6.0,"end":10.5,"text":"dos"}]}"#,
            )
            .create_async()
            .await;

        let transcript = client(server.url())
            .transcribe(vec![0u8; 16], "clip.webm")
            .await
            .unwrap();
        assert_eq!(transcript.duration, 10.5);
    }

    #[tokio::test]
    async fn test_transcribe_error_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/audio/transcriptions")
            .with_status(413)
            .with_body("file too large")
            .create_async()
            .await;

        let err = client(server.url())
            .transcribe(vec![1, 2, 3], "clip.mp4")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E013");
        assert!(err.message().contains("file too large"));
    }
}
