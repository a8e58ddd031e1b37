//! 评测流水线：代码评分、查重与视频分析
//!
//! 每一步都会写入 `evaluation_logs`。外部 AI 服务失败不会中断评测，
//! 而是使用兜底结果并在响应的 `error` 字段中说明。

use std::sync::Arc;

use serde_json::json;
use tracing::{error, info, warn};

use super::archive::{self, ExtractedCode, PLACEHOLDER_PROGRAM};
use super::participation::analyze_participation;
use super::prompt::{evaluation_prompt, video_prompt};
use super::reference::ReferenceSet;
use super::scoring::{GENERAL_COMMENT, RawEvaluation, parse_evaluation};
use super::similarity::{as_percentage, cosine_similarity, token_jaccard};
use crate::blob::BlobStore;
use crate::cache::{ObjectCache, embedding_cache_key};
use crate::clients::AiClients;
use crate::config::{AppConfig, EmbeddingConfig, EvaluationConfig, LlmConfig, SpeechConfig};
use crate::errors::{CodeMentorError, Result};
use crate::models::assignments::entities::Assignment;
use crate::models::evaluation::responses::{EvaluationResponse, VideoAnalysisResponse};
use crate::models::grades::requests::NewAutoGrade;
use crate::models::plagiarism::entities::PlagiarismStatus;
use crate::models::plagiarism::requests::NewDetection;
use crate::models::plagiarism::responses::{DetectionResponse, SkippedSubmission};
use crate::models::submissions::entities::{Submission, SubmissionStatus};
use crate::storage::Storage;

/// 压缩包中没有可评测源文件时的原因说明
fn empty_archive_reason(extracted: &ExtractedCode) -> &'static str {
    if extracted.truncated {
        "All source files exceed the extraction size limit"
    } else {
        "No source files found"
    }
}

/// 流水线用到的配置
#[derive(Debug, Clone, Default)]
pub struct PipelineSettings {
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub speech: SpeechConfig,
    pub evaluation: EvaluationConfig,
    /// 嵌入向量缓存时长（秒）
    pub cache_ttl: u64,
}

impl PipelineSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            llm: config.llm.clone(),
            embedding: config.embedding.clone(),
            speech: config.speech.clone(),
            evaluation: config.evaluation.clone(),
            cache_ttl: config.cache.default_ttl,
        }
    }
}

#[derive(Clone)]
pub struct EvaluationPipeline {
    storage: Arc<dyn Storage>,
    blob: Arc<dyn BlobStore>,
    cache: Arc<dyn ObjectCache>,
    clients: AiClients,
    reference: Arc<ReferenceSet>,
    settings: PipelineSettings,
}

impl EvaluationPipeline {
    pub fn new(
        storage: Arc<dyn Storage>,
        blob: Arc<dyn BlobStore>,
        cache: Arc<dyn ObjectCache>,
        clients: AiClients,
        reference: Arc<ReferenceSet>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            storage,
            blob,
            cache,
            clients,
            reference,
            settings,
        }
    }

    /// 写评测日志，写入失败只记录告警
    async fn log(
        &self,
        submission_id: Option<i64>,
        step: &str,
        status: &str,
        message: impl Into<String>,
        details: Option<serde_json::Value>,
    ) {
        if let Err(e) = self
            .storage
            .append_evaluation_log(submission_id, step, status, Some(message.into()), details)
            .await
        {
            warn!("Failed to write evaluation log {}/{}: {}", step, status, e);
        }
    }

    /// 下载并提取提交的代码
    async fn load_code(&self, submission: &Submission) -> Result<ExtractedCode> {
        let path = submission
            .project_path
            .as_deref()
            .ok_or_else(|| CodeMentorError::not_found("提交没有代码压缩包"))?;
        let data = self.blob.get(path).await?;
        archive::extract_source_code(&data, &self.settings.evaluation)
    }

    /// 对一次提交做完整的代码评测
    ///
    /// 只有评分写入失败时返回错误，此时提交状态为 `failed`。
    pub async fn evaluate(
        &self,
        submission: &Submission,
        assignment: &Assignment,
    ) -> Result<EvaluationResponse> {
        let submission_id = submission.id;
        info!("Starting evaluation for submission {}", submission_id);

        self.storage
            .update_submission_status(submission_id, SubmissionStatus::Evaluating)
            .await?;
        self.log(
            Some(submission_id),
            "evaluation",
            "started",
            "Starting evaluation",
            None,
        )
        .await;

        let mut warnings = Vec::new();
        let code = match self.load_code(submission).await {
            Ok(extracted) if !extracted.is_empty() => {
                if extracted.truncated {
                    warnings.push("Archive too large, some files were not evaluated".to_string());
                }
                self.log(
                    Some(submission_id),
                    "code_extraction",
                    "completed",
                    format!("Extracted {} files", extracted.files.len()),
                    Some(json!({ "files": extracted.files, "chars": extracted.code.len() })),
                )
                .await;
                extracted.code
            }
            Ok(extracted) => {
                let reason = empty_archive_reason(&extracted);
                warnings.push(format!("{reason} in the archive"));
                self.log(
                    Some(submission_id),
                    "code_extraction",
                    "warning",
                    format!("{reason}, evaluating placeholder"),
                    Some(json!({ "truncated": extracted.truncated })),
                )
                .await;
                PLACEHOLDER_PROGRAM.to_string()
            }
            Err(e) => {
                warn!("Code extraction failed for submission {}: {}", submission_id, e);
                warnings.push(format!("Could not extract code: {}", e.message()));
                self.log(
                    Some(submission_id),
                    "code_extraction",
                    "failed",
                    e.to_string(),
                    None,
                )
                .await;
                PLACEHOLDER_PROGRAM.to_string()
            }
        };

        let examples = self
            .reference
            .search(&code, self.settings.evaluation.reference_limit);
        let prompt = evaluation_prompt(
            &code,
            assignment.requirements.as_deref().unwrap_or_default(),
            &assignment.rubric,
            &ReferenceSet::format_for_prompt(&examples),
            self.settings.llm.code_limit,
            self.settings.llm.requirements_limit,
        );

        let (raw, llm_error) = match self.clients.llm.generate(&prompt).await {
            Ok(reply) => match parse_evaluation(&reply) {
                Ok(raw) => (raw, None),
                Err(e) => (RawEvaluation::fallback(), Some(format!("无法解析模型回复: {}", e.message()))),
            },
            Err(e) => (RawEvaluation::fallback(), Some(e.message().to_string())),
        };

        if let Some(message) = &llm_error {
            warn!("LLM evaluation failed for submission {}: {}", submission_id, message);
            self.log(
                Some(submission_id),
                "llm",
                "failed",
                message.clone(),
                Some(json!({ "fallback": true })),
            )
            .await;
        }

        let scores = raw.scaled(&assignment.rubric);
        let total_score = scores.total();

        let persisted = self
            .storage
            .create_auto_grade(NewAutoGrade {
                submission_id,
                student_id: submission.submitted_by.clone(),
                scores,
                feedback: raw.feedback.clone(),
                general_comments: GENERAL_COMMENT.to_string(),
            })
            .await;

        let (grade, _) = match persisted {
            Ok(pair) => pair,
            Err(e) => {
                error!("Failed to persist grade for submission {}: {}", submission_id, e);
                if let Err(status_err) = self
                    .storage
                    .update_submission_status(submission_id, SubmissionStatus::Failed)
                    .await
                {
                    warn!("Failed to mark submission {} as failed: {}", submission_id, status_err);
                }
                self.log(
                    Some(submission_id),
                    "evaluation",
                    "failed",
                    e.to_string(),
                    None,
                )
                .await;
                return Err(e);
            }
        };

        self.log(
            Some(submission_id),
            "evaluation",
            "completed",
            "Evaluation completed",
            Some(json!({
                "grade_id": grade.id,
                "total_score": total_score,
                "used_fallback": llm_error.is_some(),
            })),
        )
        .await;
        info!(
            "Submission {} evaluated, total score {}",
            submission_id, total_score
        );

        Ok(EvaluationResponse {
            submission_id,
            grade_id: grade.id,
            total_score,
            scores,
            feedback: raw.feedback,
            used_fallback: llm_error.is_some(),
            error: llm_error,
            warnings,
        })
    }

    /// 取代码嵌入向量，优先读缓存
    async fn embedding_for(&self, code: &str) -> Result<Vec<f32>> {
        let key = embedding_cache_key(self.clients.embedding.model_name(), code);
        if let Some(vector) = self.cache.get::<Vec<f32>>(&key).await {
            return Ok(vector);
        }
        let vector = self.clients.embedding.embed(code).await?;
        self.cache
            .insert(key, &vector, self.settings.cache_ttl)
            .await;
        Ok(vector)
    }

    /// 对作业下的提交两两比较代码相似度
    pub async fn detect_plagiarism(
        &self,
        assignment_id: i64,
        only_ids: Option<Vec<i64>>,
    ) -> Result<DetectionResponse> {
        let submissions = self
            .storage
            .list_assignment_submissions(assignment_id, only_ids)
            .await?;

        let mut response = DetectionResponse {
            assignment_id,
            compared: 0,
            skipped: Vec::new(),
            detections_found: 0,
            detections: Vec::new(),
            error: None,
        };

        if submissions.len() < 2 {
            info!(
                "Assignment {} has fewer than two submissions, nothing to compare",
                assignment_id
            );
            return Ok(response);
        }

        let mut codes: Vec<(i64, String)> = Vec::with_capacity(submissions.len());
        for submission in &submissions {
            match self.load_code(submission).await {
                Ok(extracted) if !extracted.is_empty() => {
                    codes.push((submission.id, extracted.code))
                }
                Ok(extracted) => response.skipped.push(SkippedSubmission {
                    submission_id: submission.id,
                    reason: empty_archive_reason(&extracted).to_string(),
                }),
                Err(e) => {
                    warn!("Skipping submission {} in plagiarism sweep: {}", submission.id, e);
                    self.log(
                        Some(submission.id),
                        "code_extraction",
                        "failed",
                        e.to_string(),
                        Some(json!({ "assignment_id": assignment_id })),
                    )
                    .await;
                    response.skipped.push(SkippedSubmission {
                        submission_id: submission.id,
                        reason: e.message().to_string(),
                    });
                }
            }
        }

        response.compared = codes.len();
        if codes.len() < 2 {
            return Ok(response);
        }

        let mut embeddings = Vec::with_capacity(codes.len());
        for (submission_id, code) in &codes {
            match self.embedding_for(code).await {
                Ok(vector) => embeddings.push(vector),
                Err(e) => {
                    error!(
                        "Embedding failed for submission {}, aborting sweep: {}",
                        submission_id, e
                    );
                    self.log(
                        None,
                        "plagiarism",
                        "failed",
                        e.to_string(),
                        Some(json!({
                            "assignment_id": assignment_id,
                            "submission_id": submission_id,
                        })),
                    )
                    .await;
                    response.error = Some(e.message().to_string());
                    return Ok(response);
                }
            }
        }

        let threshold = self.settings.embedding.similarity_threshold;
        let suspicious = self.settings.embedding.suspicious_threshold;
        let mut found = Vec::new();
        for i in 0..codes.len() {
            for j in (i + 1)..codes.len() {
                let similarity = cosine_similarity(&embeddings[i], &embeddings[j]);
                if similarity < threshold {
                    continue;
                }
                let percentage = as_percentage(similarity);
                found.push(NewDetection {
                    assignment_id,
                    submission_id_1: codes[i].0,
                    submission_id_2: codes[j].0,
                    similarity_score: percentage,
                    semantic_similarity: percentage,
                    structural_similarity: as_percentage(token_jaccard(&codes[i].1, &codes[j].1)),
                    status: if similarity > suspicious {
                        PlagiarismStatus::Suspicious
                    } else {
                        PlagiarismStatus::ReviewNeeded
                    },
                });
            }
        }

        let detections = self.storage.save_detections(found).await?;
        self.log(
            None,
            "plagiarism",
            "completed",
            format!("Compared {} submissions", codes.len()),
            Some(json!({
                "assignment_id": assignment_id,
                "detections": detections.len(),
            })),
        )
        .await;
        info!(
            "Plagiarism sweep for assignment {}: {} pairs flagged",
            assignment_id,
            detections.len()
        );

        response.detections_found = detections.len();
        response.detections = detections;
        Ok(response)
    }

    /// 转写讲解视频并分析参与度
    pub async fn analyze_video(
        &self,
        submission: &Submission,
        assignment: &Assignment,
    ) -> Result<VideoAnalysisResponse> {
        let submission_id = submission.id;
        let video_path = submission
            .video_path
            .as_deref()
            .ok_or_else(|| CodeMentorError::not_found("提交没有视频"))?;

        let mut response = VideoAnalysisResponse {
            submission_id,
            ..Default::default()
        };

        self.log(
            Some(submission_id),
            "video_analysis",
            "started",
            "Starting video analysis",
            None,
        )
        .await;

        let transcript = match self.blob.get(video_path).await {
            Ok(media) => {
                let file_name = video_path.rsplit('/').next().unwrap_or(video_path);
                self.clients.speech.transcribe(media, file_name).await
            }
            Err(e) => Err(e),
        };
        let transcript = match transcript {
            Ok(t) => t,
            Err(e) => {
                warn!("Transcription failed for submission {}: {}", submission_id, e);
                self.log(
                    Some(submission_id),
                    "video_analysis",
                    "failed",
                    e.to_string(),
                    None,
                )
                .await;
                response.error = Some(e.message().to_string());
                return Ok(response);
            }
        };

        let participation = analyze_participation(
            &transcript.segments,
            transcript.duration,
            self.settings.speech.speaker_gap_secs,
        );

        let prompt = video_prompt(
            &transcript.text,
            assignment.requirements.as_deref().unwrap_or_default(),
            self.settings.llm.requirements_limit,
        );
        match self.clients.llm.generate(&prompt).await {
            Ok(analysis) => response.analysis = Some(analysis),
            Err(e) => {
                warn!("Transcript analysis failed for submission {}: {}", submission_id, e);
                self.log(
                    Some(submission_id),
                    "llm",
                    "failed",
                    e.to_string(),
                    None,
                )
                .await;
                response.error = Some(e.message().to_string());
            }
        }

        self.log(
            Some(submission_id),
            "video_analysis",
            "completed",
            "Video analysis completed",
            Some(json!({
                "duration": transcript.duration,
                "speakers": participation.num_speakers_detected,
            })),
        )
        .await;

        response.transcription = Some(transcript.text);
        response.duration = Some(transcript.duration);
        response.participation = Some(participation);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::blob::LocalBlobStore;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::clients::{EmbeddingModel, LanguageModel, SpeechModel, Transcript, TranscriptSegment};
    use crate::evaluation::archive::build_zip;
    use crate::models::grades::entities::GradeStatus;
    use crate::storage::sea_orm_storage::{SeaOrmStorage, fixtures};

    struct FakeLlm {
        reply: std::result::Result<String, String>,
    }

    #[async_trait]
    impl LanguageModel for FakeLlm {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            self.reply
                .clone()
                .map_err(CodeMentorError::external_service)
        }

        async fn is_healthy(&self) -> bool {
            self.reply.is_ok()
        }

        fn model_name(&self) -> &str {
            "fake-llm"
        }
    }

    /// 按代码中的标记返回固定向量
    struct FakeEmbedding {
        vectors: HashMap<&'static str, Vec<f32>>,
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl EmbeddingModel for FakeEmbedding {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CodeMentorError::external_service("embedding down"));
            }
            self.vectors
                .iter()
                .find(|(marker, _)| text.contains(**marker))
                .map(|(_, v)| v.clone())
                .ok_or_else(|| CodeMentorError::external_service("unknown text"))
        }

        fn model_name(&self) -> &str {
            "fake-embed"
        }
    }

    struct FakeSpeech {
        fail: bool,
    }

    #[async_trait]
    impl SpeechModel for FakeSpeech {
        async fn transcribe(&self, _media: Vec<u8>, _file_name: &str) -> Result<Transcript> {
            if self.fail {
                return Err(CodeMentorError::external_service("whisper down"));
            }
            Ok(Transcript {
                text: "Explicamos la clase Cuenta".to_string(),
                language: Some("es".to_string()),
                duration: 10.0,
                segments: vec![
                    TranscriptSegment {
                        start: 0.0,
                        end: 4.0,
                        text: "uno".to_string(),
                    },
                    TranscriptSegment {
                        start: 7.0,
                        end: 10.0,
                        text: "dos".to_string(),
                    },
                ],
            })
        }
    }

    struct Harness {
        storage: Arc<SeaOrmStorage>,
        blob: Arc<LocalBlobStore>,
        embedding: Arc<FakeEmbedding>,
        pipeline: EvaluationPipeline,
        _dir: tempfile::TempDir,
    }

    async fn harness(llm_reply: std::result::Result<&str, &str>, embed_fail: bool, speech_fail: bool) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(SeaOrmStorage::in_memory().await);
        let blob = Arc::new(LocalBlobStore::new(dir.path()).await.unwrap());
        let embedding = Arc::new(FakeEmbedding {
            vectors: HashMap::from([
                ("ALPHA", vec![1.0, 0.0, 0.0]),
                ("BETA", vec![0.99, 0.05, 0.0]),
                ("GAMMA", vec![0.0, 0.0, 1.0]),
            ]),
            calls: AtomicUsize::new(0),
            fail: embed_fail,
        });
        let clients = AiClients {
            llm: Arc::new(FakeLlm {
                reply: llm_reply.map(str::to_string).map_err(str::to_string),
            }),
            embedding: embedding.clone(),
            speech: Arc::new(FakeSpeech { fail: speech_fail }),
        };
        let pipeline = EvaluationPipeline::new(
            storage.clone(),
            blob.clone(),
            Arc::new(MokaCacheWrapper::with_settings(100, 60)),
            clients,
            Arc::new(ReferenceSet::empty()),
            PipelineSettings {
                cache_ttl: 60,
                ..PipelineSettings::default()
            },
        );
        Harness {
            storage,
            blob,
            embedding,
            pipeline,
            _dir: dir,
        }
    }

    async fn submission_with_code(h: &Harness, assignment_id: i64, code: &str) -> Submission {
        let submission = fixtures::submission(&h.storage, assignment_id, "EST001").await;
        let path = h
            .blob
            .put(
                "submissions",
                &format!("submissions/{0}/{0}_project.zip", submission.id),
                build_zip(&[("Program.cs", code)]),
                "application/zip",
            )
            .await
            .unwrap();
        h.storage
            .set_submission_paths(submission.id, Some(path), None)
            .await
            .unwrap()
            .unwrap()
    }

    const GOOD_REPLY: &str = r#"Result: {"comprehension_score": 20, "design_score": 15, "implementation_score": 4, "functionality_score": 25, "comprehension_feedback": "Solid"}"#;

    #[tokio::test]
    async fn test_evaluate_persists_scaled_grade() {
        let h = harness(Ok(GOOD_REPLY), false, false).await;
        let assignment = fixtures::assignment(&h.storage).await;
        let submission = submission_with_code(&h, assignment.id, "class ALPHA {}").await;

        let result = h.pipeline.evaluate(&submission, &assignment).await.unwrap();
        assert!(!result.used_fallback);
        assert!(result.error.is_none());
        assert_eq!(result.scores.comprehension, 4.0);
        assert_eq!(result.scores.design, 3.0);
        assert_eq!(result.scores.implementation, 4.0);
        assert_eq!(result.scores.functionality, 5.0);
        assert_eq!(result.total_score, 16.0);
        assert_eq!(result.feedback.comprehension, "Solid");
        assert!(result.warnings.is_empty());

        let grade = h.storage.get_grade_by_id(result.grade_id).await.unwrap().unwrap();
        assert_eq!(grade.status, GradeStatus::AutoGraded);
        assert_eq!(grade.ai_total_score, Some(16.0));
        assert_eq!(grade.student_id.as_deref(), Some("EST001"));

        let stored = h.storage.get_submission_by_id(submission.id).await.unwrap().unwrap();
        assert_eq!(stored.status, SubmissionStatus::Evaluated);

        let logs = h.storage.list_submission_logs(submission.id).await.unwrap();
        let steps: Vec<_> = logs
            .iter()
            .map(|l| format!("{}/{}", l.step, l.status))
            .collect();
        assert_eq!(
            steps,
            vec![
                "evaluation/started",
                "code_extraction/completed",
                "evaluation/completed"
            ]
        );
    }

    #[tokio::test]
    async fn test_evaluate_uses_fallback_when_llm_fails() {
        let h = harness(Err("connection refused"), false, false).await;
        let assignment = fixtures::assignment(&h.storage).await;
        let submission = submission_with_code(&h, assignment.id, "class ALPHA {}").await;

        let result = h.pipeline.evaluate(&submission, &assignment).await.unwrap();
        assert!(result.used_fallback);
        assert_eq!(result.total_score, 12.0);
        assert!(result.error.unwrap().contains("connection refused"));

        let logs = h.storage.list_submission_logs(submission.id).await.unwrap();
        assert!(logs.iter().any(|l| l.step == "llm" && l.status == "failed"));
    }

    #[tokio::test]
    async fn test_evaluate_unparseable_reply_falls_back() {
        let h = harness(Ok("I think it is fine"), false, false).await;
        let assignment = fixtures::assignment(&h.storage).await;
        let submission = submission_with_code(&h, assignment.id, "class ALPHA {}").await;

        let result = h.pipeline.evaluate(&submission, &assignment).await.unwrap();
        assert!(result.used_fallback);
        assert_eq!(result.scores.design, 3.0);
    }

    #[tokio::test]
    async fn test_evaluate_without_sources_uses_placeholder() {
        let h = harness(Ok(GOOD_REPLY), false, false).await;
        let assignment = fixtures::assignment(&h.storage).await;
        let submission = fixtures::submission(&h.storage, assignment.id, "EST001").await;
        let path = h
            .blob
            .put(
                "submissions",
                "submissions/x/readme.zip",
                build_zip(&[("README.md", "nothing")]),
                "application/zip",
            )
            .await
            .unwrap();
        let submission = h
            .storage
            .set_submission_paths(submission.id, Some(path), None)
            .await
            .unwrap()
            .unwrap();

        let result = h.pipeline.evaluate(&submission, &assignment).await.unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(!result.used_fallback);
    }

    #[tokio::test]
    async fn test_evaluate_oversized_text_does_not_hide_sources() {
        let mut h = harness(Ok(GOOD_REPLY), false, false).await;
        h.pipeline.settings.evaluation.max_extracted_bytes = 64;
        let assignment = fixtures::assignment(&h.storage).await;
        let submission = fixtures::submission(&h.storage, assignment.id, "EST001").await;
        let big = "x".repeat(500);
        let path = h
            .blob
            .put(
                "submissions",
                "submissions/big/project.zip",
                build_zip(&[("data.txt", big.as_str()), ("Program.cs", "class P{}")]),
                "application/zip",
            )
            .await
            .unwrap();
        let submission = h
            .storage
            .set_submission_paths(submission.id, Some(path), None)
            .await
            .unwrap()
            .unwrap();

        let result = h.pipeline.evaluate(&submission, &assignment).await.unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("some files were not evaluated"));

        // 只有超限文件时说明原因，而不是“没有源文件”
        let only_big = fixtures::submission(&h.storage, assignment.id, "EST001").await;
        let path = h
            .blob
            .put(
                "submissions",
                "submissions/big/only.zip",
                build_zip(&[("data.txt", big.as_str())]),
                "application/zip",
            )
            .await
            .unwrap();
        let only_big = h
            .storage
            .set_submission_paths(only_big.id, Some(path), None)
            .await
            .unwrap()
            .unwrap();
        let result = h.pipeline.evaluate(&only_big, &assignment).await.unwrap();
        assert!(result.warnings[0].contains("extraction size limit"));
    }

    #[tokio::test]
    async fn test_detect_flags_similar_pairs() {
        let h = harness(Ok(GOOD_REPLY), false, false).await;
        let assignment = fixtures::assignment(&h.storage).await;
        let a = submission_with_code(&h, assignment.id, "class ALPHA { int x; }").await;
        let b = submission_with_code(&h, assignment.id, "class BETA { int x; }").await;
        let _c = submission_with_code(&h, assignment.id, "class GAMMA { }").await;

        let result = h.pipeline.detect_plagiarism(assignment.id, None).await.unwrap();
        assert_eq!(result.compared, 3);
        assert!(result.error.is_none());
        assert_eq!(result.detections_found, 1);
        let detection = &result.detections[0];
        assert_eq!(detection.submission_id_1, a.id);
        assert_eq!(detection.submission_id_2, b.id);
        assert_eq!(detection.status, PlagiarismStatus::Suspicious);
        assert!(detection.similarity_score > 95.0 && detection.similarity_score <= 100.0);
        assert!(detection.structural_similarity.unwrap() > 0.0);

        // 第二次查重走缓存，并替换旧结果
        let calls = h.embedding.calls.load(Ordering::SeqCst);
        let again = h.pipeline.detect_plagiarism(assignment.id, None).await.unwrap();
        assert_eq!(again.detections_found, 1);
        assert_eq!(h.embedding.calls.load(Ordering::SeqCst), calls);
    }

    #[tokio::test]
    async fn test_detect_skips_submissions_without_archive() {
        let h = harness(Ok(GOOD_REPLY), false, false).await;
        let assignment = fixtures::assignment(&h.storage).await;
        submission_with_code(&h, assignment.id, "class ALPHA {}").await;
        let empty = fixtures::submission(&h.storage, assignment.id, "EST001").await;

        let result = h.pipeline.detect_plagiarism(assignment.id, None).await.unwrap();
        assert_eq!(result.compared, 1);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].submission_id, empty.id);
        assert!(result.detections.is_empty());
    }

    #[tokio::test]
    async fn test_detect_embedding_failure_persists_nothing() {
        let h = harness(Ok(GOOD_REPLY), true, false).await;
        let assignment = fixtures::assignment(&h.storage).await;
        submission_with_code(&h, assignment.id, "class ALPHA {}").await;
        submission_with_code(&h, assignment.id, "class BETA {}").await;

        let result = h.pipeline.detect_plagiarism(assignment.id, None).await.unwrap();
        assert!(result.error.unwrap().contains("embedding down"));
        assert_eq!(result.detections_found, 0);

        let stored = h
            .storage
            .list_detections_with_pagination(Default::default())
            .await
            .unwrap();
        assert!(stored.items.is_empty());
    }

    #[tokio::test]
    async fn test_detect_with_single_submission_is_empty() {
        let h = harness(Ok(GOOD_REPLY), false, false).await;
        let assignment = fixtures::assignment(&h.storage).await;
        submission_with_code(&h, assignment.id, "class ALPHA {}").await;

        let result = h.pipeline.detect_plagiarism(assignment.id, None).await.unwrap();
        assert_eq!(result.compared, 0);
        assert_eq!(h.embedding.calls.load(Ordering::SeqCst), 0);
    }

    async fn submission_with_video(h: &Harness, assignment_id: i64) -> Submission {
        let submission = fixtures::submission(&h.storage, assignment_id, "EST001").await;
        let path = h
            .blob
            .put("videos", "videos/1/1_demo.mp4", vec![0u8; 16], "video/mp4")
            .await
            .unwrap();
        h.storage
            .set_submission_paths(submission.id, None, Some(path))
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_analyze_video() {
        let h = harness(Ok("Good explanation"), false, false).await;
        let assignment = fixtures::assignment(&h.storage).await;
        let submission = submission_with_video(&h, assignment.id).await;

        let result = h.pipeline.analyze_video(&submission, &assignment).await.unwrap();
        assert!(result.error.is_none());
        assert_eq!(result.analysis.as_deref(), Some("Good explanation"));
        assert_eq!(result.duration, Some(10.0));
        let participation = result.participation.unwrap();
        assert_eq!(participation.num_speakers_detected, 2);
        assert_eq!(participation.speaker_times[0].percentage, 40.0);

        let logs = h.storage.list_submission_logs(submission.id).await.unwrap();
        let completed = logs.last().unwrap();
        assert_eq!(completed.status, "completed");
        assert_eq!(completed.details.as_ref().unwrap()["speakers"], 2);
    }

    #[tokio::test]
    async fn test_analyze_video_llm_failure_keeps_transcript() {
        let h = harness(Err("timeout"), false, false).await;
        let assignment = fixtures::assignment(&h.storage).await;
        let submission = submission_with_video(&h, assignment.id).await;

        let result = h.pipeline.analyze_video(&submission, &assignment).await.unwrap();
        assert!(result.transcription.is_some());
        assert!(result.participation.is_some());
        assert!(result.analysis.is_none());
        assert!(result.error.unwrap().contains("timeout"));
    }

    #[tokio::test]
    async fn test_analyze_video_transcription_failure() {
        let h = harness(Ok("unused"), false, true).await;
        let assignment = fixtures::assignment(&h.storage).await;
        let submission = submission_with_video(&h, assignment.id).await;

        let result = h.pipeline.analyze_video(&submission, &assignment).await.unwrap();
        assert!(result.transcription.is_none());
        assert!(result.participation.is_none());
        assert!(result.error.unwrap().contains("whisper down"));
    }

    #[tokio::test]
    async fn test_analyze_video_requires_video() {
        let h = harness(Ok("unused"), false, false).await;
        let assignment = fixtures::assignment(&h.storage).await;
        let submission = fixtures::submission(&h.storage, assignment.id, "EST001").await;

        let err = h
            .pipeline
            .analyze_video(&submission, &assignment)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E008");
    }
}
