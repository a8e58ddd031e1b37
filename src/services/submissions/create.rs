use actix_multipart::{Field, Multipart};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::collections::HashMap;
use std::sync::Arc;

use super::SubmissionService;
use crate::blob::{BlobStore, object_key};
use crate::config::AppConfig;
use crate::models::submissions::requests::NewSubmission;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, shared};
use crate::storage::Storage;
use crate::utils::validate::validate_code;
use crate::utils::{MAGIC_HEADER_LEN, file_extension, validate_magic_bytes};

// 普通文本字段的最大长度
const MAX_TEXT_FIELD: usize = 1024;

/// 表单中的一个文件
#[derive(Debug)]
pub(crate) struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// 单个文件字段的校验规则
struct FileRule<'a> {
    extensions: &'a [String],
    max_size: usize,
    label: &'a str,
}

fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

fn not_found(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

/// 边接收边校验的文件内容缓冲
///
/// 头部攒够 `MAGIC_HEADER_LEN` 字节后才校验魔术字节，分片再小也不会误判。
struct FileBuffer<'r> {
    rule: &'r FileRule<'r>,
    extension: String,
    data: Vec<u8>,
    magic_checked: bool,
}

impl<'r> FileBuffer<'r> {
    fn new(rule: &'r FileRule<'r>, extension: String) -> Self {
        Self {
            rule,
            extension,
            data: Vec::new(),
            magic_checked: false,
        }
    }

    fn push(&mut self, chunk: &[u8]) -> Result<(), HttpResponse> {
        if self.data.len() + chunk.len() > self.rule.max_size {
            return Err(bad_request(
                ErrorCode::FileSizeExceeded,
                format!("{}超过大小限制 {} 字节", self.rule.label, self.rule.max_size),
            ));
        }
        self.data.extend_from_slice(chunk);

        if !self.magic_checked && self.data.len() >= MAGIC_HEADER_LEN {
            self.check_magic()?;
        }
        Ok(())
    }

    fn check_magic(&mut self) -> Result<(), HttpResponse> {
        self.magic_checked = true;
        if validate_magic_bytes(&self.data, &self.extension) {
            Ok(())
        } else {
            Err(bad_request(
                ErrorCode::FileTypeNotAllowed,
                format!("{}内容与扩展名不匹配", self.rule.label),
            ))
        }
    }

    fn finish(mut self) -> Result<Vec<u8>, HttpResponse> {
        if self.data.is_empty() {
            return Err(bad_request(
                ErrorCode::FileNotFound,
                format!("{}为空", self.rule.label),
            ));
        }
        // 整个文件比头部还短
        if !self.magic_checked {
            self.check_magic()?;
        }
        Ok(self.data)
    }
}

/// 读取文件字段，边读边校验魔术字节和大小
async fn read_file(field: &mut Field, rule: &FileRule<'_>) -> Result<UploadedFile, HttpResponse> {
    let file_name = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .map(|s| s.to_string())
        .unwrap_or_default();

    let extension = file_extension(&file_name).unwrap_or_default();
    if !rule.extensions.iter().any(|e| e.eq_ignore_ascii_case(&extension)) {
        return Err(bad_request(
            ErrorCode::FileTypeNotAllowed,
            format!("{}格式不支持，允许: {}", rule.label, rule.extensions.join(", ")),
        ));
    }

    let content_type = field
        .content_type()
        .map(|ct| ct.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let mut buffer = FileBuffer::new(rule, extension);
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| {
            bad_request(ErrorCode::FileUploadFailed, format!("读取上传内容失败: {e}"))
        })?;
        buffer.push(&chunk)?;
    }

    Ok(UploadedFile {
        file_name,
        content_type,
        data: buffer.finish()?,
    })
}

async fn read_text(field: &mut Field) -> Result<String, HttpResponse> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk
            .map_err(|e| bad_request(ErrorCode::BadRequest, format!("读取表单失败: {e}")))?;
        if data.len() + chunk.len() > MAX_TEXT_FIELD {
            return Err(bad_request(ErrorCode::BadRequest, "表单字段过长"));
        }
        data.extend_from_slice(&chunk);
    }
    String::from_utf8(data).map_err(|_| bad_request(ErrorCode::BadRequest, "表单字段不是 UTF-8"))
}

/// 从文本字段构造提交记录
pub(crate) fn parse_form(fields: &HashMap<String, String>) -> Result<NewSubmission, String> {
    fn get<'a>(fields: &'a HashMap<String, String>, name: &str) -> Result<&'a str, String> {
        fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| format!("缺少字段 {name}"))
    }

    let assignment_id = get(fields, "assignment_id")?
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or("assignment_id 必须是正整数")?;
    let group_number = get(fields, "group_number")?
        .parse::<i32>()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or("group_number 必须是正整数")?;

    let section_id = get(fields, "section_id")?;
    validate_code(section_id).map_err(|e| format!("section_id 无效: {e}"))?;
    let submitted_by = get(fields, "submitted_by")?;
    validate_code(submitted_by).map_err(|e| format!("submitted_by 无效: {e}"))?;

    Ok(NewSubmission {
        assignment_id,
        section_id: section_id.to_string(),
        group_number,
        submitted_by: submitted_by.to_string(),
    })
}

/// 确认作业、教学班和提交人存在
async fn check_references(
    storage: &Arc<dyn Storage>,
    submission: &NewSubmission,
) -> Result<(), HttpResponse> {
    match storage.get_assignment_by_id(submission.assignment_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(not_found(ErrorCode::AssignmentNotFound, "作业不存在")),
        Err(e) => return Err(internal_error("查询作业失败", e)),
    }
    match storage.get_section_by_id(&submission.section_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(not_found(ErrorCode::SectionNotFound, "教学班不存在")),
        Err(e) => return Err(internal_error("查询教学班失败", e)),
    }
    match storage.get_student_by_id(&submission.submitted_by).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(not_found(ErrorCode::StudentNotFound, "提交人不存在")),
        Err(e) => Err(internal_error("查询学生失败", e)),
    }
}

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let archive_rule = FileRule {
        extensions: &config.upload.archive_extensions,
        max_size: config.upload.max_archive_size,
        label: "代码压缩包",
    };
    let video_rule = FileRule {
        extensions: &config.upload.video_extensions,
        max_size: config.upload.max_video_size,
        label: "视频",
    };

    let mut fields = HashMap::new();
    let mut project: Option<UploadedFile> = None;
    let mut video: Option<UploadedFile> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        let result = match name.as_str() {
            "project_file" | "video_file" => {
                let (slot, rule) = if name == "project_file" {
                    (&mut project, &archive_rule)
                } else {
                    (&mut video, &video_rule)
                };
                if slot.is_some() {
                    return Ok(bad_request(
                        ErrorCode::MultifileUploadNotAllowed,
                        format!("{} 只能上传一个文件", name),
                    ));
                }
                read_file(&mut field, rule).await.map(|file| {
                    *slot = Some(file);
                })
            }
            "assignment_id" | "section_id" | "group_number" | "submitted_by" => {
                read_text(&mut field).await.map(|value| {
                    fields.insert(name.clone(), value);
                })
            }
            // 未知字段直接丢弃
            _ => {
                while let Some(chunk) = field.next().await {
                    chunk?;
                }
                Ok(())
            }
        };
        if let Err(response) = result {
            return Ok(response);
        }
    }

    let new_submission = match parse_form(&fields) {
        Ok(submission) => submission,
        Err(msg) => return Ok(bad_request(ErrorCode::ValidationFailed, msg)),
    };
    let Some(project) = project else {
        return Ok(bad_request(ErrorCode::FileNotFound, "缺少代码压缩包 project_file"));
    };

    let storage = service.get_storage(request);
    if let Err(response) = check_references(&storage, &new_submission).await {
        return Ok(response);
    }

    let submission = match storage.create_submission(new_submission).await {
        Ok(submission) => submission,
        Err(e) => return Ok(internal_error("创建提交失败", e)),
    };
    let submission_id = submission.id;

    let blob = shared::<Arc<dyn BlobStore>>(request);
    let buckets = &config.blob;
    let mut uploaded: Vec<String> = Vec::new();
    let mut upload_error = None;

    for (file, bucket, prefix) in [
        (Some(project), &buckets.submissions_bucket, "submissions"),
        (video, &buckets.videos_bucket, "videos"),
    ] {
        let Some(file) = file else { continue };
        let key = object_key(prefix, submission_id, &file.file_name);
        match blob.put(bucket, &key, file.data, &file.content_type).await {
            Ok(path) => uploaded.push(path),
            Err(e) => {
                upload_error = Some(e);
                break;
            }
        }
    }

    // 上传失败时回滚已上传的对象和提交记录
    if let Some(e) = upload_error {
        tracing::error!("Upload for submission {} failed: {}", submission_id, e);
        for path in &uploaded {
            if let Err(e) = blob.delete(path).await {
                tracing::warn!("Failed to remove {} during rollback: {}", path, e);
            }
        }
        if let Err(e) = storage.remove_submission(submission_id).await {
            tracing::warn!("Failed to remove submission {}: {}", submission_id, e);
        }
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                format!("文件上传失败: {e}"),
            )),
        );
    }

    let mut paths = uploaded.into_iter();
    let project_path = paths.next();
    let video_path = paths.next();

    match storage
        .set_submission_paths(submission_id, project_path, video_path)
        .await
    {
        Ok(Some(submission)) => {
            tracing::info!(
                "Submission {} stored for assignment {}",
                submission.id,
                submission.assignment_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(submission, "提交成功")))
        }
        Ok(None) => Ok(internal_error("记录文件路径失败", "提交已不存在")),
        Err(e) => Ok(internal_error("记录文件路径失败", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_form_valid() {
        let fields = form(&[
            ("assignment_id", "3"),
            ("section_id", "SEC001"),
            ("group_number", " 2 "),
            ("submitted_by", "EST001"),
        ]);
        let submission = parse_form(&fields).unwrap();
        assert_eq!(submission.assignment_id, 3);
        assert_eq!(submission.group_number, 2);
        assert_eq!(submission.section_id, "SEC001");
        assert_eq!(submission.submitted_by, "EST001");
    }

    #[test]
    fn test_parse_form_missing_field() {
        let fields = form(&[("assignment_id", "3"), ("section_id", "SEC001")]);
        assert!(parse_form(&fields).unwrap_err().contains("group_number"));
    }

    #[test]
    fn test_parse_form_rejects_bad_numbers() {
        let fields = form(&[
            ("assignment_id", "abc"),
            ("section_id", "SEC001"),
            ("group_number", "1"),
            ("submitted_by", "EST001"),
        ]);
        assert!(parse_form(&fields).unwrap_err().contains("assignment_id"));

        let fields = form(&[
            ("assignment_id", "1"),
            ("section_id", "SEC001"),
            ("group_number", "0"),
            ("submitted_by", "EST001"),
        ]);
        assert!(parse_form(&fields).unwrap_err().contains("group_number"));
    }

    fn video_rule(extensions: &[String]) -> FileRule<'_> {
        FileRule {
            extensions,
            max_size: 64,
            label: "视频",
        }
    }

    #[test]
    fn test_file_buffer_waits_for_full_header() {
        let extensions = vec![".mp4".to_string(), ".avi".to_string()];
        let rule = video_rule(&extensions);

        // mp4 头部被拆成 3 + 5 + 4 字节
        let mut buffer = FileBuffer::new(&rule, ".mp4".to_string());
        let chunks: [&[u8]; 3] = [&[0x00, 0x00, 0x00], &[0x20, b'f', b't', b'y', b'p'], b"isom"];
        for chunk in chunks {
            assert!(buffer.push(chunk).is_ok());
        }
        assert_eq!(buffer.finish().unwrap().len(), 12);

        let mut buffer = FileBuffer::new(&rule, ".avi".to_string());
        let chunks: [&[u8]; 4] = [b"RIFF", &[0x10, 0, 0, 0], b"AVI ", b"LIST"];
        for chunk in chunks {
            assert!(buffer.push(chunk).is_ok());
        }
        assert_eq!(buffer.finish().unwrap().len(), 16);
    }

    #[test]
    fn test_file_buffer_rejects_bad_content() {
        let extensions = vec![".mp4".to_string()];
        let rule = video_rule(&extensions);

        let mut buffer = FileBuffer::new(&rule, ".mp4".to_string());
        assert!(buffer.push(b"not a video").is_ok());
        let err = buffer.push(b" at all").unwrap_err();
        assert_eq!(err.status(), actix_web::http::StatusCode::BAD_REQUEST);

        // 比头部还短的文件在结束时校验
        let mut buffer = FileBuffer::new(&rule, ".mp4".to_string());
        buffer.push(b"tiny").unwrap();
        assert!(buffer.finish().is_err());

        let mut buffer = FileBuffer::new(&rule, ".mp4".to_string());
        assert!(buffer.push(&[0u8; 65]).is_err());

        assert!(FileBuffer::new(&rule, ".mp4".to_string()).finish().is_err());
    }

    #[test]
    fn test_parse_form_rejects_bad_codes() {
        let fields = form(&[
            ("assignment_id", "1"),
            ("section_id", "SEC 001"),
            ("group_number", "1"),
            ("submitted_by", "EST001"),
        ]);
        assert!(parse_form(&fields).unwrap_err().contains("section_id"));
    }
}
