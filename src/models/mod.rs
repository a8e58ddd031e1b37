//! 业务数据模型
//!
//! 每个资源按 `entities` / `requests` / `responses` 划分，并通过 ts-rs 导出前端类型。

pub mod assignments;
pub mod common;
pub mod evaluation;
pub mod feedback;
pub mod grades;
pub mod instructors;
pub mod plagiarism;
pub mod sections;
pub mod students;
pub mod submissions;
pub mod system;

pub use common::{ApiResponse, PaginationInfo, PaginationQuery};

/// 接口业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 文件
    FileUploadFailed = 2000,
    FileTypeNotAllowed = 2001,
    FileSizeExceeded = 2002,
    FileNotFound = 2003,
    MultifileUploadNotAllowed = 2004,

    // 作业
    AssignmentNotFound = 3000,
    AssignmentHasSubmissions = 3001,

    // 教学班与人员
    SectionNotFound = 4000,
    SectionAlreadyExists = 4001,
    StudentNotFound = 4010,
    StudentAlreadyExists = 4011,
    InstructorNotFound = 4020,
    InstructorAlreadyExists = 4021,

    // 提交与评测
    SubmissionNotFound = 5000,
    VideoNotFound = 5001,
    ProjectNotFound = 5002,
    EvaluationFailed = 5003,

    // 评分与反馈
    GradeNotFound = 6000,
    InvalidScore = 6001,
    FeedbackNotFound = 6010,

    // 查重
    PlagiarismNotFound = 7000,
    InvalidPlagiarismStatus = 7001,

    // 外部依赖
    BlobStoreError = 8000,
}

/// 程序启动时间，用于计算运行时长
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 为字符串状态枚举生成 `as_str`、`Display`、`FromStr` 与 `Deserialize`
#[macro_export]
macro_rules! string_enum {
    ($name:ident, $label:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(format!(
                        "无效的{}: '{}'. 支持: {}",
                        $label,
                        s,
                        [$($text),+].join(", ")
                    )),
                }
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}
