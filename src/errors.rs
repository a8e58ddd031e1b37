//! 统一错误处理模块
//!
//! 错误类型由宏生成，每个变体都带有错误代码、类型名称和详情。

use std::fmt;

/// 定义错误类型的宏
///
/// 生成 enum、`code()`、`error_type()`、`message()` 以及蛇形命名的构造函数。
macro_rules! define_codementor_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CodeMentorError {
            $($variant(String),)*
        }

        impl CodeMentorError {
            /// 错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CodeMentorError::$variant(_) => $code,)*
                }
            }

            /// 错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CodeMentorError::$variant(_) => $type_name,)*
                }
            }

            /// 错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CodeMentorError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl CodeMentorError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CodeMentorError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_codementor_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    BlobStore("E010", "Blob Store Error"),
    DateParse("E011", "Date Parse Error"),
    Archive("E012", "Archive Error"),
    ExternalService("E013", "External Service Error"),
}

impl CodeMentorError {
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CodeMentorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CodeMentorError {}

impl From<sea_orm::DbErr> for CodeMentorError {
    fn from(err: sea_orm::DbErr) -> Self {
        CodeMentorError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CodeMentorError {
    fn from(err: std::io::Error) -> Self {
        CodeMentorError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CodeMentorError {
    fn from(err: serde_json::Error) -> Self {
        CodeMentorError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for CodeMentorError {
    fn from(err: chrono::ParseError) -> Self {
        CodeMentorError::DateParse(err.to_string())
    }
}

impl From<zip::result::ZipError> for CodeMentorError {
    fn from(err: zip::result::ZipError) -> Self {
        CodeMentorError::Archive(err.to_string())
    }
}

impl From<reqwest::Error> for CodeMentorError {
    fn from(err: reqwest::Error) -> Self {
        CodeMentorError::ExternalService(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CodeMentorError>;
