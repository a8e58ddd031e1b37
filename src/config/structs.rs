use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub cors: CorsConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub blob: BlobConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub evaluation: EvaluationConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// 超时配置（毫秒 / 秒）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

/// 缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(rename = "type")]
    pub cache_type: String,
    pub default_ttl: u64,
    pub redis: RedisConfig,
    pub memory: MemoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    pub key_prefix: String,
    pub pool_size: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    pub max_capacity: u64,
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub max_age: usize,
}

/// 上传配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub max_archive_size: usize,
    pub max_video_size: usize,
    pub archive_extensions: Vec<String>,
    pub video_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_archive_size: 100 * 1024 * 1024,
            max_video_size: 500 * 1024 * 1024,
            archive_extensions: vec![".zip".into()],
            video_extensions: [".mp4", ".webm", ".mov", ".mkv", ".avi"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// 对象存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlobConfig {
    /// `s3` 或 `local`
    #[serde(rename = "type")]
    pub blob_type: String,
    pub endpoint: String,
    #[serde(skip_serializing)]
    pub access_key: String,
    #[serde(skip_serializing)]
    pub secret_key: String,
    pub region: String,
    pub path_style: bool,
    pub submissions_bucket: String,
    pub videos_bucket: String,
    pub local_dir: String,
    /// 预签名下载链接有效期（秒）
    pub presign_expiry: u64,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            blob_type: "local".into(),
            endpoint: "http://127.0.0.1:9000".into(),
            access_key: String::new(),
            secret_key: String::new(),
            region: "us-east-1".into(),
            path_style: true,
            submissions_bucket: "submissions".into(),
            videos_bucket: "videos".into(),
            local_dir: "uploads".into(),
            presign_expiry: 3600,
        }
    }
}

/// 大语言模型服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub url: String,
    pub model: String,
    /// 请求超时（秒）
    pub timeout: u64,
    /// 提示词中代码的最大字符数
    pub code_limit: usize,
    /// 提示词中作业要求的最大字符数
    pub requirements_limit: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:11434".into(),
            model: "llama3.1:8b".into(),
            timeout: 600,
            code_limit: 6000,
            requirements_limit: 1500,
        }
    }
}

/// 代码向量模型配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub url: String,
    pub model: String,
    pub timeout: u64,
    pub max_input_chars: usize,
    pub similarity_threshold: f64,
    pub suspicious_threshold: f64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:11434".into(),
            model: "nomic-embed-text".into(),
            timeout: 120,
            max_input_chars: 8000,
            similarity_threshold: 0.85,
            suspicious_threshold: 0.95,
        }
    }
}

/// 语音转写服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub url: String,
    pub model: String,
    pub language: String,
    pub timeout: u64,
    /// 超过该间隔（秒）视为换人发言
    pub speaker_gap_secs: f64,
    pub extract_audio: bool,
    pub ffmpeg_path: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:9001".into(),
            model: "whisper-1".into(),
            language: "es".into(),
            timeout: 900,
            speaker_gap_secs: 2.0,
            extract_audio: false,
            ffmpeg_path: "ffmpeg".into(),
        }
    }
}

/// 评测流水线配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub source_extensions: Vec<String>,
    pub max_archive_entries: usize,
    pub max_extracted_bytes: usize,
    /// 历史评分样例 JSONL 路径，留空表示不加载
    pub reference_dataset: String,
    pub reference_limit: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            source_extensions: [
                ".cs", ".py", ".java", ".js", ".ts", ".cpp", ".c", ".h", ".txt",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            max_archive_entries: 2000,
            max_extracted_bytes: 5 * 1024 * 1024,
            reference_dataset: String::new(),
            reference_limit: 3,
        }
    }
}
