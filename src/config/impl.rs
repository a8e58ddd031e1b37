use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            .add_source(
                Environment::with_prefix("CODEMENTOR")
                    .separator("_")
                    .try_parsing(true),
            );

        // 常用环境变量覆盖
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("cache.redis.url", std::env::var("REDIS_URL").ok())?
            .set_override_option("llm.url", std::env::var("OLLAMA_URL").ok())?
            .set_override_option("llm.model", std::env::var("OLLAMA_MODEL").ok())?
            .set_override_option("embedding.url", std::env::var("EMBEDDING_URL").ok())?
            .set_override_option("embedding.model", std::env::var("EMBEDDING_MODEL").ok())?
            .set_override_option(
                "embedding.similarity_threshold",
                std::env::var("SIMILARITY_THRESHOLD").ok(),
            )?
            .set_override_option("speech.url", std::env::var("WHISPER_URL").ok())?
            .set_override_option("speech.model", std::env::var("WHISPER_MODEL").ok())?
            .set_override_option("blob.endpoint", std::env::var("S3_ENDPOINT").ok())?
            .set_override_option("blob.access_key", std::env::var("S3_ACCESS_KEY").ok())?
            .set_override_option("blob.secret_key", std::env::var("S3_SECRET_KEY").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置（启动时调用）
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_file() {
        let config = AppConfig::load().expect("config.toml should load");
        assert!(config.server.workers >= 1);
        assert_eq!(config.evaluation.reference_limit, 3);
        assert!(
            config
                .evaluation
                .source_extensions
                .iter()
                .any(|e| e == ".cs")
        );
    }

    #[test]
    fn test_bind_address() {
        let config = AppConfig::load().expect("config.toml should load");
        let addr = config.server_bind_address();
        assert!(addr.ends_with(&format!(":{}", config.server.port)));
    }
}
