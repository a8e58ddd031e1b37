use tokio::signal;
use tracing::{error, warn};

/// 等待 Ctrl+C；评测请求是同步的，进行中的请求由 actix 的优雅关闭处理
pub async fn listen_for_shutdown() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received, stopping server");
}
