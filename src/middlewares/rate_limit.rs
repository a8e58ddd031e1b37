/*!
 * 速率限制中间件
 *
 * 评测、视频分析和查重都会同步调用模型服务，耗时且占用 GPU，
 * 因此按客户端 IP 在固定时间窗口内计数。
 *
 * ```rust,ignore
 * web::resource("/{id}/evaluate")
 *     .wrap(RateLimit::evaluation())
 *     .route(web::post().to(evaluate_submission))
 * ```
 *
 * 超过限制返回 429，并带上 `Retry-After`。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode};

/// 计数缓存，键为 `前缀:ip:窗口序号`
static RATE_LIMIT_CACHE: Lazy<Cache<String, u32>> = Lazy::new(|| {
    Cache::builder()
        // 窗口最长一小时，过期的计数自然淘汰
        .time_to_live(Duration::from_secs(3600))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    key_prefix: String,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs: window_secs.clamp(1, 3600),
            key_prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// 代码评测：10 次/分钟/IP
    pub fn evaluation() -> Self {
        Self::new(10, 60).with_prefix("evaluate")
    }

    /// 视频分析：5 次/分钟/IP
    pub fn video_analysis() -> Self {
        Self::new(5, 60).with_prefix("analyze_video")
    }

    /// 查重：3 次/分钟/IP，一次会比较整份作业
    pub fn plagiarism() -> Self {
        Self::new(3, 60).with_prefix("plagiarism")
    }
}

/// 客户端 IP，优先连接信息，其次代理头
fn extract_client_ip(req: &ServiceRequest) -> String {
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    if let Some(ref ip) = connection_ip
        && ip.parse::<IpAddr>().is_ok()
    {
        return ip.clone();
    }

    for header in ["X-Forwarded-For", "X-Real-IP"] {
        if let Some(value) = req.headers().get(header)
            && let Ok(value) = value.to_str()
            && let Some(ip) = value.split(',').next().map(str::trim)
            && ip.parse::<IpAddr>().is_ok()
        {
            return ip.to_string();
        }
    }

    connection_ip.unwrap_or_else(|| "unknown".to_string())
}

fn window_key(prefix: &str, ip: &str, now_secs: u64, window_secs: u64) -> String {
    let window = now_secs / window_secs.max(1);
    if prefix.is_empty() {
        format!("{ip}:{window}")
    } else {
        format!("{prefix}:{ip}:{window}")
    }
}

/// 距离当前窗口结束的秒数
fn retry_after(now_secs: u64, window_secs: u64) -> u64 {
    let window_secs = window_secs.max(1);
    window_secs - now_secs % window_secs
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "请求过于频繁，请稍后再试",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let limit = self.limit.clone();

        Box::pin(async move {
            let now = unix_now();
            let ip = extract_client_ip(&req);
            let cache_key = window_key(&limit.key_prefix, &ip, now, limit.window_secs);

            let current = RATE_LIMIT_CACHE.get(&cache_key).await.unwrap_or(0);
            if current >= limit.max_requests {
                warn!(
                    "Rate limit exceeded for {} ({}/{})",
                    cache_key, current, limit.max_requests
                );
                let response = create_rate_limit_response(retry_after(now, limit.window_secs));
                return Ok(req.into_response(response.map_into_right_body()));
            }
            RATE_LIMIT_CACHE.insert(cache_key, current + 1).await;

            let res = srv.call(req).await?.map_into_left_body();
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test, web};

    #[::core::prelude::v1::test]
    fn test_presets() {
        let evaluation = RateLimit::evaluation();
        assert_eq!(evaluation.max_requests, 10);
        assert_eq!(evaluation.window_secs, 60);
        assert_eq!(evaluation.key_prefix, "evaluate");
        assert_eq!(RateLimit::plagiarism().max_requests, 3);
        assert_eq!(RateLimit::video_analysis().key_prefix, "analyze_video");
    }

    #[::core::prelude::v1::test]
    fn test_window_key_and_retry_after() {
        assert_eq!(window_key("evaluate", "10.0.0.1", 125, 60), "evaluate:10.0.0.1:2");
        assert_eq!(window_key("", "10.0.0.1", 59, 60), "10.0.0.1:0");
        assert_eq!(retry_after(125, 60), 55);
        assert_eq!(retry_after(120, 60), 60);
    }

    #[actix_web::test]
    async fn test_blocks_after_limit() {
        let app = test::init_service(
            App::new().service(
                web::resource("/work")
                    .wrap(RateLimit::new(2, 3600).with_prefix("test_blocks"))
                    .route(web::post().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;

        let call = |ip: &'static str| {
            test::TestRequest::post()
                .uri("/work")
                .peer_addr(format!("{ip}:4000").parse().unwrap())
                .to_request()
        };

        assert!(test::call_service(&app, call("192.0.2.10")).await.status().is_success());
        assert!(test::call_service(&app, call("192.0.2.10")).await.status().is_success());
        let blocked = test::call_service(&app, call("192.0.2.10")).await;
        assert_eq!(blocked.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(blocked.headers().contains_key("Retry-After"));

        // 其他 IP 不受影响
        assert!(test::call_service(&app, call("192.0.2.11")).await.status().is_success());
    }
}
