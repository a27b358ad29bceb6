//! ipstack API 实现
//!
//! 每次调用对外部 ipstack API 发起一个 HTTP GET。
//! 没有重试、没有缓存：一次传入请求最多产生一次外呼，
//! 任何失败原样上抛为 Provider 错误。

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use tracing::trace;
use ureq::Agent;

use super::provider::{Coordinates, GeoLookup};
use crate::errors::{IpLocatorError, Result};

/// HTTP 请求超时时间
const HTTP_TIMEOUT_SECS: u64 = 10;

/// 只请求需要的字段，减小响应体
const RESPONSE_FIELDS: &str = "latitude,longitude";

/// 全局 HTTP Agent（ureq 的 Agent 是 Send + Sync，内部复用连接）
static HTTP_AGENT: OnceLock<Agent> = OnceLock::new();

fn get_agent() -> &'static Agent {
    HTTP_AGENT.get_or_init(|| {
        Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(HTTP_TIMEOUT_SECS)))
            .build()
            .into()
    })
}

/// ipstack API 客户端
///
/// 构造一次，整个进程生命周期内复用；不持有任何 per-call 可变状态，
/// 可以被并发的请求共享。
pub struct IpStackClient {
    base_url: String,
    access_key: String,
}

impl IpStackClient {
    pub fn new(base_url: &str, access_key: &str) -> Self {
        Self {
            // 统一成带一个结尾斜杠的形式
            base_url: format!("{}/", base_url.trim_end_matches('/')),
            access_key: access_key.to_string(),
        }
    }

    /// 拼出单次查询的完整 URL（query 作为转义后的路径段）
    fn request_url(&self, query: &str) -> String {
        format!(
            "{}{}?access_key={}&fields={}",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(&self.access_key),
            RESPONSE_FIELDS
        )
    }

    /// 同步发起请求并校验响应（在 spawn_blocking 中调用）
    ///
    /// ureq 默认把非 2xx 状态码当作 Err，所以传输失败和错误状态
    /// 走同一条路径；响应体缺字段或类型不对在反序列化时失败。
    fn fetch_sync(url: String) -> Result<Coordinates> {
        let agent = get_agent();

        let resp = agent
            .get(&url)
            .call()
            .map_err(|e| IpLocatorError::provider(format!("Request error: {}", e)))?;

        resp.into_body()
            .read_json::<Coordinates>()
            .map_err(|e| IpLocatorError::provider(format!("Validation error: {}", e)))
    }
}

#[async_trait]
impl GeoLookup for IpStackClient {
    async fn fetch_location(&self, query: &str) -> Result<Coordinates> {
        trace!("Fetching location for \"{}\" from ipstack", query);
        let url = self.request_url(query);

        // 同步 HTTP 请求放到阻塞线程池执行
        tokio::task::spawn_blocking(move || Self::fetch_sync(url))
            .await
            .map_err(|e| IpLocatorError::provider(format!("Lookup task failed: {}", e)))?
    }

    fn name(&self) -> &'static str {
        "ipstack"
    }
}
