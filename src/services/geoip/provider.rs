//! GeoIP Provider 抽象层
//!
//! 统一的地理位置查询接口。生产环境由 [`IpStackClient`] 实现，
//! 测试中可以注入任意 [`GeoLookup`] 实现。

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use super::ipstack::IpStackClient;
use crate::errors::Result;
use crate::system::app_config::ProviderConfig;

/// 经纬度坐标
///
/// Deserialization doubles as the provider response schema check: a body
/// with missing, null or non-numeric latitude/longitude fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// 地理位置查询 trait
#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// 查询一个 IP 地址或主机名的坐标
    async fn fetch_location(&self, query: &str) -> Result<Coordinates>;

    /// 获取 provider 名称（用于日志）
    fn name(&self) -> &'static str;
}

/// 统一 GeoIP Provider
///
/// 进程启动时构造一次，通过 `web::Data` 共享给所有请求。
pub struct GeoProvider {
    inner: Arc<dyn GeoLookup>,
}

impl GeoProvider {
    /// 根据 ProviderConfig 初始化
    pub fn new(config: &ProviderConfig) -> Self {
        let inner: Arc<dyn GeoLookup> =
            Arc::new(IpStackClient::new(&config.api_url, &config.access_key));
        info!("GeoIP: Initialized with {} provider", inner.name());
        Self { inner }
    }

    /// 使用给定的实现构造（测试注入点）
    pub fn with_lookup(inner: Arc<dyn GeoLookup>) -> Self {
        Self { inner }
    }

    /// 查询一个 IP 地址或主机名的坐标
    pub async fn fetch_location(&self, query: &str) -> Result<Coordinates> {
        self.inner.fetch_location(query).await
    }

    /// 获取当前使用的 provider 名称
    pub fn provider_name(&self) -> &'static str {
        self.inner.name()
    }
}

impl Clone for GeoProvider {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
