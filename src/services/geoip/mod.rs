//! GeoIP 服务模块
//!
//! 通过外部 ipstack API 将 IP 地址或主机名解析为经纬度坐标。

mod ipstack;
mod provider;

pub use ipstack::IpStackClient;
pub use provider::{Coordinates, GeoLookup, GeoProvider};
