use chrono::{DateTime, Utc};

use crate::services::geoip::Coordinates;

/// 一条按 IP 归档的位置记录
///
/// `id` is assigned by the store at insertion and is `None` until then.
/// The store never writes back into a record, so one value can safely be
/// reused across several insert calls.
#[derive(Debug, Clone, PartialEq)]
pub struct IpLocationRecord {
    pub id: Option<i32>,
    pub ip: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
}

/// 一条按主机名归档的位置记录
#[derive(Debug, Clone, PartialEq)]
pub struct HostnameLocationRecord {
    pub id: Option<i32>,
    pub hostname: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
}

impl IpLocationRecord {
    pub fn new(ip: &str, coords: Coordinates, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: None,
            ip: ip.to_string(),
            latitude: coords.latitude,
            longitude: coords.longitude,
            timestamp,
        }
    }
}

impl HostnameLocationRecord {
    pub fn new(hostname: &str, coords: Coordinates, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: None,
            hostname: hostname.to_string(),
            latitude: coords.latitude,
            longitude: coords.longitude,
            timestamp,
        }
    }
}
