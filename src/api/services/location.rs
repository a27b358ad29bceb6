use std::sync::Arc;

use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info, trace};

use crate::services::GeoProvider;
use crate::storage::{HostnameLocationRecord, IpLocationRecord, SeaOrmStorage};
use crate::utils::resolve_hostname;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AddLocationForIpRequest {
    pub ip: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AddLocationForUrlRequest {
    pub url: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct IpQuery {
    pub ip: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct UrlQuery {
    pub url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LocationEntry {
    pub latitude: f64,
    pub longitude: f64,
    /// RFC3339, 始终带 UTC 偏移
    pub timestamp: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LocationsResponse {
    pub locations: Vec<LocationEntry>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&IpLocationRecord> for LocationEntry {
    fn from(record: &IpLocationRecord) -> Self {
        Self {
            latitude: record.latitude,
            longitude: record.longitude,
            timestamp: record.timestamp.to_rfc3339(),
        }
    }
}

impl From<&HostnameLocationRecord> for LocationEntry {
    fn from(record: &HostnameLocationRecord) -> Self {
        Self {
            latitude: record.latitude,
            longitude: record.longitude,
            timestamp: record.timestamp.to_rfc3339(),
        }
    }
}

/// Location Service
///
/// 六个公共操作的编排层：resolver → provider → store。
/// 任何一步失败立即终止请求；内部错误只进日志，响应体里只有
/// 不泄露细节的概括信息。
pub struct LocationService;

impl LocationService {
    fn error_response(message: &str) -> HttpResponse {
        HttpResponse::InternalServerError().json(ErrorResponse {
            error: message.to_string(),
        })
    }

    pub async fn add_location_for_ip(
        payload: web::Json<AddLocationForIpRequest>,
        storage: web::Data<Arc<SeaOrmStorage>>,
        provider: web::Data<GeoProvider>,
    ) -> HttpResponse {
        // 时间戳在任何 I/O 之前取一次：并发的 add 即便 provider 耗时不同，
        // 记录的仍是各自的到达时间
        let timestamp = Utc::now();
        trace!("Received add-location-for-ip request for {}", payload.ip);

        let coords = match provider.fetch_location(&payload.ip).await {
            Ok(coords) => coords,
            Err(e) => {
                error!(
                    "Error while retrieving ip {} location from {}: {}",
                    payload.ip,
                    provider.provider_name(),
                    e
                );
                return Self::error_response("Error while retrieving location from provider");
            }
        };

        let record = IpLocationRecord::new(&payload.ip, coords, timestamp);

        match storage.insert_ip_location(&record).await {
            Ok(_) => HttpResponse::Created().finish(),
            Err(e) => {
                error!(
                    "Error while inserting ip {} location in database: {}",
                    record.ip, e
                );
                Self::error_response("Error while inserting ip location in database")
            }
        }
    }

    pub async fn add_location_for_url(
        payload: web::Json<AddLocationForUrlRequest>,
        storage: web::Data<Arc<SeaOrmStorage>>,
        provider: web::Data<GeoProvider>,
    ) -> HttpResponse {
        let timestamp = Utc::now();
        trace!("Received add-location-for-url request for {}", payload.url);

        let hostname = match resolve_hostname(&payload.url) {
            Ok(hostname) => hostname,
            Err(e) => {
                error!(
                    "Error while retrieving hostname from url {}: {}",
                    payload.url, e
                );
                return Self::error_response("Error while retrieving hostname from url");
            }
        };

        let coords = match provider.fetch_location(&hostname).await {
            Ok(coords) => coords,
            Err(e) => {
                error!(
                    "Error while retrieving url {} location from {}: {}",
                    payload.url,
                    provider.provider_name(),
                    e
                );
                return Self::error_response("Error while retrieving location from provider");
            }
        };

        let record = HostnameLocationRecord::new(&hostname, coords, timestamp);

        match storage.insert_hostname_location(&record).await {
            Ok(_) => HttpResponse::Created().finish(),
            Err(e) => {
                error!(
                    "Error while inserting hostname {} location in database: {}",
                    record.hostname, e
                );
                Self::error_response("Error while inserting url location in database")
            }
        }
    }

    pub async fn delete_location_for_ip(
        query: web::Query<IpQuery>,
        storage: web::Data<Arc<SeaOrmStorage>>,
    ) -> HttpResponse {
        trace!("Received delete-location-for-ip request for {}", query.ip);

        match storage.delete_by_ip(&query.ip).await {
            Ok(()) => HttpResponse::NoContent().finish(),
            Err(e) => {
                error!(
                    "Error while deleting ip {} location in database: {}",
                    query.ip, e
                );
                Self::error_response("Error while deleting ip location in database")
            }
        }
    }

    pub async fn delete_location_for_url(
        query: web::Query<UrlQuery>,
        storage: web::Data<Arc<SeaOrmStorage>>,
    ) -> HttpResponse {
        trace!("Received delete-location-for-url request for {}", query.url);

        let hostname = match resolve_hostname(&query.url) {
            Ok(hostname) => hostname,
            Err(e) => {
                error!(
                    "Error while retrieving hostname from url {}: {}",
                    query.url, e
                );
                return Self::error_response("Error while retrieving hostname from url");
            }
        };

        match storage.delete_by_hostname(&hostname).await {
            Ok(()) => HttpResponse::NoContent().finish(),
            Err(e) => {
                error!(
                    "Error while deleting hostname {} location in database: {}",
                    hostname, e
                );
                Self::error_response("Error while deleting hostname location in database")
            }
        }
    }

    pub async fn get_location_for_ip(
        query: web::Query<IpQuery>,
        storage: web::Data<Arc<SeaOrmStorage>>,
    ) -> HttpResponse {
        trace!("Received get-location-for-ip request for {}", query.ip);

        match storage.select_by_ip(&query.ip).await {
            Ok(records) => {
                info!("Found {} location(s) for ip {}", records.len(), query.ip);
                HttpResponse::Ok().json(LocationsResponse {
                    locations: records.iter().map(LocationEntry::from).collect(),
                })
            }
            Err(e) => {
                error!("Database error: {}", e);
                Self::error_response("Database error")
            }
        }
    }

    pub async fn get_location_for_url(
        query: web::Query<UrlQuery>,
        storage: web::Data<Arc<SeaOrmStorage>>,
    ) -> HttpResponse {
        trace!("Received get-location-for-url request for {}", query.url);

        let hostname = match resolve_hostname(&query.url) {
            Ok(hostname) => hostname,
            Err(e) => {
                error!(
                    "Error while retrieving hostname from url {}: {}",
                    query.url, e
                );
                return Self::error_response("Error while retrieving hostname from url");
            }
        };

        match storage.select_by_hostname(&hostname).await {
            Ok(records) => {
                info!(
                    "Found {} location(s) for hostname {}",
                    records.len(),
                    hostname
                );
                HttpResponse::Ok().json(LocationsResponse {
                    locations: records.iter().map(LocationEntry::from).collect(),
                })
            }
            Err(e) => {
                error!("Database error: {}", e);
                Self::error_response("Database error")
            }
        }
    }
}
