//! Public API tests
//!
//! End-to-end handler tests using `actix_web::test` with a temporary SQLite
//! storage and a mock geo provider (no network, no real ipstack calls).

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tempfile::TempDir;

use iplocator::api::public_routes;
use iplocator::api::services::health::HealthcheckResponse;
use iplocator::api::services::location::{
    AddLocationForIpRequest, AddLocationForUrlRequest, LocationEntry, LocationsResponse,
};
use iplocator::errors::{IpLocatorError, Result};
use iplocator::services::{Coordinates, GeoLookup, GeoProvider};
use iplocator::storage::backend::SeaOrmStorage;
use iplocator::storage::{HostnameLocationRecord, IpLocationRecord};

const PREFIX: &str = "/api/v1/public";

/// 固定坐标的 mock provider
struct MockGeoLookup {
    coords: Coordinates,
}

#[async_trait]
impl GeoLookup for MockGeoLookup {
    async fn fetch_location(&self, _query: &str) -> Result<Coordinates> {
        Ok(self.coords)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// 永远失败的 mock provider（模拟传输错误）
struct FailingGeoLookup;

#[async_trait]
impl GeoLookup for FailingGeoLookup {
    async fn fetch_location(&self, _query: &str) -> Result<Coordinates> {
        Err(IpLocatorError::provider("simulated transport error"))
    }

    fn name(&self) -> &'static str {
        "failing-mock"
    }
}

fn mock_provider() -> GeoProvider {
    GeoProvider::with_lookup(Arc::new(MockGeoLookup {
        coords: Coordinates {
            latitude: 1.1,
            longitude: 2.2,
        },
    }))
}

fn failing_provider() -> GeoProvider {
    GeoProvider::with_lookup(Arc::new(FailingGeoLookup))
}

fn fixed_timestamp() -> DateTime<Utc> {
    "2022-01-01T12:00:00Z".parse().unwrap()
}

/// 创建临时 SQLite 数据库的存储实例（连 URL 一起返回，便于错误注入）
async fn create_temp_storage() -> (Arc<SeaOrmStorage>, TempDir, String) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite", 1)
        .await
        .expect("Failed to create storage");

    (Arc::new(storage), temp_dir, db_url)
}

// =============================================================================
// healthcheck
// =============================================================================

#[actix_web::test]
async fn test_healthcheck() {
    let (storage, _temp_dir, _) = create_temp_storage().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage))
            .app_data(web::Data::new(mock_provider()))
            .service(web::scope(PREFIX).service(public_routes())),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("{}/healthcheck", PREFIX))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: HealthcheckResponse = test::read_body_json(resp).await;
    assert_eq!(body.message, "OK");
}

// =============================================================================
// add-location-for-ip
// =============================================================================

#[actix_web::test]
async fn test_add_location_for_ip() {
    let (storage, _temp_dir, _) = create_temp_storage().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(mock_provider()))
            .service(web::scope(PREFIX).service(public_routes())),
    )
    .await;

    let before = Utc::now();
    let req = test::TestRequest::post()
        .uri(&format!("{}/add-location-for-ip", PREFIX))
        .set_json(AddLocationForIpRequest {
            ip: "120.1.1.1".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    let after = Utc::now();

    assert_eq!(resp.status(), StatusCode::CREATED);

    let records = storage.select_all_ip().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, Some(1));
    assert_eq!(records[0].ip, "120.1.1.1");
    assert_eq!(records[0].latitude, 1.1);
    assert_eq!(records[0].longitude, 2.2);
    // 时间戳在请求入口处取样
    assert!(records[0].timestamp >= before && records[0].timestamp <= after);
}

#[actix_web::test]
async fn test_add_location_for_ip_provider_error_persists_nothing() {
    let (storage, _temp_dir, _) = create_temp_storage().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(failing_provider()))
            .service(web::scope(PREFIX).service(public_routes())),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&format!("{}/add-location-for-ip", PREFIX))
        .set_json(AddLocationForIpRequest {
            ip: "120.1.1.1".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(storage.select_all_ip().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_add_location_for_ip_database_error() {
    let (storage, _temp_dir, db_url) = create_temp_storage().await;

    // provider 正常，但存储层损坏：表被移走之后插入必然失败
    let db = sea_orm::Database::connect(&db_url).await.unwrap();
    sea_orm::ConnectionTrait::execute_unprepared(&db, "DROP TABLE ip_address")
        .await
        .unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage))
            .app_data(web::Data::new(mock_provider()))
            .service(web::scope(PREFIX).service(public_routes())),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&format!("{}/add-location-for-ip", PREFIX))
        .set_json(AddLocationForIpRequest {
            ip: "120.1.1.1".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// add-location-for-url
// =============================================================================

#[actix_web::test]
async fn test_add_location_for_url_resolves_hostname() {
    let (storage, _temp_dir, _) = create_temp_storage().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(mock_provider()))
            .service(web::scope(PREFIX).service(public_routes())),
    )
    .await;

    // 两次调用：各生成一条记录，按调用顺序入库
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri(&format!("{}/add-location-for-url", PREFIX))
            .set_json(AddLocationForUrlRequest {
                url: "https://www.somehost.com/and/path?query=value".to_string(),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let records = storage.select_all_hostname().await.unwrap();
    assert_eq!(records.len(), 2);
    // 存的是解析出的主机名，不是完整 URL
    assert_eq!(records[0].hostname, "www.somehost.com");
    assert_eq!(records[1].hostname, "www.somehost.com");
    assert_eq!(records[0].id, Some(1));
    assert_eq!(records[1].id, Some(2));
    assert!(records[0].timestamp <= records[1].timestamp);
}

#[actix_web::test]
async fn test_add_location_for_url_with_unparseable_url() {
    let (storage, _temp_dir, _) = create_temp_storage().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(mock_provider()))
            .service(web::scope(PREFIX).service(public_routes())),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&format!("{}/add-location-for-url", PREFIX))
        .set_json(AddLocationForUrlRequest {
            url: "not a url".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(storage.select_all_hostname().await.unwrap().is_empty());
}

// =============================================================================
// delete-location-for-ip / delete-location-for-url
// =============================================================================

#[actix_web::test]
async fn test_delete_location_for_ip() {
    let (storage, _temp_dir, _) = create_temp_storage().await;
    let record = IpLocationRecord {
        id: None,
        ip: "133.1.1.0".to_string(),
        latitude: 1.1,
        longitude: 2.2,
        timestamp: fixed_timestamp(),
    };
    storage.insert_ip_location(&record).await.unwrap();
    assert_eq!(storage.select_all_ip().await.unwrap().len(), 1);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(mock_provider()))
            .service(web::scope(PREFIX).service(public_routes())),
    )
    .await;

    // 第二次删除同一个 key 也是 204：删除不存在的 key 不是错误
    for _ in 0..2 {
        let req = test::TestRequest::delete()
            .uri(&format!("{}/delete-location-for-ip?ip=133.1.1.0", PREFIX))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(storage.select_all_ip().await.unwrap().is_empty());
    }
}

#[actix_web::test]
async fn test_delete_location_for_url_deletes_by_resolved_hostname() {
    let (storage, _temp_dir, _) = create_temp_storage().await;
    let record = HostnameLocationRecord {
        id: None,
        hostname: "www.somehost.com".to_string(),
        latitude: 1.1,
        longitude: 2.2,
        timestamp: fixed_timestamp(),
    };
    storage.insert_hostname_location(&record).await.unwrap();
    storage.insert_hostname_location(&record).await.unwrap();
    assert_eq!(storage.select_all_hostname().await.unwrap().len(), 2);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(mock_provider()))
            .service(web::scope(PREFIX).service(public_routes())),
    )
    .await;

    let url = "https://www.somehost.com/and/path?query=value";
    let req = test::TestRequest::delete()
        .uri(&format!(
            "{}/delete-location-for-url?url={}",
            PREFIX,
            urlencoding::encode(url)
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(storage.select_all_hostname().await.unwrap().is_empty());
}

// =============================================================================
// get-location-for-ip / get-location-for-url
// =============================================================================

#[actix_web::test]
async fn test_get_location_for_ip() {
    let (storage, _temp_dir, _) = create_temp_storage().await;
    let record = IpLocationRecord {
        id: None,
        ip: "133.1.1.0".to_string(),
        latitude: 1.1,
        longitude: 2.2,
        timestamp: fixed_timestamp(),
    };
    storage.insert_ip_location(&record).await.unwrap();
    storage.insert_ip_location(&record).await.unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage))
            .app_data(web::Data::new(mock_provider()))
            .service(web::scope(PREFIX).service(public_routes())),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("{}/get-location-for-ip?ip=133.1.1.0", PREFIX))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: LocationsResponse = test::read_body_json(resp).await;
    let expected_entry = LocationEntry {
        latitude: 1.1,
        longitude: 2.2,
        timestamp: "2022-01-01T12:00:00+00:00".to_string(),
    };
    assert_eq!(
        body,
        LocationsResponse {
            locations: vec![expected_entry.clone(), expected_entry],
        }
    );
}

#[actix_web::test]
async fn test_get_location_for_url_queries_by_resolved_hostname() {
    let (storage, _temp_dir, _) = create_temp_storage().await;
    let record = HostnameLocationRecord {
        id: None,
        hostname: "www.somehost.com".to_string(),
        latitude: 1.1,
        longitude: 2.2,
        timestamp: fixed_timestamp(),
    };
    storage.insert_hostname_location(&record).await.unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage))
            .app_data(web::Data::new(mock_provider()))
            .service(web::scope(PREFIX).service(public_routes())),
    )
    .await;

    let url = "https://www.somehost.com/and/path?query=value";
    let req = test::TestRequest::get()
        .uri(&format!(
            "{}/get-location-for-url?url={}",
            PREFIX,
            urlencoding::encode(url)
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: LocationsResponse = test::read_body_json(resp).await;
    assert_eq!(body.locations.len(), 1);
    assert_eq!(body.locations[0].latitude, 1.1);
    assert_eq!(body.locations[0].longitude, 2.2);
    assert_eq!(body.locations[0].timestamp, "2022-01-01T12:00:00+00:00");
}

#[actix_web::test]
async fn test_get_location_for_unknown_ip_returns_empty_list() {
    let (storage, _temp_dir, _) = create_temp_storage().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage))
            .app_data(web::Data::new(mock_provider()))
            .service(web::scope(PREFIX).service(public_routes())),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("{}/get-location-for-ip?ip=10.0.0.1", PREFIX))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: LocationsResponse = test::read_body_json(resp).await;
    assert!(body.locations.is_empty());
}
