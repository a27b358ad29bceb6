use actix_web::web;

pub mod health;
pub mod location;

pub use health::HealthService;
pub use location::LocationService;

/// 公共 API 路由配置
pub fn public_routes() -> actix_web::Scope {
    web::scope("")
        .route("/healthcheck", web::get().to(HealthService::healthcheck))
        .route(
            "/add-location-for-ip",
            web::post().to(LocationService::add_location_for_ip),
        )
        .route(
            "/add-location-for-url",
            web::post().to(LocationService::add_location_for_url),
        )
        .route(
            "/delete-location-for-ip",
            web::delete().to(LocationService::delete_location_for_ip),
        )
        .route(
            "/delete-location-for-url",
            web::delete().to(LocationService::delete_location_for_url),
        )
        .route(
            "/get-location-for-ip",
            web::get().to(LocationService::get_location_for_ip),
        )
        .route(
            "/get-location-for-url",
            web::get().to(LocationService::get_location_for_url),
        )
}
