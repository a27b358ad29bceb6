use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use tracing::{error, info};

use iplocator::api::public_routes;
use iplocator::services::GeoProvider;
use iplocator::storage::StorageFactory;
use iplocator::system::{AppConfig, init_logging};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    // Load env configurations; a missing IPSTACK_KEY or DATABASE_URL is fatal
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    // 存储与 provider 各构造一次，之后只读共享给所有请求
    let storage = match StorageFactory::create(&config.database).await {
        Ok(storage) => storage,
        Err(e) => {
            error!("Failed to initialize storage: {}", e);
            std::process::exit(1);
        }
    };

    let provider = GeoProvider::new(&config.provider);

    let public_prefix = config.server.public_prefix.clone();
    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server at http://{}{}", bind_address, public_prefix);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(provider.clone()))
            .service(web::scope(&public_prefix).service(public_routes()))
    })
    .bind(bind_address)?
    .run()
    .await
}
