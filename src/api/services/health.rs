use actix_web::{HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthcheckResponse {
    pub message: String,
}

/// Health Service
///
/// 基础设施探针，不触存储也不触外部 provider：只要进程还在服务
/// 请求就返回 OK。
pub struct HealthService;

impl HealthService {
    pub async fn healthcheck() -> impl Responder {
        trace!("Received healthcheck request");

        HttpResponse::Ok().json(HealthcheckResponse {
            message: "OK".to_string(),
        })
    }
}
