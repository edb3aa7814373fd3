//! src/routes/index.rs

use actix_web::HttpResponse;

#[derive(serde::Serialize)]
pub struct ServiceInfo {
    name: &'static str,
    version: &'static str,
}

#[tracing::instrument(name = "Describing the service")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(ServiceInfo {
        name: "Account REST API Service",
        version: "1.0",
    })
}
