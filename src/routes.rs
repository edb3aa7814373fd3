//! src/routes.rs

mod health_check;
mod index;

use actix_web::web;

pub use health_check::*;
pub use index::*;

/// Registers every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/health", web::get().to(health_check));
}
