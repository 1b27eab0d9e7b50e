// Route exports
pub mod search;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v0")
            .configure(search::configure),
    );
}
