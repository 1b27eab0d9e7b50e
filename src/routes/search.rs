use actix_web::{error, http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{SearchEngine, SearchError};
use crate::models::{ApiResponse, ErrorResponse, HealthResponse, ProductSearchQuery};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: SearchEngine,
}

/// Configure all search-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/search/products", web::post().to(search_products));
}

impl error::ResponseError for SearchError {
    fn status_code(&self) -> StatusCode {
        match self {
            SearchError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            SearchError::NotFound(_) => StatusCode::NOT_FOUND,
            SearchError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = match self {
            SearchError::InvalidQuery(msg) | SearchError::NotFound(msg) => msg.clone(),
            // Store details stay in the logs
            SearchError::Repository(_) => "An unexpected error occurred".to_string(),
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: self.error_code().to_string(),
            message,
            status_code: status.as_u16(),
        })
    }
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Search products endpoint
///
/// POST /api/v0/search/products
///
/// Request body:
/// ```json
/// {
///   "searchText": "string",
///   "productTypePid": "string",
///   "limit": 10,
///   "offset": 0,
///   "requirements": [{ "attributePid": "string", "value": { "numValue": 4 } }]
/// }
/// ```
async fn search_products(
    state: web::Data<AppState>,
    req: web::Json<ProductSearchQuery>,
) -> Result<HttpResponse, SearchError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: field_errors={:?}", errors);
        return Err(SearchError::InvalidQuery(errors.to_string()));
    }

    tracing::info!(
        "Searching products: text={:?}, productTypePid={}, requirements={}, limit={:?}",
        req.search_text,
        req.product_type_pid,
        req.requirements.len(),
        req.limit
    );

    match state.engine.search_products(&req).await {
        Ok(hit_list) => Ok(HttpResponse::Ok().json(ApiResponse::success(vec![hit_list]))),
        Err(SearchError::Repository(e)) => {
            let error_id = uuid::Uuid::new_v4();
            tracing::error!("Search failed (error id {}): {}", error_id, e);
            Err(SearchError::Repository(e))
        }
        Err(e) => {
            tracing::info!("Rejected search: {}", e);
            Err(e)
        }
    }
}
