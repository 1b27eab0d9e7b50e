use serde::{Deserialize, Serialize};

/// A ranked result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hit<T> {
    pub hit: T,
    pub score: f64,
}

/// Ranked result set of a search, highest score first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitList<T> {
    pub hits: Vec<Hit<T>>,
    pub total: usize,
    #[serde(rename = "maxScore")]
    pub max_score: f64,
}

impl<T> HitList<T> {
    /// Build a hit list from hits already sorted by descending score.
    ///
    /// `max_score` is 0.0 for an empty list.
    pub fn from_sorted(hits: Vec<Hit<T>>) -> Self {
        let max_score = hits.first().map(|h| h.score).unwrap_or(0.0);
        Self {
            total: hits.len(),
            max_score,
            hits,
        }
    }
}

impl<T> Default for HitList<T> {
    fn default() -> Self {
        Self::from_sorted(Vec::new())
    }
}

/// Standard response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub response_type: String,
    pub description: String,
    pub data: Option<Vec<T>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Vec<T>) -> Self {
        Self {
            status_code: 200,
            response_type: "success".to_string(),
            description: "Success".to_string(),
            data: Some(data),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
