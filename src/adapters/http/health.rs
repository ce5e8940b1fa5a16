//! Liveness endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PingResponse {
    pub message: &'static str,
}

/// GET /ping - Public liveness check
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse { message: "pong" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ping_answers_pong() {
        let Json(body) = ping().await;
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({ "message": "pong" })
        );
    }
}
