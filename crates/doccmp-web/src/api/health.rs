use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub language: String,
    pub stopwords: usize,
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let resources = state.comparator.resources();

    Json(HealthResponse {
        status: "ok",
        language: resources.language().to_string(),
        stopwords: resources.stopword_count(),
    })
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, http::StatusCode};

    use crate::tests::{json_body, send, test_app};

    #[tokio::test]
    async fn test_health_reports_resources() {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let response = send(test_app(), request).await;

        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["language"], "portuguese");
        assert_eq!(json["stopwords"], 207);
    }
}
