use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use doccmp_core::Comparison;
use serde::Serialize;

use super::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/compare", post(compare))
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub correlation_index: f64,
    pub filename1: String,
    pub filename2: String,
}

impl From<Comparison> for CompareResponse {
    fn from(c: Comparison) -> Self {
        Self {
            correlation_index: c.score.value(),
            filename1: c.document_a,
            filename2: c.document_b,
        }
    }
}

struct Upload {
    filename: String,
    bytes: Bytes,
}

impl Upload {
    fn require(upload: Option<Self>, field: &str) -> Result<Self, ApiError> {
        let upload =
            upload.ok_or_else(|| ApiError::bad_request(format!("missing file field: {field}")))?;
        if upload.filename.is_empty() {
            return Err(ApiError::bad_request(format!("no file selected for {field}")));
        }
        Ok(upload)
    }
}

async fn compare(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CompareResponse>, ApiError> {
    let mut file1 = None;
    let mut file2 = None;

    while let Some(field) = multipart.next_field().await? {
        let slot = match field.name() {
            Some("file1") => &mut file1,
            Some("file2") => &mut file2,
            other => {
                tracing::debug!("Ignoring multipart field {:?}", other);
                continue;
            }
        };
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        *slot = Some(Upload { filename, bytes });
    }

    let first = Upload::require(file1, "file1")?;
    let second = Upload::require(file2, "file2")?;

    // Extraction and scoring are CPU-bound.
    let comparator = Arc::clone(&state.comparator);
    let comparison = tokio::task::spawn_blocking(move || {
        comparator.compare_bytes(
            &first.filename,
            first.bytes.to_vec(),
            &second.filename,
            second.bytes.to_vec(),
        )
    })
    .await
    .map_err(|e| ApiError::internal(format!("comparison task failed: {e}")))??;

    Ok(Json(comparison.into()))
}
