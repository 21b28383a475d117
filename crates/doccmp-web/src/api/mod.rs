mod compare;
mod error;
mod health;

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(compare::router())
        .merge(health::router())
}
