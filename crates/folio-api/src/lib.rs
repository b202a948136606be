pub mod contact;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use folio_db::Database;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
}

/// Form posts are four short text fields; anything bigger is refused.
const MAX_FORM_BYTES: usize = 64 * 1024;

/// Routes served by the portfolio backend, without transport layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/contact", post(contact::save_contact))
        // Path the page's form has always pointed at
        .route("/save.php", post(contact::save_contact_legacy))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_FORM_BYTES))
        .with_state(state)
}

pub async fn health() -> &'static str {
    "ok"
}
