use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use folio_db::PersistenceError;
use folio_types::ContactForm;
use folio_types::api::{CONNECTION_FAILURE_PREFIX, INSERT_FAILURE_PREFIX, SEND_SUCCESS_TEXT};

use crate::AppState;

/// Plain-text outcome of one contact submission.
///
/// Failure bodies carry the store's raw error text. Callers see internal
/// detail such as file paths or table names.
#[derive(Debug, PartialEq, Eq)]
pub enum ContactReply {
    Sent,
    InsertFailed(String),
    ConnectionFailed(String),
}

impl ContactReply {
    pub fn body(&self) -> String {
        match self {
            ContactReply::Sent => SEND_SUCCESS_TEXT.to_string(),
            ContactReply::InsertFailed(detail) => format!("{INSERT_FAILURE_PREFIX}{detail}"),
            ContactReply::ConnectionFailed(detail) => {
                format!("{CONNECTION_FAILURE_PREFIX}{detail}")
            }
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ContactReply::Sent => StatusCode::OK,
            ContactReply::InsertFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ContactReply::ConnectionFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<Result<i64, PersistenceError>> for ContactReply {
    fn from(result: Result<i64, PersistenceError>) -> Self {
        match result {
            Ok(_) => ContactReply::Sent,
            Err(e @ PersistenceError::ConnectionFailure(_)) => {
                ContactReply::ConnectionFailed(e.store_message())
            }
            Err(e @ PersistenceError::InsertFailure(_)) => {
                ContactReply::InsertFailed(e.store_message())
            }
        }
    }
}

impl IntoResponse for ContactReply {
    fn into_response(self) -> Response {
        (self.status(), self.body()).into_response()
    }
}

/// POST /contact: store the four form fields exactly as received.
pub async fn save_contact(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> ContactReply {
    store(state, form).await
}

/// POST /save.php: same insert and bodies, but every reply is 200 as the old
/// PHP script sent them. Callers there tell outcomes apart by body text.
pub async fn save_contact_legacy(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> (StatusCode, String) {
    (StatusCode::OK, store(state, form).await.body())
}

async fn store(state: AppState, form: ContactForm) -> ContactReply {
    // Run blocking DB insert off the async runtime
    let db = state.clone();
    let result = tokio::task::spawn_blocking(move || db.db.insert_contact_message(&form)).await;

    match result {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            error!("spawn_blocking join error: {}", e);
            ContactReply::InsertFailed(e.to_string())
        }
    }
}
