use thiserror::Error;

/// Failures while storing a contact message.
///
/// Both variants carry the store's own error; its text is what the endpoint
/// reports back to the sender.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("store connection failed: {0}")]
    ConnectionFailure(#[source] rusqlite::Error),

    #[error("insert rejected: {0}")]
    InsertFailure(#[source] rusqlite::Error),
}

impl PersistenceError {
    /// The underlying store message, without our own prefix.
    pub fn store_message(&self) -> String {
        match self {
            PersistenceError::ConnectionFailure(e) | PersistenceError::InsertFailure(e) => {
                e.to_string()
            }
        }
    }
}
