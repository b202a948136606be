use thiserror::Error;
use tracing::debug;

use folio_types::{ContactForm, ContactMessage};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a failure status. `body` is its text.
    #[error("endpoint returned {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl ClientError {
    /// Text to show the visitor.
    pub fn reason(&self) -> String {
        match self {
            ClientError::Transport(e) => e.to_string(),
            ClientError::Rejected { body, .. } => body.clone(),
        }
    }
}

/// Posts contact messages to the persistence endpoint as a urlencoded form.
#[derive(Debug, Clone)]
pub struct ContactClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ContactClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the endpoint's reply text on success.
    pub async fn send(&self, message: &ContactMessage) -> Result<String, ClientError> {
        let form = ContactForm::from(message.clone());
        debug!("Posting contact message to {}", self.endpoint);

        let resp = self.http.post(&self.endpoint).form(&form).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(ClientError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}
