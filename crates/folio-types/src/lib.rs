pub mod api;
pub mod models;
pub mod ui;

pub use api::ContactForm;
pub use models::{ContactMessage, ValidationError};
pub use ui::{ParseUiValueError, ProjectCategory, Severity, Theme};
