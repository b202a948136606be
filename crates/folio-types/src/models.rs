use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Characters ECMAScript's `\s` matches. Unlike Unicode `White_Space` this
/// includes U+FEFF and leaves out U+0085.
const SPACE: &str = r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    let part = format!("[^{SPACE}@]+");
    Regex::new(&format!(r"^{part}@{part}\.{part}$")).expect("valid email pattern")
});

/// Shape check only: one `@`, a dot somewhere after it, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// A contact message that passed client-side validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingField,
    #[error("Please enter a valid email")]
    InvalidEmail,
}
