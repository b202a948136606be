use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An attribute value that doesn't name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct ParseUiValueError {
    pub kind: &'static str,
    pub value: String,
}

// -- Theme --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark { Theme::Dark } else { Theme::Light }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseUiValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ParseUiValueError { kind: "theme", value: other.to_string() }),
        }
    }
}

// -- Projects --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Web,
    App,
    Design,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 3] =
        [ProjectCategory::Web, ProjectCategory::App, ProjectCategory::Design];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectCategory::Web => "web",
            ProjectCategory::App => "app",
            ProjectCategory::Design => "design",
        }
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectCategory {
    type Err = ParseUiValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseUiValueError { kind: "project category", value: s.to_string() })
    }
}

// -- Notifications --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    /// Toast background. Independent of the active theme.
    pub fn color(self) -> &'static str {
        match self {
            Severity::Success => "#00b894",
            Severity::Error => "#e74c3c",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Severity::Success => "fa-check-circle",
            Severity::Error => "fa-exclamation-circle",
        }
    }
}
