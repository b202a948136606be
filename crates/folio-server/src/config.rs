use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Server settings, read from the environment (and `.env`, if present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    /// Directory holding the page's HTML/CSS/JS. Not served when unset.
    pub static_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = get("FOLIO_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = get("FOLIO_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .context("FOLIO_PORT must be a port number")?;
        let db_path = get("FOLIO_DB_PATH").unwrap_or_else(|| "portfolio.db".into()).into();
        let static_dir = get("FOLIO_STATIC_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            db_path,
            static_dir,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
