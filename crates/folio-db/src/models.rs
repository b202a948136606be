/// Database row types. These map directly to SQLite rows.
/// Distinct from folio-types models to keep the DB layer independent.

#[derive(Debug, Clone)]
pub struct ContactRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: String,
}

impl ContactRow {
    /// SQLite stores `datetime('now')` as "YYYY-MM-DD HH:MM:SS" in UTC.
    pub fn created_at_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|ndt| ndt.and_utc())
    }
}
