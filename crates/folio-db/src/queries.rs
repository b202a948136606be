use anyhow::Result;
use rusqlite::Connection;
use tracing::{info, warn};

use folio_types::ContactForm;

use crate::models::ContactRow;
use crate::{Database, PersistenceError};

impl Database {
    // -- Contact messages --

    /// Store one submission as-is. No validation happens here.
    ///
    /// The statement and the connection are both dropped on return, whatever
    /// the outcome.
    #[tracing::instrument(name = "Insert contact message", skip_all)]
    pub fn insert_contact_message(&self, form: &ContactForm) -> Result<i64, PersistenceError> {
        let conn = self.connect().inspect_err(|e| warn!("{}", e))?;

        let id = insert_contact(&conn, form).inspect_err(|e| warn!("{}", e))?;

        info!("Stored contact message {}", id);
        Ok(id)
    }

    pub fn list_contact_messages(&self) -> Result<Vec<ContactRow>> {
        self.with_conn(query_contact_messages)
    }

    pub fn count_contact_messages(&self) -> Result<i64> {
        self.with_conn(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM contact_form", [], |row| row.get(0))?)
        })
    }
}

fn insert_contact(conn: &Connection, form: &ContactForm) -> Result<i64, PersistenceError> {
    let mut stmt = conn
        .prepare(
            "INSERT INTO contact_form (name, email, subject, message) VALUES (?1, ?2, ?3, ?4)",
        )
        .map_err(PersistenceError::InsertFailure)?;

    stmt.execute(rusqlite::params![form.name, form.email, form.subject, form.message])
        .map_err(PersistenceError::InsertFailure)?;

    Ok(conn.last_insert_rowid())
}

fn query_contact_messages(conn: &Connection) -> Result<Vec<ContactRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, email, subject, message, created_at
         FROM contact_form
         ORDER BY id ASC",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(ContactRow {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                subject: row.get(3)?,
                message: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}
