use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

pub mod queries;
pub mod schema;

pub const DB_FILE: &str = "quickdial.db";

pub fn init_database(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;

    // Enable WAL mode
    conn.pragma_update(None, "journal_mode", &"WAL")?;
    conn.pragma_update(None, "synchronous", &"NORMAL")?;
    conn.pragma_update(None, "foreign_keys", &"ON")?;

    // Create schema
    schema::create_tables(&conn)?;

    Ok(conn)
}

/// The on-device contact and call-history store, exposed to the engines
/// through the provider traits so the aggregation pipeline never touches
/// sqlite directly.
pub struct DeviceStore<'a> {
    conn: &'a Connection,
}

impl<'a> DeviceStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl crate::providers::ContactSource for DeviceStore<'_> {
    fn resolve_by_token(&self, token: &str) -> Result<Option<crate::models::ContactRecord>> {
        queries::get_contact_by_lookup_key(self.conn, token)
    }

    fn resolve_by_number(&self, number: &str) -> Result<Option<crate::models::ContactRecord>> {
        queries::get_contact_by_number(self.conn, number)
    }
}

impl crate::providers::CallLogSource for DeviceStore<'_> {
    fn recent_calls(&self, limit: usize) -> Result<Vec<crate::models::CallRecord>> {
        queries::get_recent_calls(self.conn, limit)
    }

    fn last_outcome(&self, number: &str) -> Result<Option<crate::models::CallOutcome>> {
        queries::get_last_call_outcome(self.conn, number)
    }
}
