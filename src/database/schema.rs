use anyhow::Result;
use rusqlite::Connection;

pub fn create_tables(conn: &Connection) -> Result<()> {
    // Contacts table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS contacts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            lookup_key TEXT NOT NULL UNIQUE,
            display_name TEXT NOT NULL,
            photo_uri TEXT,
            created_at INTEGER NOT NULL
        )",
        [],
    )?;

    // Per-contact phone numbers. The ordinal column fixes which number is
    // "first" so favorites resolve to the same number every run.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS contact_phones (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            contact_id INTEGER NOT NULL,
            number TEXT NOT NULL,
            normalized_number TEXT NOT NULL,
            ordinal INTEGER NOT NULL,
            FOREIGN KEY (contact_id) REFERENCES contacts(id),
            UNIQUE(contact_id, ordinal)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_contact_phones_normalized
         ON contact_phones(normalized_number)",
        [],
    )?;

    // Call log table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS call_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            raw_number TEXT NOT NULL,
            normalized_number TEXT NOT NULL,
            cached_name TEXT,
            cached_contact_id INTEGER,
            cached_lookup_key TEXT,
            timestamp INTEGER NOT NULL,
            outcome TEXT NOT NULL
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_call_log_timestamp ON call_log(timestamp)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_call_log_normalized ON call_log(normalized_number)",
        [],
    )?;

    // Ordered favorites list
    conn.execute(
        "CREATE TABLE IF NOT EXISTS favorites (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            token TEXT NOT NULL UNIQUE,
            position INTEGER NOT NULL
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_favorites_position ON favorites(position)",
        [],
    )?;

    // Widget snapshots table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS widget_snapshots (
            widget_id INTEGER PRIMARY KEY,
            snapshot_json TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        [],
    )?;

    Ok(())
}
