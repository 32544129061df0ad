use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

use crate::models::{CallOutcome, CallRecord, ContactRecord, ContactRef};
use crate::utils::phone::normalize_number;

pub fn get_contact_by_lookup_key(conn: &Connection, token: &str) -> Result<Option<ContactRecord>> {
    let row = conn
        .query_row(
            "SELECT id, lookup_key, display_name, photo_uri
             FROM contacts
             WHERE lookup_key = ?1",
            [token],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            },
        )
        .optional()?;

    let (contact_id, lookup_key, display_name, photo_uri) = match row {
        Some(row) => row,
        None => return Ok(None),
    };

    Ok(Some(ContactRecord {
        contact_id,
        lookup_key,
        display_name,
        phone_number: get_first_phone(conn, contact_id)?,
        photo_uri,
    }))
}

pub fn get_contact_by_number(conn: &Connection, number: &str) -> Result<Option<ContactRecord>> {
    let key = normalize_number(number);
    if key.is_empty() {
        return Ok(None);
    }

    let row = conn
        .query_row(
            "SELECT c.id, c.lookup_key, c.display_name, c.photo_uri
             FROM contact_phones p
             JOIN contacts c ON p.contact_id = c.id
             WHERE p.normalized_number = ?1
             ORDER BY p.contact_id ASC, p.ordinal ASC
             LIMIT 1",
            [key],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            },
        )
        .optional()?;

    let (contact_id, lookup_key, display_name, photo_uri) = match row {
        Some(row) => row,
        None => return Ok(None),
    };

    Ok(Some(ContactRecord {
        contact_id,
        lookup_key,
        display_name,
        phone_number: get_first_phone(conn, contact_id)?,
        photo_uri,
    }))
}

fn get_first_phone(conn: &Connection, contact_id: i64) -> Result<Option<String>> {
    let number = conn
        .query_row(
            "SELECT number FROM contact_phones
             WHERE contact_id = ?1
             ORDER BY ordinal ASC
             LIMIT 1",
            [contact_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(number)
}

pub fn get_recent_calls(conn: &Connection, limit: usize) -> Result<Vec<CallRecord>> {
    let mut stmt = conn.prepare(
        "SELECT raw_number, cached_name, cached_contact_id, cached_lookup_key, timestamp, outcome
         FROM call_log
         ORDER BY timestamp DESC
         LIMIT ?1",
    )?;

    let records = stmt
        .query_map([limit as i64], |row| {
            let cached_contact_id: Option<i64> = row.get(2)?;
            let cached_lookup_key: Option<String> = row.get(3)?;
            let cached_contact = cached_contact_id.map(|id| ContactRef {
                contact_id: id,
                lookup_key: cached_lookup_key,
            });
            Ok(CallRecord {
                raw_number: row.get(0)?,
                cached_name: row.get(1)?,
                cached_contact,
                timestamp: row.get(4)?,
                outcome: CallOutcome::parse(&row.get::<_, String>(5)?),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(records)
}

pub fn get_last_call_outcome(conn: &Connection, number: &str) -> Result<Option<CallOutcome>> {
    let key = normalize_number(number);
    if key.is_empty() {
        return Ok(None);
    }

    let outcome: Option<String> = conn
        .query_row(
            "SELECT outcome FROM call_log
             WHERE normalized_number = ?1
             ORDER BY timestamp DESC
             LIMIT 1",
            [key],
            |row| row.get(0),
        )
        .optional()?;

    Ok(outcome.map(|o| CallOutcome::parse(&o)))
}

pub fn get_favorite_tokens(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT token FROM favorites ORDER BY position ASC")?;
    let tokens = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tokens)
}

pub fn insert_contact(
    conn: &Connection,
    lookup_key: &str,
    display_name: &str,
    photo_uri: Option<&str>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO contacts (lookup_key, display_name, photo_uri, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![
            lookup_key,
            display_name,
            photo_uri,
            chrono::Utc::now().timestamp(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_contact_phone(
    conn: &Connection,
    contact_id: i64,
    number: &str,
    ordinal: i32,
) -> Result<()> {
    conn.execute(
        "INSERT INTO contact_phones (contact_id, number, normalized_number, ordinal)
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![contact_id, number, normalize_number(number), ordinal],
    )?;
    Ok(())
}

pub fn insert_call(conn: &Connection, record: &CallRecord) -> Result<i64> {
    let (cached_contact_id, cached_lookup_key) = match &record.cached_contact {
        Some(cached) => (Some(cached.contact_id), cached.lookup_key.clone()),
        None => (None, None),
    };
    conn.execute(
        "INSERT INTO call_log
         (raw_number, normalized_number, cached_name, cached_contact_id, cached_lookup_key, timestamp, outcome)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            &record.raw_number,
            normalize_number(&record.raw_number),
            &record.cached_name,
            cached_contact_id,
            cached_lookup_key,
            record.timestamp,
            record.outcome.as_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn add_favorite(conn: &Connection, token: &str) -> Result<()> {
    let next_position: i64 = conn.query_row(
        "SELECT COALESCE(MAX(position), -1) + 1 FROM favorites",
        [],
        |row| row.get(0),
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO favorites (token, position) VALUES (?1, ?2)",
        rusqlite::params![token, next_position],
    )?;
    Ok(())
}

pub fn remove_favorite(conn: &Connection, token: &str) -> Result<()> {
    conn.execute("DELETE FROM favorites WHERE token = ?1", [token])?;
    Ok(())
}
