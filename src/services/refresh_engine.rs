use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::database::{self, queries, DeviceStore};
use crate::models::{Permissions, WidgetEntry};
use crate::utils::config;

use super::aggregator;

const WIDGET_REFRESH_SECS: u64 = 30 * 60;

/// The cached result of one aggregation run, as handed to the presentation
/// layer. Rebuilt whole on every refresh; never patched in place.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WidgetSnapshot {
    pub widget_id: i64,
    pub entries: Vec<WidgetEntry>,
    pub updated_at: i64,
}

pub fn start_refresh_engine(data_dir: PathBuf, widget_ids: Vec<i64>, permissions: Permissions) {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(WIDGET_REFRESH_SECS)).await;
            for &widget_id in &widget_ids {
                if let Err(e) = refresh_widget_snapshot(&data_dir, widget_id, permissions) {
                    log::error!("Widget {} refresh failed: {}", widget_id, e);
                }
            }
        }
    });
}

/// Runs one full aggregation for a widget and upserts the serialized result.
/// The aggregation itself cannot fail; errors here are storage errors around
/// it.
pub fn refresh_widget_snapshot(
    data_dir: &Path,
    widget_id: i64,
    permissions: Permissions,
) -> Result<WidgetSnapshot> {
    let conn = Connection::open(data_dir.join(database::DB_FILE))?;
    let settings = config::load_settings(data_dir);
    let tokens = queries::get_favorite_tokens(&conn)?;

    let store = DeviceStore::new(&conn);
    let entries = aggregator::build_widget_list(&store, &store, &tokens, &settings, permissions);

    let snapshot = WidgetSnapshot {
        widget_id,
        entries,
        updated_at: chrono::Utc::now().timestamp(),
    };
    let serialized = serde_json::to_string(&snapshot)?;
    conn.execute(
        "INSERT INTO widget_snapshots (widget_id, snapshot_json, updated_at)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(widget_id) DO UPDATE SET
             snapshot_json = excluded.snapshot_json,
             updated_at = excluded.updated_at",
        rusqlite::params![widget_id, serialized, snapshot.updated_at],
    )?;

    log::debug!(
        "Widget {} refreshed with {} entries",
        widget_id,
        snapshot.entries.len()
    );
    Ok(snapshot)
}

pub fn get_widget_snapshot(data_dir: &Path, widget_id: i64) -> Result<Option<WidgetSnapshot>> {
    let conn = Connection::open(data_dir.join(database::DB_FILE))?;

    let result: std::result::Result<String, _> = conn.query_row(
        "SELECT snapshot_json FROM widget_snapshots WHERE widget_id = ?1",
        [widget_id],
        |row| row.get(0),
    );

    match result {
        Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
