use quickdial::database;
use quickdial::models::Permissions;
use quickdial::services::refresh_engine;
use quickdial::utils::config;

/// The desktop build drives a single widget instance.
const DEFAULT_WIDGET_ID: i64 = 1;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let data_dir = config::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    database::init_database(&data_dir.join(database::DB_FILE))?;

    // The local store is always readable; permission-degraded modes are for
    // hosts fronting a real device.
    let permissions = Permissions::all_granted();

    match refresh_engine::refresh_widget_snapshot(&data_dir, DEFAULT_WIDGET_ID, permissions) {
        Ok(snapshot) => log::info!(
            "Widget {} refreshed with {} entries",
            snapshot.widget_id,
            snapshot.entries.len()
        ),
        Err(e) => log::error!("Initial widget refresh failed: {}", e),
    }

    refresh_engine::start_refresh_engine(data_dir, vec![DEFAULT_WIDGET_ID], permissions);

    tokio::signal::ctrl_c().await?;
    Ok(())
}
