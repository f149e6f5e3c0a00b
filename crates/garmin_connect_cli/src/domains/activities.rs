//! The six activity operations: list, view, view weather, export, delete, rename.
//!
//! Each takes the client explicitly and either renders to `out` or writes a file;
//! every failure is returned to the caller unchanged.

use std::io::Write;
use std::path::{Path, PathBuf};

use garmin_connect_client::utils::format_duration;
use garmin_connect_client::{Activity, ActivityId, ConnectClient, ExportFormat};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};
use crate::output::{Table, Tabular};

/// Activities requested per `list` call.
pub const PAGE_SIZE: u32 = 100;

pub const LIST_HEADERS: [&str; 8] = [
    "ID",
    "Date",
    "Name",
    "Type",
    "Distance",
    "Time",
    "Avg/Max HR",
    "Calories",
];

/// Cells of one `list` row, in [`LIST_HEADERS`] order.
pub fn list_row(a: &Activity) -> [String; 8] {
    let date = a
        .start_local()
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| a.start_time_local.clone());
    [
        a.id.to_string(),
        date,
        a.activity_name.clone(),
        a.activity_type.type_key.clone(),
        format!("{:.2} km", a.distance / 1000.0),
        format_duration(a.duration),
        format!("{:.0}/{:.0}", a.average_hr, a.max_hr),
        format!("{:.0}", a.calories),
    ]
}

pub async fn list(
    client: &dyn ConnectClient,
    display_name: Option<&str>,
    out: &mut dyn Write,
) -> CliResult<()> {
    let activities = client.activities(display_name, 0, PAGE_SIZE).await?;
    let mut table = Table::new(LIST_HEADERS);
    for a in &activities {
        table.add_row(list_row(a));
    }
    debug!(rows = table.len(), "fetched activities");
    table.write_to(out)?;
    Ok(())
}

pub async fn view(client: &dyn ConnectClient, id: ActivityId, out: &mut dyn Write) -> CliResult<()> {
    let activity = client.activity(id).await?;

    let mut t = Tabular::new();
    t.add_value("ID", activity.id);
    t.add_value("Name", &activity.activity_name);
    t.write_to(out)?;
    Ok(())
}

pub async fn view_weather(
    client: &dyn ConnectClient,
    id: ActivityId,
    out: &mut dyn Write,
) -> CliResult<()> {
    let w = client.activity_weather(id).await?;

    let mut t = Tabular::new();
    t.add_value_unit("Temperature", w.temp, "°F");
    t.add_value_unit("Apparent Temperature", w.apparent_temp, "°F");
    t.add_value_unit("Dew Point", w.dew_point, "°F");
    t.add_value_unit("Relative Humidity", w.relative_humidity, "%");
    t.add_value_unit("Wind Direction", w.wind_direction, &w.wind_direction_compass_point);
    t.add_value_unit("Wind Speed", w.wind_speed, "mph");
    t.add_value("Latitude", w.latitude);
    t.add_value("Longitude", w.longitude);
    t.write_to(out)?;
    Ok(())
}

/// Export `id` as `<dir>/<id>.<ext>` and return the path written.
///
/// The file is created or truncated before the download starts. If the export
/// fails, the partially written file is removed again.
pub async fn export(
    client: &dyn ConnectClient,
    id: ActivityId,
    format: ExportFormat,
    dir: &Path,
) -> CliResult<PathBuf> {
    let path = dir.join(format.filename(id));
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)
        .await
        .map_err(|e| CliError::file(&path, e))?;

    let result = client.export_activity(id, format, &mut file).await;
    match result {
        Ok(bytes) => {
            file.shutdown().await.map_err(|e| CliError::file(&path, e))?;
            info!(path = %path.display(), bytes, "exported activity {}", id);
            Ok(path)
        }
        Err(e) => {
            drop(file);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => warn!(path = %path.display(), "removed incomplete export"),
                Err(rm) => warn!(path = %path.display(), "could not remove incomplete export: {}", rm),
            }
            Err(e.into())
        }
    }
}

pub async fn delete(client: &dyn ConnectClient, id: ActivityId) -> CliResult<()> {
    client.delete_activity(id).await?;
    info!("deleted activity {}", id);
    Ok(())
}

pub async fn rename(client: &dyn ConnectClient, id: ActivityId, new_name: &str) -> CliResult<()> {
    client.rename_activity(id, new_name).await?;
    info!("renamed activity {}", id);
    Ok(())
}
