//! Dispatch of parsed commands to their operations.

use std::io::Write;
use std::path::Path;

use garmin_connect_client::ConnectClient;
use tracing::instrument;

use crate::cli::{ActivitiesCommand, Commands, ViewCommand};
use crate::domains::activities;
use crate::error::{CliError, CliResult};

/// Run one command against `client`. Tables go to `out`; exports land in `export_dir`.
#[instrument(skip(client, out))]
pub async fn execute(
    command: &Commands,
    client: &dyn ConnectClient,
    out: &mut dyn Write,
    export_dir: &Path,
) -> CliResult<()> {
    match command {
        Commands::Activities { command } => match command {
            ActivitiesCommand::List { display_name } => {
                activities::list(client, display_name.as_deref(), out).await
            }
            ActivitiesCommand::View {
                command: Some(ViewCommand::Weather { activity_id }),
                ..
            } => activities::view_weather(client, *activity_id, out).await,
            ActivitiesCommand::View {
                activity_id: Some(activity_id),
                command: None,
            } => activities::view(client, *activity_id, out).await,
            ActivitiesCommand::View {
                activity_id: None,
                command: None,
            } => Err(CliError::Usage("view: missing <ACTIVITY_ID>".into())),
            ActivitiesCommand::Export {
                activity_id,
                format,
            } => activities::export(client, *activity_id, *format, export_dir)
                .await
                .map(|_| ()),
            ActivitiesCommand::Delete { activity_id } => {
                activities::delete(client, *activity_id).await
            }
            ActivitiesCommand::Rename {
                activity_id,
                new_name,
            } => activities::rename(client, *activity_id, new_name).await,
        },
    }
}
