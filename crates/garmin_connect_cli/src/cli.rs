//! CLI argument definitions using clap

use clap::{ArgAction, Parser, Subcommand};
use garmin_connect_client::{ActivityId, ExportFormat};

/// Command-line client for Garmin Connect activities
#[derive(Parser, Debug)]
#[command(name = "connect")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// API root of the service
    #[arg(long, env = "GARMIN_CONNECT_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// SESSIONID cookie of a logged-in session
    #[arg(long, env = "GARMIN_CONNECT_SESSION", hide_env_values = true, global = true)]
    pub session: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Manage activities
    Activities {
        #[command(subcommand)]
        command: ActivitiesCommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ActivitiesCommand {
    /// List activities
    List {
        /// Display name of the user whose activities to list (default: yourself)
        display_name: Option<String>,
    },

    /// View details for an activity
    #[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
    View {
        /// Activity id
        #[arg(required = true)]
        activity_id: Option<ActivityId>,

        #[command(subcommand)]
        command: Option<ViewCommand>,
    },

    /// Export an activity to a file
    Export {
        /// Activity id
        activity_id: ActivityId,
        /// Format of export (fit, tcx, gpx, kml, csv)
        #[arg(short, long, default_value = "fit")]
        format: ExportFormat,
    },

    /// Delete an activity
    Delete {
        /// Activity id
        activity_id: ActivityId,
    },

    /// Rename an activity
    Rename {
        /// Activity id
        activity_id: ActivityId,
        /// New name, used verbatim
        new_name: String,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ViewCommand {
    /// View weather for an activity
    Weather {
        /// Activity id
        activity_id: ActivityId,
    },
}
