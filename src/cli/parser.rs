use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for rfleetlog
#[derive(Parser)]
#[command(
    name = "rfleetlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Log vehicle movements and fuel events to a CSV file mirrored on GitHub",
    long_about = None
)]
pub struct Cli {
    /// Use this configuration file instead of the standard one
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the local log file path
    #[arg(global = true, long = "file", value_name = "FILE")]
    pub file: Option<String>,

    /// Print debug diagnostics on stderr
    #[arg(global = true, long = "verbose", short = 'v')]
    pub verbose: bool,

    /// Run in test mode (no config file written by init)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration file and an empty log file
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration (token masked)")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use with --edit")]
        editor: Option<String>,
    },

    /// Log one vehicle movement / fuel event
    Submit {
        #[arg(long, help = "Vehicle (one of the configured vehicles)")]
        vehicle: String,

        #[arg(long, help = "Driver name (fleet logs; defaults to the first configured driver)")]
        driver: Option<String>,

        #[arg(long, help = "Trip purpose (one of the configured purposes)")]
        purpose: String,

        #[arg(long = "start-km", default_value_t = 0, help = "Start KM reading")]
        start_km: u64,

        #[arg(long = "end-km", default_value_t = 0, help = "End KM reading (0 = not yet known)")]
        end_km: u64,

        #[arg(long = "fuel", default_value_t = 0.0, help = "Fuel added (litres)")]
        fuel: f64,

        #[arg(long = "auth-by", default_value = "", help = "Authorized by")]
        auth_by: String,

        #[arg(long, default_value = "", help = "Location / destination")]
        location: String,

        #[arg(long, default_value = "", help = "Item details / remarks")]
        items: String,

        #[arg(long, value_name = "IMAGE", help = "Photo of bill, odometer or loading")]
        photo: Option<PathBuf>,
    },

    /// Show the most recent movements, newest first
    History {
        #[arg(long, short = 'n', help = "Number of rows (default from config)")]
        limit: Option<usize>,
    },

    /// List logged photos or extract one
    Photo {
        #[arg(long = "list", help = "List records that carry a photo")]
        list: bool,

        #[arg(
            long = "select",
            value_name = "N|LABEL",
            requires = "out",
            help = "Photo to extract: position from --list or the full label"
        )]
        select: Option<String>,

        #[arg(
            long = "out",
            value_name = "FILE",
            requires = "select",
            help = "Where to write the selected photo"
        )]
        out: Option<PathBuf>,
    },
}
