use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rPaylogger
/// CLI application to clock working hours and compute tiered overtime pay
#[derive(Parser)]
#[command(
    name = "rpaylogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Clock in/out, track breaks and compute tiered-overtime pay",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing or invalid fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Clock in: start a new work session
    In,

    /// Start a break in the active session
    Break,

    /// End the current break
    Resume,

    /// Clock out: finalize the active session into a work log
    Out {
        /// Hourly rate for this entry (defaults to the configured rate)
        #[arg(long = "rate")]
        rate: Option<f64>,

        /// Save even when the billable time rounds down to zero
        #[arg(long = "force", short = 'f')]
        force: bool,
    },

    /// Show the active session
    Status,

    /// Manually add a work log
    Add {
        /// Date of the shift (YYYY-MM-DD)
        date: String,

        #[arg(long = "in", help = "Start time (HH:MM)")]
        start: String,

        #[arg(long = "out", help = "End time (HH:MM); earlier than --in means overnight")]
        end: String,

        #[arg(
            long = "break",
            help = "Break duration in minutes",
            conflicts_with_all = ["break_start", "break_end"]
        )]
        break_minutes: Option<i64>,

        #[arg(long = "break-start", help = "Break start (HH:MM)", requires = "break_end")]
        break_start: Option<String>,

        #[arg(long = "break-end", help = "Break end (HH:MM)", requires = "break_start")]
        break_end: Option<String>,

        #[arg(long = "rate", help = "Hourly rate (defaults to the configured rate)")]
        rate: Option<f64>,

        #[arg(long = "note", help = "Free text note")]
        note: Option<String>,
    },

    /// List work logs
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,
    },

    /// Show daily or monthly totals
    Summary {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long = "monthly", help = "Group by month instead of by day")]
        monthly: bool,
    },

    /// Delete a work log by id (a unique prefix of at least 4 characters works)
    Del {
        id: String,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Export work logs
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Reconcile with the remote store (pull by default)
    Sync {
        #[arg(long = "push", help = "Overwrite the remote with the local state")]
        push: bool,
    },

    /// Follow the active session until it ends (Ctrl-C to stop)
    Watch,
}
