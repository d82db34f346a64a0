use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use marc_audit::cli::{
    handle_diff_command, handle_flatten_command, handle_process_command, DiffArgs, FlattenArgs,
    ProcessArgs,
};
use marc_audit::config::{AuditPaths, Settings};

#[derive(Parser)]
#[command(
    name = "marc-audit",
    version,
    about = "Field-level audit diffs for MARC record change events",
    long_about = "marc-audit turns create, update and delete events for MARC \
                  bibliographic and authority records into audit entities that \
                  record which fields changed, who changed them, and when."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn a JSONL stream of record events into JSONL audit entities
    Process(ProcessArgs),

    /// Show the diff between two record files
    Diff(DiffArgs),

    /// Show how a record file is flattened
    Flatten(FlattenArgs),

    /// Show current configuration and paths
    Config {
        /// Write the current settings to the settings file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = AuditPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Logs go to stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Process(args)) => handle_process_command(&settings, args)?,
        Some(Commands::Diff(args)) => handle_diff_command(&settings, args)?,
        Some(Commands::Flatten(args)) => handle_flatten_command(&settings, args)?,
        Some(Commands::Config { init }) => {
            if init {
                settings.save(&paths)?;
                info!(path = %paths.settings_file().display(), "settings written");
            }

            println!("marc-audit Configuration");
            println!("========================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!(
                "  (exists: {})",
                if paths.is_initialized() { "yes" } else { "no" }
            );
            println!();
            println!("Settings:");
            println!("  Log level:               {}", settings.log_level);
            println!("  Pretty output:           {}", settings.pretty_output);
            println!(
                "  Skip unsupported events: {}",
                settings.skip_unsupported_events
            );
            println!(
                "  Audited record types:    {}",
                settings
                    .audited_record_types
                    .iter()
                    .map(|rt| rt.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        None => {
            println!("marc-audit - Field-level audit diffs for MARC records");
            println!();
            println!("Run 'marc-audit --help' for usage information.");
        }
    }

    Ok(())
}
