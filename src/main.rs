// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use nwextract::app_config::{self, Config};
use nwextract::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for nwextract
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// nwextract - scene grid export for novelWriter projects
///
/// Reads the scenes of a novelWriter project and writes them as a table,
/// one row per scene.
#[derive(Parser, Debug)]
#[command(name = "nwextract")]
#[command(version)]
#[command(about = "Export novelWriter scenes to a spreadsheet")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "nwextract reads the scenes of a novelWriter project and writes one row per scene.

EXAMPLES:
    nwextract ~/novels/book scenes.xlsx                  # Every attribute in use
    nwextract ~/novels/book scenes.ods format.json       # Columns from a rule file
    nwextract --log-level debug ~/novels/book grid.csv   # Verbose run
    nwextract completions bash > nwextract.bash          # Generate bash completions

The output type is taken from the file extension: csv, html, ods or xlsx.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// novelWriter project folder
    #[arg(value_name = "PROJECT_FOLDER")]
    project_folder: Option<PathBuf>,

    /// Output file; its extension selects the format
    #[arg(value_name = "OUTPUT_FILE")]
    output_file: Option<PathBuf>,

    /// Column rule file (JSON)
    #[arg(value_name = "FORMAT_FILE")]
    format_file: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // The logger accepts everything; the global max level does the filtering
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI colour for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn print_usage() {
    println!("nwextract version {}", env!("CARGO_PKG_VERSION"));
    println!("Usage: nwextract [OPTIONS] <PROJECT_FOLDER> <OUTPUT_FILE> [FORMAT_FILE]");
    println!("Example: nwextract ~/novels/book scenes.xlsx format.json");
    println!("Supported output file types: CSV, HTML, ODS, XLSX");
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "nwextract", &mut std::io::stdout());
        return Ok(());
    }

    let (Some(project_folder), Some(output_file)) = (&cli.project_folder, &cli.output_file) else {
        print_usage();
        return Ok(());
    };

    if let Some(cli_level) = &cli.log_level {
        let level: app_config::LogLevel = cli_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config file: {:?}", path))?,
        None => Config::default(),
    };

    // Command line log level wins over the configured one
    match &cli.log_level {
        Some(cli_level) => config.log_level = cli_level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }
    debug!("Using configuration: {:?}", config);

    let controller = Controller::with_config(config).context("Configuration validation failed")?;

    match controller.export(project_folder, output_file, cli.format_file.as_deref()) {
        Ok(summary) => {
            info!(
                "Exported {} scenes to {:?} ({} rows, {} columns)",
                summary.scenes, output_file, summary.rows, summary.columns
            );
        }
        Err(e) => {
            println!("Extract failed: {}", e);
        }
    }

    Ok(())
}
