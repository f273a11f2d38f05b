// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand, Args};
use clap_complete::{generate, Shell};

use scenescript::app_config::{self, Config};
use scenescript::app_controller::{Controller, RunStatus};

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
    /// Parse scripts into scene lists (default command)
    Parse(ParseArgs),

    /// Print scene statistics for a script or a scenes JSON file
    Stats(StatsArgs),

    /// Generate shell completions for scenescript
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by every command that loads the configuration
#[derive(Args, Debug, Clone)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Args, Debug)]
struct ParseArgs {
    /// Input script file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Directory for output files (defaults to the script's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Do not write the dialogue and visual stream files
    #[arg(long)]
    no_streams: bool,

    /// Print scene statistics after parsing a single file
    #[arg(long)]
    stats: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// Script text file or scenes JSON file
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Print statistics as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    common: CommonArgs,
}

/// scenescript - screenplay scene graph parser
///
/// Turns loosely structured video scripts into scene lists and extracts the
/// dialogue and visual-prompt streams used by audio and image tooling.
#[derive(Parser, Debug)]
#[command(name = "scenescript")]
#[command(version)]
#[command(about = "Screenplay scene graph parser")]
#[command(long_about = "scenescript parses screenplay-style scripts into structured scene lists.

EXAMPLES:
    scenescript episode.txt                     # Parse using default config
    scenescript -f episode.txt                  # Force overwrite existing outputs
    scenescript -o out/ episode.txt             # Write outputs to out/
    scenescript --no-streams episode.txt        # Only write episode.scenes.json
    scenescript --log-level debug scripts/      # Process a directory with debug logging
    scenescript stats episode.scenes.json       # Statistics for a parsed script
    scenescript completions bash > scenescript.bash

OUTPUTS:
    <stem>.scenes.json    Scene list: metadata entry followed by scenes
    <stem>_audio.txt      One spoken line per row, [CHARACTER] text
    <stem>_imagegen.txt   One visual prompt per row, [Visual] description

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input script file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Directory for output files (defaults to the script's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Do not write the dialogue and visual stream files
    #[arg(long)]
    no_streams: bool,

    /// Print scene statistics after parsing a single file
    #[arg(long)]
    stats: bool,

    #[command(flatten)]
    common: CommonArgs,
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
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and marker for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
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
            let (color, marker) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, marker, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through log::set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "scenescript", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Parse(args)) => run_parse(args).await,
        Some(Commands::Stats(args)) => run_stats(args).await,
        None => {
            // Default behavior - top-level args behave like `parse`
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let parse_args = ParseArgs {
                input_path,
                force_overwrite: cli.force_overwrite,
                output_dir: cli.output_dir,
                no_streams: cli.no_streams,
                stats: cli.stats,
                common: cli.common,
            };
            run_parse(parse_args).await
        }
    }
}

/// Load or create the configuration and apply the effective log level
fn load_config(common: &CommonArgs) -> Result<Config> {
    // A command line log level applies before the config is read
    if let Some(cmd_log_level) = &common.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config_path = Path::new(&common.config_path);
    let mut config = if config_path.exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", common.config_path);

        let config = Config::default();
        config.save(config_path)?;
        config
    };

    if let Some(log_level) = &common.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate()?;

    log::set_max_level(config.log_level.to_level_filter());

    Ok(config)
}

async fn run_parse(options: ParseArgs) -> Result<()> {
    let mut config = load_config(&options.common)?;

    if options.no_streams {
        config.output.write_streams = false;
    }

    let controller = Controller::with_config(config)?;

    if options.input_path.is_file() {
        // A bare file name has an empty parent
        let output_dir = options.output_dir.clone().unwrap_or_else(|| {
            options.input_path.parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or(Path::new("."))
                .to_path_buf()
        });

        let status = controller.run(
            options.input_path.clone(),
            output_dir,
            options.force_overwrite
        ).await?;

        if let (true, RunStatus::Processed(stats)) = (options.stats, &status) {
            print!("{}", stats);
        }
    } else if options.input_path.is_dir() {
        if options.output_dir.is_some() {
            warn!("--output-dir is ignored in folder mode; outputs are written next to each script");
        }

        let summary = controller.run_folder(
            options.input_path.clone(),
            options.force_overwrite
        ).await?;

        if summary.errors > 0 {
            return Err(anyhow!("{} script(s) failed to process", summary.errors));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}

async fn run_stats(options: StatsArgs) -> Result<()> {
    let config = load_config(&options.common)?;
    let controller = Controller::with_config(config)?;

    info!("Computing statistics for {:?}", options.input_path);
    let stats = controller.report_stats(&options.input_path).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", stats);
    }

    Ok(())
}
