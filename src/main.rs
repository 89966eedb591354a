// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use subsync::app_config::{self, Config};
use subsync::subtitle_writer::SubtitleFormat;
use subsync::Controller;

/// CLI Wrapper for SubtitleFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSubtitleFormat {
    Srt,
    Vtt,
}

impl From<CliSubtitleFormat> for SubtitleFormat {
    fn from(cli_format: CliSubtitleFormat) -> Self {
        match cli_format {
            CliSubtitleFormat::Srt => SubtitleFormat::Srt,
            CliSubtitleFormat::Vtt => SubtitleFormat::Vtt,
        }
    }
}

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
    /// Generate subtitles and a compliance report from transcripts (default command)
    #[command(alias = "gen")]
    Generate(RunArgs),

    /// Run the pipeline and print the compliance report without writing files
    Check(RunArgs),

    /// Generate shell completions for subsync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// Transcript JSON file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    #[command(flatten)]
    options: RunOptions,
}

#[derive(Args, Debug, Clone)]
struct RunOptions {
    /// Output directory (defaults to the transcript's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Subtitle format
    #[arg(long, value_enum)]
    format: Option<CliSubtitleFormat>,

    /// Maximum characters per line
    #[arg(long)]
    max_chars: Option<usize>,

    /// Maximum lines per subtitle
    #[arg(long)]
    max_lines: Option<usize>,

    /// Use the reading speed limit for children's content
    #[arg(long)]
    children: bool,

    /// Video id to tag the subtitles with
    #[arg(long)]
    video_id: Option<String>,

    /// Language code overriding the transcript language (e.g., 'en', 'fr')
    #[arg(long)]
    language: Option<String>,

    /// Prefix output files with a UTF-8 byte order mark
    #[arg(long)]
    bom: bool,

    /// Exit with an error when a track is not compliant
    #[arg(long)]
    strict: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// SubSync - Subtitle synthesis and compliance validation
///
/// Turns timestamped speech transcripts into readable, broadcast-style
/// subtitles and reports how well they follow timing and layout rules.
#[derive(Parser, Debug)]
#[command(name = "subsync")]
#[command(version)]
#[command(about = "Subtitle synthesis and compliance validation")]
#[command(long_about = "SubSync turns speech transcripts into timed, wrapped subtitles and checks them against broadcast rules.

EXAMPLES:
    subsync talk.json                           # Generate talk.en.srt and talk.en.report.json
    subsync -f talk.json                        # Force overwrite existing files
    subsync --format vtt talk.json              # Write WebVTT instead of SRT
    subsync --children --max-chars 37 talk.json # Stricter limits for young audiences
    subsync check --strict talk.json            # Fail when the track is not compliant
    subsync --log-level debug /transcripts/     # Process an entire directory
    subsync completions bash > subsync.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Transcript JSON file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    #[command(flatten)]
    options: RunOptions,
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
        log::set_boxed_logger(Box::new(CustomLogger::new(level)))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI colour for log level
    fn decoration(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, colour) = Self::decoration(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                colour, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set via set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subsync", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Generate(args)) => run_generate(args),
        Some(Commands::Check(args)) => run_check(args),
        None => {
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;
            run_generate(RunArgs {
                input_path,
                options: cli.options,
            })
        }
    }
}

fn run_generate(args: RunArgs) -> Result<()> {
    let options = &args.options;
    let controller = build_controller(options)?;

    if args.input_path.is_file() {
        // Replaced by `output.output_path` when one is configured
        let output_dir = args.input_path.parent().unwrap_or(Path::new(".")).to_path_buf();

        let report = controller.run(args.input_path.clone(), output_dir, options.force_overwrite)?;
        if options.strict && report.is_some_and(|r| !r.is_compliant) {
            return Err(anyhow!("Subtitle track is not compliant: {:?}", args.input_path));
        }
    } else if args.input_path.is_dir() {
        let summary = controller.run_folder(args.input_path.clone(), options.force_overwrite)?;
        if options.strict && (summary.non_compliant > 0 || summary.failed > 0) {
            return Err(anyhow!(
                "{} track(s) not compliant, {} failed",
                summary.non_compliant,
                summary.failed
            ));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", args.input_path));
    }

    Ok(())
}

fn run_check(args: RunArgs) -> Result<()> {
    let controller = build_controller(&args.options)?;

    if !args.input_path.is_file() {
        return Err(anyhow!("Input file does not exist: {:?}", args.input_path));
    }

    let output = controller.check(&args.input_path)?;
    for issue in &output.report.errors {
        warn!("{}", issue);
    }
    for warning in &output.report.warnings {
        info!("{}", warning);
    }
    info!("{}", output.summary());

    let report_json = serde_json::to_string_pretty(&output.report).context("Failed to serialize report")?;
    println!("{}", report_json);

    if args.options.strict && !output.report.is_compliant {
        return Err(anyhow!("Subtitle track is not compliant: {:?}", args.input_path));
    }
    Ok(())
}

// @returns: Controller built from the config file with CLI overrides applied
fn build_controller(options: &RunOptions) -> Result<Controller> {
    if let Some(level) = &options.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = load_or_create_config(&options.config_path, options)?;
    apply_overrides(&mut config, options);

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?;
    Ok(match &options.video_id {
        Some(video_id) => controller.with_video_id(video_id.clone()),
        None => controller,
    })
}

fn load_or_create_config(config_path: &str, options: &RunOptions) -> Result<Config> {
    if Path::new(config_path).exists() {
        let file = File::open(config_path).context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        let config: Config =
            serde_json::from_reader(reader).context(format!("Failed to parse config file: {}", config_path))?;
        return Ok(config);
    }

    warn!("Config file not found at '{}', creating default config.", config_path);

    let mut config = Config::default();
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    let config_json =
        serde_json::to_string_pretty(&config).context("Failed to serialize default config to JSON")?;
    std::fs::write(config_path, config_json)
        .context(format!("Failed to write default config to file: {}", config_path))?;

    Ok(config)
}

fn apply_overrides(config: &mut Config, options: &RunOptions) {
    if let Some(format) = &options.format {
        config.output.format = format.clone().into();
    }
    if let Some(max_chars) = options.max_chars {
        config.processing.max_chars_per_line = max_chars;
    }
    if let Some(max_lines) = options.max_lines {
        config.processing.max_lines = max_lines;
    }
    if options.children {
        config.processing.is_children_content = true;
    }
    if let Some(language) = &options.language {
        config.transcription.language = Some(language.clone());
    }
    if let Some(output_dir) = &options.output_dir {
        config.output.output_path = Some(output_dir.clone());
    }
    if options.bom {
        config.output.include_bom = true;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
}
