use chatbot_tui::core::config::{self, CliOverrides, LoadedConfig};
use chatbot_tui::tui;
use clap::{Parser, ValueEnum};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chatbot-tui", about = "Terminal chat client for a low-cost chatbot API")]
struct Args {
    /// Chatbot API base URL (overrides CHATBOT_API_URL and the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Config loads before the logger exists, so its notes and error are held and logged below
    let (loaded, config_error) = match config::load_config() {
        Ok(loaded) => (loaded, None),
        Err(e) => (LoadedConfig::default(), Some(e)),
    };
    let cli = CliOverrides {
        base_url: args.base_url,
        log_file: args.log_file,
        log_level: args.log_level.map(LevelFilter::from),
    };
    let resolved = config::resolve(&loaded.config, &cli);

    // File logger: the terminal belongs to the UI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    for note in loaded.notes.iter().chain(&resolved.notes) {
        log::log!(note.level, "{}", note.message);
    }
    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {}", e);
    }
    log::info!("Chatbot TUI starting up against {}", resolved.base_url);

    tui::run(resolved)
}
