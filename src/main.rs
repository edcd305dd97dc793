use clap::Parser;
use log::{info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::str::FromStr;
use std::sync::Arc;

use chatline::api::HttpChatClient;
use chatline::core::config::{self, CliOverrides};

#[derive(Parser)]
#[command(name = "chatline", about = "Terminal chat client for a /chat endpoint")]
struct Args {
    /// Chat endpoint URL (overrides config file and CHATLINE_ENDPOINT)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Log level written to the log file (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The logger depends on config, so config errors are reported once it is up
    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (config::ChatlineConfig::default(), Some(e)),
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            endpoint: args.endpoint,
            log_level: args.log_level,
        },
    );

    // Initialize file logger; the terminal itself belongs to the UI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = LevelFilter::from_str(&resolved.log_level).unwrap_or(LevelFilter::Debug);
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    if let Some(e) = config_error {
        warn!("{e}; falling back to defaults");
    }
    info!("chatline starting up, endpoint: {}", resolved.endpoint);

    let client = HttpChatClient::new(resolved.endpoint.clone(), resolved.timeout)
        .map_err(std::io::Error::other)?;

    chatline::tui::run(resolved, Arc::new(client))
}
