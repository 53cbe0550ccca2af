use clap::Parser;
use log::warn;
use msgfeed::core::config::{self, CliOverrides, FeedConfig};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "msgfeed", about = "Terminal client for the message board API")]
struct Args {
    /// API base URL (e.g. http://localhost:5000/api)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Messages requested per page
    #[arg(short, long)]
    per_page: Option<u32>,

    /// Path to open first: "/", "/login" or "/messages"
    #[arg(short, long)]
    route: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to msgfeed.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("msgfeed.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("{}, using defaults", e);
        FeedConfig::default()
    });
    let cli = CliOverrides {
        base_url: args.base_url,
        per_page: args.per_page,
        route: args.route,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "msgfeed starting: base_url={}, per_page={}",
        resolved.base_url,
        resolved.per_page
    );

    msgfeed::tui::run(resolved)
}
