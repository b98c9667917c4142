//! SwarmCD Dashboard - Entry Point
//!
//! Watches the stacks managed by a SwarmCD server and serves their status,
//! with staged updates and free-text search, on a local HTTP port.

use std::collections::HashMap;
use std::env;
use std::process::ExitCode;

use swarmcd_dashboard::app::run::run;
use swarmcd_dashboard::errors::DashboardError;
use swarmcd_dashboard::filesys::file::File;
use swarmcd_dashboard::filter::filter_statuses;
use swarmcd_dashboard::http::client::HttpClient;
use swarmcd_dashboard::logs::init_logging;
use swarmcd_dashboard::render::render_cards;
use swarmcd_dashboard::settings::Settings;
use swarmcd_dashboard::utils::version_info;

use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut cli_args: HashMap<String, String> = HashMap::new();

    for arg in args.iter().skip(1) {
        if let Some((key, value)) = arg.split_once('=') {
            // Handle --key=value format
            let clean_key = key.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), value.to_string());
        } else if arg.starts_with("--") {
            // Handle standalone flags like --version
            let clean_key = arg.trim_start_matches('-');
            cli_args.insert(clean_key.to_string(), "true".to_string());
        }
    }

    // Print version and exit
    if cli_args.contains_key("version") {
        match serde_json::to_string_pretty(&version_info()) {
            Ok(version) => println!("{}", version),
            Err(e) => eprintln!("Failed to serialize version info: {e}"),
        }
        return ExitCode::SUCCESS;
    }

    // Retrieve the settings file
    let settings = match cli_args.get("config") {
        Some(path) => {
            let settings_file = File::new(path);
            if !settings_file.exists().await {
                eprintln!("Settings file {} does not exist", settings_file.path().display());
                return ExitCode::FAILURE;
            }
            match Settings::load(settings_file.path()).await {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("Unable to read settings file: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        None => Settings::default(),
    };

    // Initialize logging
    let _log_guard = match init_logging(settings.log_options()) {
        Ok(guard) => guard,
        Err(e) => {
            println!("Failed to initialize logging: {e}");
            None
        }
    };

    // One-shot listing
    if cli_args.contains_key("once") {
        let query = cli_args.get("query").map(String::as_str).unwrap_or("");
        return match print_once(&settings, query).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("Failed to fetch stack statuses: {e}");
                ExitCode::FAILURE
            }
        };
    }

    // Run the dashboard
    let options = settings.app_options();
    info!("Running SwarmCD dashboard with options: {:?}", options);
    match run(options, await_shutdown_signal()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Failed to run the dashboard: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn print_once(settings: &Settings, query: &str) -> Result<(), DashboardError> {
    let options = settings.app_options();
    let client = HttpClient::with_timeout(&options.source.base_url, options.source.timeout)?;
    let snapshot = client.fetch_stacks().await?;
    let visible = filter_statuses(&snapshot, query);
    print!("{}", render_cards(&visible));
    Ok(())
}

async fn await_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).unwrap();
        let mut sigint = signal(SignalKind::interrupt()).unwrap();

        tokio::select! {
            _ = sigterm.recv() => {
                info!("SIGTERM received, shutting down...");
            }
            _ = sigint.recv() => {
                info!("SIGINT received, shutting down...");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl+C received, shutting down...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
        info!("Ctrl+C received, shutting down...");
    }
}
