mod commands;
pub mod config;
pub mod dashboard;
pub mod detection;
mod http_client;

use commands::*;
use config::DetectorConfig;
use dashboard::DashboardCounters;
use detection::{DetectionPipeline, HttpClassifier};
use tracing_subscriber::EnvFilter;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Load .env file - try multiple locations
    // During `tauri dev`, CWD is project root; check current dir first
    if dotenvy::dotenv().is_err() {
        // Fallback: check parent directory (if running from src-tauri)
        let _ = dotenvy::from_path("../.env");
    }

    // Initialize tracing with RUST_LOG env filter
    // Default: warn for most crates, info for our app (verdicts and fallbacks visible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,fakeguard_lib=info")),
        )
        .init();

    let config = DetectorConfig::from_env();
    tracing::info!(base_url = %config.base_url, "Classification service configured");

    let pipeline = DetectionPipeline::with_http(HttpClassifier::new(config));
    let counters = DashboardCounters::default();
    let ticker_counters = counters.clone();

    tauri::Builder::default()
        .manage(pipeline)
        .manage(counters)
        .setup(move |app| {
            dashboard::spawn_ticker(app.handle().clone(), ticker_counters);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Detection commands
            validate_submission,
            submit_detection,
            is_detection_busy,
            load_result_page,
            get_detection_result,
            clear_detection_result,
            get_service_health,
            // Dashboard commands
            get_dashboard_stats,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
