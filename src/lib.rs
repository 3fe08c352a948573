pub mod commands;
pub mod engine;
pub mod models;

pub use engine::{recalculate, Estimator};

/// Initializes `env_logger` once; `RUST_LOG` overrides the default `info` filter.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use commands::{
        estimator::{
            decrement_count, focus_battery, get_estimate, increment_count, load_catalog,
            navigate_step, recalculate_snapshot, set_future_option, EstimatorSession,
        },
        settings::{get_settings, load_effective_constants, save_settings},
        snapshot::{build_snapshot, estimate_from_raw},
    };
    use std::sync::{Arc, Mutex};
    use tauri::Manager;

    init_logging();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let config_dir = app.path().app_config_dir()?;
            let constants = load_effective_constants(&config_dir.to_string_lossy())
                .unwrap_or_else(|e| {
                    log::warn!("Falling back to default constants: {e}");
                    models::constants::EstimatorConstants::default()
                });
            app.manage(Arc::new(Mutex::new(EstimatorSession::new(constants))));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            load_catalog,
            get_estimate,
            increment_count,
            decrement_count,
            set_future_option,
            navigate_step,
            focus_battery,
            recalculate_snapshot,
            build_snapshot,
            estimate_from_raw,
            get_settings,
            save_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
