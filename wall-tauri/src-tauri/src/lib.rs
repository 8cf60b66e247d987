pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod shared;
pub mod state;

#[cfg(feature = "desktop")]
use tauri::Manager;
#[cfg(feature = "desktop")]
use tracing::info;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
/// Run the Tauri application
///
/// # Panics
///
/// Panics if the configuration is invalid or the Tauri application fails to run
pub fn run() {
    use presentation::commands::{profile_commands, wall_commands};
    use presentation::ipc::{IpcAlertNotifier, IpcFeedNotifier};
    use shared::AppConfig;
    use state::AppState;
    use std::sync::Arc;

    // ログ設定の初期化
    init_logging();

    info!("Wall application starting...");

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .invoke_handler(tauri::generate_handler![
            // ウォール関連コマンド
            wall_commands::open_wall,
            wall_commands::close_wall,
            wall_commands::get_wall,
            wall_commands::update_draft,
            wall_commands::select_post_photo,
            wall_commands::share_post,
            // プロフィールカード関連コマンド
            profile_commands::get_profile_card,
            profile_commands::change_profile_photo,
            profile_commands::toggle_profile_editing,
            profile_commands::update_profile_info,
            profile_commands::update_display_name,
        ])
        .setup(|app| {
            let app_handle = app.handle();

            let config = AppConfig::from_env();
            let app_state = AppState::new(
                config,
                Arc::new(IpcAlertNotifier::new(app_handle)),
                Arc::new(IpcFeedNotifier::new(app_handle)),
            )
            .expect("Failed to initialize app state");

            app_handle.manage(app_state);

            info!("Application setup complete");
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

/// `RUST_LOG` が無ければ `wall=debug,info`
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wall=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
