pub mod commands;
pub mod config;
pub mod credential;
mod error;
pub mod generation;
pub mod library;
pub mod state;
pub mod store;

pub use error::{GenerationFailure, StudyError, GENERATION_FAILED_MESSAGE};
pub use state::StudyState;

use std::sync::Arc;

use serde::Serialize;
use tauri::{Emitter, Manager};
use tauri_plugin_store::StoreExt;

use credential::KeychainCredentials;
use generation::GeminiClient;
use store::{PluginStore, Slot, STORE_FILE};

/// Payload of the `slot-changed` event.
#[derive(Debug, Clone, Serialize)]
struct SlotChanged {
    slot: Slot,
}

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            commands::keychain::set_api_key,
            commands::keychain::get_api_key,
            commands::keychain::delete_api_key,
            commands::config::get_theme,
            commands::config::set_theme,
            commands::generation::generate_passage,
            commands::history::list_history,
            commands::history::get_history_entry,
            commands::history::delete_history_entry,
            commands::vocabulary::list_saved_words,
            commands::vocabulary::save_word,
            commands::vocabulary::delete_saved_word,
        ])
        .setup(|app| {
            let store = app.store(STORE_FILE)?;
            let generation_config =
                config::resolve_config(config::user_config_path().as_deref());

            let state = StudyState::new(
                Arc::new(PluginStore::new(store)),
                Arc::new(KeychainCredentials::default()),
                Arc::new(GeminiClient::new(generation_config)),
            );

            // Let the frontend refresh panels whenever a slot is written
            let handle = app.handle().clone();
            state.slots.subscribe(move |slot| {
                if let Err(e) = handle.emit("slot-changed", SlotChanged { slot }) {
                    tracing::warn!("Failed to emit slot-changed for {}: {}", slot.key(), e);
                }
            });

            app.manage(state);
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
