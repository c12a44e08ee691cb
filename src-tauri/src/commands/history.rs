//! Tauri commands for generation history.

use tauri::State;
use tracing::info;

use crate::library::HistoryEntry;
use crate::state::StudyState;

/// List all history entries, newest first.
#[tauri::command]
pub fn list_history(state: State<'_, StudyState>) -> Result<Vec<HistoryEntry>, String> {
    let entries = state.history()?.list().to_vec();
    info!("Listed {} history entries", entries.len());
    Ok(entries)
}

/// Look up one entry for replay. Nothing is modified.
#[tauri::command]
pub fn get_history_entry(
    state: State<'_, StudyState>,
    id: String,
) -> Result<Option<HistoryEntry>, String> {
    Ok(state.history()?.select(&id).cloned())
}

/// Delete an entry. Unknown ids are ignored.
#[tauri::command]
pub fn delete_history_entry(state: State<'_, StudyState>, id: String) -> Result<(), String> {
    state.history()?.remove(&id)?;
    Ok(())
}
