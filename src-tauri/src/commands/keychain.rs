use tauri::State;
use tracing::info;

use crate::state::StudyState;

#[tauri::command]
pub fn set_api_key(state: State<'_, StudyState>, key: &str) -> Result<(), String> {
    state.credentials.set(key)?;
    info!("Stored Gemini API key");
    Ok(())
}

#[tauri::command]
pub fn get_api_key(state: State<'_, StudyState>) -> Result<Option<String>, String> {
    Ok(state.credentials.get()?)
}

#[tauri::command]
pub fn delete_api_key(state: State<'_, StudyState>) -> Result<(), String> {
    state.credentials.clear()?;
    Ok(())
}
