use tauri::State;
use tracing::info;

use crate::library::SavedWord;
use crate::state::StudyState;

#[tauri::command]
pub fn list_saved_words(state: State<'_, StudyState>) -> Result<Vec<SavedWord>, String> {
    Ok(state.vocabulary()?.list().to_vec())
}

/// Returns whether the word was newly saved; duplicates are a silent no-op.
#[tauri::command]
pub fn save_word(state: State<'_, StudyState>, word: String) -> Result<bool, String> {
    let saved = state.vocabulary()?.append(&word)?;
    if !saved {
        info!("Word '{}' already saved or blank, skipping", word.trim());
    }
    Ok(saved)
}

#[tauri::command]
pub fn delete_saved_word(state: State<'_, StudyState>, word: String) -> Result<(), String> {
    state.vocabulary()?.remove(&word)?;
    Ok(())
}
