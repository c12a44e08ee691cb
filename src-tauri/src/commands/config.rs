use tauri::State;
use tracing::info;

use crate::library::Theme;
use crate::state::StudyState;

#[tauri::command]
pub fn get_theme(state: State<'_, StudyState>) -> Result<Theme, String> {
    let theme = state.preferences()?.theme();
    info!("Getting theme: {:?}", theme);
    Ok(theme)
}

#[tauri::command]
pub fn set_theme(state: State<'_, StudyState>, theme: Theme) -> Result<(), String> {
    state.preferences()?.set_theme(theme)?;
    Ok(())
}
