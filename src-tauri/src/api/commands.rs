use serde_json::{Map, Value};
use tauri::State;

use super::{
    err::RosterError,
    panel::PanelSnapshot,
    query::criteria_from_json,
    validator::StudentForm,
    AppState,
};

/// current table, used on first render and after an alert
#[tauri::command]
pub fn panel_snapshot(state: State<'_, AppState>) -> PanelSnapshot {
    let today = state.settings.today();
    state.panel().snapshot(today)
}

/// Validation problems come back inside the snapshot; the table is unchanged
/// in that case.
#[tauri::command]
pub fn add_student(form: StudentForm, state: State<'_, AppState>) -> PanelSnapshot {
    let today = state.settings.today();
    let mut panel = state.panel();
    // rejected forms are already logged and kept for the snapshot
    let _ = panel.submit(&form, today);
    panel.snapshot(today)
}

#[tauri::command]
pub fn sort_students(
    column: String,
    state: State<'_, AppState>,
) -> Result<PanelSnapshot, RosterError> {
    let today = state.settings.today();
    let mut panel = state.panel();
    panel.sort_by(&column)?;
    Ok(panel.snapshot(today))
}

#[tauri::command]
pub fn filter_students(
    criteria: Map<String, Value>,
    state: State<'_, AppState>,
) -> Result<PanelSnapshot, RosterError> {
    let today = state.settings.today();
    let criteria = criteria_from_json(&criteria)?;
    let mut panel = state.panel();
    panel.apply_filter(criteria)?;
    Ok(panel.snapshot(today))
}

#[tauri::command]
pub fn reset_filter(state: State<'_, AppState>) -> PanelSnapshot {
    let today = state.settings.today();
    let mut panel = state.panel();
    panel.reset_filter();
    panel.snapshot(today)
}
