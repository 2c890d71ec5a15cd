// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use student_roster_panel::{api, config::Settings, logger, AppState};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    logger::init(&settings)?;

    tauri::Builder::default()
        .manage(AppState::new(settings))
        .invoke_handler(tauri::generate_handler![
            api::commands::panel_snapshot,
            api::commands::add_student,
            api::commands::sort_students,
            api::commands::filter_students,
            api::commands::reset_filter,
        ])
        .run(tauri::generate_context!())?;

    Ok(())
}
