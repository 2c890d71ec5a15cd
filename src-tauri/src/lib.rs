pub mod api;
pub mod config;
pub mod logger;

pub use api::{
    err::{RosterError, RosterResult, ValidationErrors},
    panel::{Panel, PanelSnapshot, StudentRow, ViewState},
    query::{Column, Criterion, FilterField, FilterForm},
    store::Roster,
    student::{Course, StudentRecord},
    validator::StudentForm,
    AppState,
};
pub use config::Settings;
