mod table;

use log::{debug, info, warn};
use time::Date;

pub use table::{PanelSnapshot, StudentRow};

use super::{
    err::{RosterResult, ValidationErrors},
    query::{self, Column, Criterion},
    store::Roster,
    student::StudentRecord,
    validator::{self, StudentForm},
};

/// 当前表格展示的内容
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    All,
    Sorted(Column),
    Filtered(Vec<Criterion>),
}

/// The roster together with whatever view the user asked for last. The view
/// is re-derived from the roster on every read.
#[derive(Debug, Default)]
pub struct Panel {
    roster: Roster,
    view: ViewState,
    // messages of the last submission, kept until the next one
    errors: Vec<String>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    /// Validation messages of the latest submission; empty after a success.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Validates the create-form and appends the student. A rejected form
    /// leaves both the roster and the view as they were.
    pub fn submit(
        &mut self,
        form: &StudentForm,
        today: Date,
    ) -> Result<&StudentRecord, ValidationErrors> {
        self.errors.clear();
        match validator::validate(form, today) {
            Ok(student) => {
                info!("add student {}", student.full_name());
                self.view = ViewState::All;
                Ok(self.roster.push(student))
            }
            Err(errors) => {
                warn!("reject student form: {} problem(s)", errors.messages().len());
                self.errors = errors.messages().to_vec();
                Err(errors)
            }
        }
    }

    /// Sorts the whole roster by the column with this label.
    pub fn sort_by(&mut self, label: &str) -> RosterResult<Vec<StudentRecord>> {
        let column = Column::from_label(label).map_err(|err| {
            warn!("{}", err);
            err
        })?;
        debug!("sort by {}", column);
        self.view = ViewState::Sorted(column);
        Ok(self.view())
    }

    /// Filters the whole roster. The view is applied even when a criterion
    /// holds an unsupported value; that criterion matches nothing and its
    /// error is returned for the user to acknowledge.
    pub fn apply_filter(&mut self, criteria: Vec<Criterion>) -> RosterResult<Vec<StudentRecord>> {
        debug!("filter by {} criteria", criteria.len());
        let error = criteria.iter().find_map(Criterion::error);
        self.view = ViewState::Filtered(criteria);
        match error {
            Some(err) => {
                warn!("{}", err);
                Err(err)
            }
            None => Ok(self.view()),
        }
    }

    pub fn reset_filter(&mut self) -> Vec<StudentRecord> {
        debug!("reset filter");
        self.view = ViewState::All;
        self.view()
    }

    /// The students on display, in display order.
    pub fn view(&self) -> Vec<StudentRecord> {
        let students = self.roster.students();
        match &self.view {
            ViewState::All => students.to_vec(),
            ViewState::Sorted(column) => query::sort(students, *column),
            ViewState::Filtered(criteria) => query::filter(students, criteria),
        }
    }

    pub fn rows(&self, today: Date) -> Vec<StudentRow> {
        self.view()
            .iter()
            .map(|student| StudentRow::new(student, today))
            .collect()
    }

    pub fn snapshot(&self, today: Date) -> PanelSnapshot {
        PanelSnapshot::new(self.rows(today), self.errors.clone())
    }
}
