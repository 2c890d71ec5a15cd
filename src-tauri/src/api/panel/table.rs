use serde::Serialize;
use time::Date;

use crate::api::query::Column;
use crate::api::student::{format_date, StudentRecord};

/// 表格中的一行, 各列均已格式化
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudentRow {
    full_name: String,
    faculty: String,
    date_of_birth: String,
    years_of_study: String,
}

impl StudentRow {
    pub fn new(student: &StudentRecord, today: Date) -> Self {
        Self {
            full_name: student.full_name(),
            faculty: student.faculty().to_string(),
            date_of_birth: format!(
                "{} ({})",
                format_date(student.date_of_birth()),
                student.age(today)
            ),
            years_of_study: format!(
                "{} - {} ({})",
                student.year_of_admission(),
                student.year_of_graduation(),
                student.course(today)
            ),
        }
    }
}

/// 提供给前端渲染的完整状态
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PanelSnapshot {
    pub columns: Vec<&'static str>,
    pub rows: Vec<StudentRow>,
    pub errors: Vec<String>,
}

impl PanelSnapshot {
    pub fn new(rows: Vec<StudentRow>, errors: Vec<String>) -> Self {
        Self {
            columns: Column::ALL.iter().map(|column| column.label()).collect(),
            rows,
            errors,
        }
    }
}
