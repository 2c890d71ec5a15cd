use std::fmt;

use time::{macros::format_description, Date};

/// years between admission and graduation
pub const STUDY_YEARS: i32 = 4;

/// 学生记录, 创建后不可修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    // 名
    name: String,
    // 姓
    surname: String,
    // 父称
    middlename: String,
    // 出生日期
    date_of_birth: Date,
    // 入学年份
    year_of_admission: i32,
    // 院系
    faculty: String,
}

/// 当前所在年级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Course {
    Year(i32),
    Graduated,
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Course::Year(n) => write!(f, "{} course", n),
            Course::Graduated => write!(f, "graduated"),
        }
    }
}

impl StudentRecord {
    /// Only the validator builds records, so every stored record has passed
    /// all checks.
    pub(crate) fn new(
        name: String,
        surname: String,
        middlename: String,
        date_of_birth: Date,
        year_of_admission: i32,
        faculty: String,
    ) -> Self {
        Self {
            name,
            surname,
            middlename,
            date_of_birth,
            year_of_admission,
            faculty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn middlename(&self) -> &str {
        &self.middlename
    }

    pub fn date_of_birth(&self) -> Date {
        self.date_of_birth
    }

    pub fn year_of_admission(&self) -> i32 {
        self.year_of_admission
    }

    pub fn faculty(&self) -> &str {
        &self.faculty
    }

    /// surname, name and middle name joined by single spaces
    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.surname, self.name, self.middlename)
    }

    pub fn year_of_graduation(&self) -> i32 {
        self.year_of_admission + STUDY_YEARS
    }

    /// Whole years lived on `today`, counting a year as 365.25 days.
    pub fn age(&self, today: Date) -> i64 {
        let days = (today - self.date_of_birth).whole_days();
        (days as f64 / 365.25).floor() as i64
    }

    /// The graduation year itself still counts as a course; only later years
    /// read as graduated.
    pub fn course(&self, today: Date) -> Course {
        if today.year() > self.year_of_graduation() {
            Course::Graduated
        } else {
            Course::Year(today.year() - self.year_of_admission)
        }
    }
}

/// day/month/year, as shown in the table and in range messages
pub fn format_date(date: Date) -> String {
    date.format(format_description!("[day].[month].[year]"))
        .unwrap_or_else(|_| date.to_string())
}
