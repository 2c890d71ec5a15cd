use serde::Deserialize;
use time::{
    macros::{date, format_description},
    Date,
};

use super::err::ValidationErrors;
use super::student::{format_date, StudentRecord};

/// earliest accepted year of admission
pub const FIRST_ADMISSION_YEAR: i32 = 2000;

/// 新增学生表单的原始输入
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentForm {
    pub name: String,
    pub surname: String,
    pub middlename: String,
    pub date_of_birth: String,
    pub year_of_admission: String,
    pub faculty: String,
}

/// earliest accepted date of birth
pub const EARLIEST_BIRTH_DATE: Date = date!(1900 - 01 - 01);

/// Checks the create-form against every rule and builds the record only when
/// none of them is violated. Messages come back in rule order.
pub fn validate(form: &StudentForm, today: Date) -> Result<StudentRecord, ValidationErrors> {
    let mut messages = Vec::new();

    let name = required(&form.name, "Name", &mut messages);
    let surname = required(&form.surname, "Surname", &mut messages);
    let middlename = required(&form.middlename, "Middle name", &mut messages);
    let date_of_birth = required(&form.date_of_birth, "Date of birth", &mut messages);
    let year_of_admission = form.year_of_admission.trim().parse::<i32>().ok();
    if year_of_admission.is_none() {
        messages.push(missing("Year of admission"));
    }
    let faculty = required(&form.faculty, "Faculty", &mut messages);

    // an empty date was reported above and has no range to check
    let date_of_birth = date_of_birth.and_then(|raw| {
        let lower = EARLIEST_BIRTH_DATE;
        match parse_date(raw) {
            Some(date) if date >= lower && date <= today => Some(date),
            _ => {
                messages.push(out_of_range(
                    "Date of birth",
                    format_date(lower),
                    format_date(today),
                ));
                None
            }
        }
    });

    let year_of_admission = year_of_admission.and_then(|year| {
        if (FIRST_ADMISSION_YEAR..=today.year()).contains(&year) {
            Some(year)
        } else {
            messages.push(out_of_range(
                "Year of admission",
                FIRST_ADMISSION_YEAR,
                today.year(),
            ));
            None
        }
    });

    match (
        name,
        surname,
        middlename,
        date_of_birth,
        year_of_admission,
        faculty,
    ) {
        (
            Some(name),
            Some(surname),
            Some(middlename),
            Some(date_of_birth),
            Some(year_of_admission),
            Some(faculty),
        ) if messages.is_empty() => Ok(StudentRecord::new(
            name.to_string(),
            surname.to_string(),
            middlename.to_string(),
            date_of_birth,
            year_of_admission,
            faculty.to_string(),
        )),
        _ => Err(ValidationErrors::new(messages)),
    }
}

/// ISO `YYYY-MM-DD`, as sent by a date input
pub fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).ok()
}

fn required<'form>(
    value: &'form str,
    label: &str,
    messages: &mut Vec<String>,
) -> Option<&'form str> {
    let value = value.trim();
    if value.is_empty() {
        messages.push(missing(label));
        None
    } else {
        Some(value)
    }
}

fn missing(label: &str) -> String {
    format!("Fill in field '{}'.", label)
}

fn out_of_range(label: &str, lower: impl ToString, upper: impl ToString) -> String {
    format!(
        "Field '{}' must be in the range from {} to {}.",
        label,
        lower.to_string(),
        upper.to_string()
    )
}
