use std::{cmp::Ordering, fmt, str::FromStr};

use serde::Deserialize;
use serde_json::{Map, Value};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use super::err::{RosterError, RosterResult};
use super::student::StudentRecord;

/// 表格的列, 同时也是可排序的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    FullName,
    Faculty,
    DateOfBirth,
    YearsOfStudy,
}

impl Column {
    /// display order of the table
    pub const ALL: [Column; 4] = [
        Column::FullName,
        Column::Faculty,
        Column::DateOfBirth,
        Column::YearsOfStudy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Column::FullName => "Full Name",
            Column::Faculty => "Faculty",
            Column::DateOfBirth => "Date of Birth (age)",
            Column::YearsOfStudy => "Years of Study (course number)",
        }
    }

    pub fn from_label(label: &str) -> RosterResult<Self> {
        Column::ALL
            .into_iter()
            .find(|column| column.label() == label)
            .ok_or_else(|| RosterError::UnknownColumn(label.to_string()))
    }
}

impl FromStr for Column {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::from_label(s)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Locale-style string ordering. Letters compare first without case or
/// accents (`É` next to `E`, `ё` next to `е`), then unaccented before
/// accented, then lowercase before uppercase.
pub fn collate(a: &str, b: &str) -> Ordering {
    fold(a)
        .cmp(fold(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| {
            a.chars()
                .zip(b.chars())
                .map(|(x, y)| lowercase_first(x, y))
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.cmp(b))
}

/// base letters only: decomposed, combining marks dropped, lowercased
fn fold(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn lowercase_first(x: char, y: char) -> Ordering {
    match (x.is_lowercase(), y.is_lowercase()) {
        (true, false) if y.is_uppercase() => Ordering::Less,
        (false, true) if x.is_uppercase() => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Returns the students ordered by `column`, ascending. Equal keys keep their
/// relative order; the input is left untouched.
pub fn sort(students: &[StudentRecord], column: Column) -> Vec<StudentRecord> {
    let mut sorted = students.to_vec();
    match column {
        Column::DateOfBirth => sorted.sort_by_key(StudentRecord::date_of_birth),
        Column::YearsOfStudy => sorted.sort_by_key(StudentRecord::year_of_admission),
        Column::FullName => sorted.sort_by(|a, b| collate(&a.full_name(), &b.full_name())),
        Column::Faculty => sorted.sort_by(|a, b| collate(a.faculty(), b.faculty())),
    }
    sorted
}

/// 可筛选的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    FullName,
    Faculty,
    YearOfAdmission,
    YearOfGraduation,
}

impl FilterField {
    /// Accepts the keys of the filter form.
    pub fn from_key(key: &str) -> RosterResult<Self> {
        match key {
            "name" | "fullName" => Ok(FilterField::FullName),
            "faculty" => Ok(FilterField::Faculty),
            "yearOfAdmission" => Ok(FilterField::YearOfAdmission),
            "yearOfGraduation" => Ok(FilterField::YearOfGraduation),
            _ => Err(RosterError::UnknownCriterion(key.to_string())),
        }
    }

    fn is_numeric(self) -> bool {
        matches!(
            self,
            FilterField::YearOfAdmission | FilterField::YearOfGraduation
        )
    }
}

/// One constraint of the filter form. Text criteria match a case-insensitive
/// substring, numeric ones match exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    FullName(String),
    Faculty(String),
    YearOfAdmission(i32),
    YearOfGraduation(i32),
    /// a value of a type the field cannot be compared with; matches nothing
    Unsupported { field: FilterField, kind: String },
}

impl Criterion {
    /// Builds the criterion for `field` from a raw form string. Empty text and
    /// numbers that do not parse leave the field unconstrained.
    pub fn from_raw(field: FilterField, raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match field {
            FilterField::FullName => Some(Criterion::FullName(raw.to_string())),
            FilterField::Faculty => Some(Criterion::Faculty(raw.to_string())),
            FilterField::YearOfAdmission => raw.parse().ok().map(Criterion::YearOfAdmission),
            FilterField::YearOfGraduation => raw.parse().ok().map(Criterion::YearOfGraduation),
        }
    }

    pub fn from_json(field: FilterField, value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(raw) => Criterion::from_raw(field, raw),
            Value::Number(number) if field.is_numeric() => match json_year(number) {
                Some(year) if field == FilterField::YearOfAdmission => {
                    Some(Criterion::YearOfAdmission(year))
                }
                Some(year) => Some(Criterion::YearOfGraduation(year)),
                None => Some(unsupported(field, "number")),
            },
            other => Some(unsupported(field, json_type(other))),
        }
    }

    pub fn matches(&self, student: &StudentRecord) -> bool {
        match self {
            Criterion::FullName(needle) => contains_ignore_case(&student.full_name(), needle),
            Criterion::Faculty(needle) => contains_ignore_case(student.faculty(), needle),
            Criterion::YearOfAdmission(year) => student.year_of_admission() == *year,
            Criterion::YearOfGraduation(year) => student.year_of_graduation() == *year,
            Criterion::Unsupported { .. } => false,
        }
    }

    /// The usage error to show for an unsupported value.
    pub fn error(&self) -> Option<RosterError> {
        match self {
            Criterion::Unsupported { kind, .. } => {
                Some(RosterError::UnsupportedCriterionType(kind.clone()))
            }
            _ => None,
        }
    }
}

fn unsupported(field: FilterField, kind: &str) -> Criterion {
    Criterion::Unsupported {
        field,
        kind: kind.to_string(),
    }
}

/// Fractions are cut off like the integer part of a typed-in year; numbers
/// outside the `i32` range cannot be a year.
fn json_year(number: &serde_json::Number) -> Option<i32> {
    if let Some(n) = number.as_i64() {
        return i32::try_from(n).ok();
    }
    number
        .as_f64()
        .map(f64::trunc)
        .filter(|n| n.is_finite() && *n >= f64::from(i32::MIN) && *n <= f64::from(i32::MAX))
        .map(|n| n as i32)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// 筛选表单的原始输入
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterForm {
    pub name: String,
    pub faculty: String,
    pub year_of_admission: String,
    pub year_of_graduation: String,
}

impl FilterForm {
    pub fn criteria(&self) -> Vec<Criterion> {
        [
            (FilterField::FullName, &self.name),
            (FilterField::Faculty, &self.faculty),
            (FilterField::YearOfAdmission, &self.year_of_admission),
            (FilterField::YearOfGraduation, &self.year_of_graduation),
        ]
        .into_iter()
        .filter_map(|(field, raw)| Criterion::from_raw(field, raw))
        .collect()
    }
}

/// Criteria from a JSON object of named values, e.g. what the webview sends.
pub fn criteria_from_json(values: &Map<String, Value>) -> RosterResult<Vec<Criterion>> {
    let mut criteria = Vec::with_capacity(values.len());
    for (key, value) in values {
        let field = FilterField::from_key(key)?;
        if let Some(criterion) = Criterion::from_json(field, value) {
            criteria.push(criterion);
        }
    }
    Ok(criteria)
}

/// Students matching every criterion, in their original order. No criteria
/// means no constraint.
pub fn filter(students: &[StudentRecord], criteria: &[Criterion]) -> Vec<StudentRecord> {
    students
        .iter()
        .filter(|student| criteria.iter().all(|criterion| criterion.matches(student)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::validator::{validate, StudentForm};
    use proptest::prelude::*;
    use serde_json::json;
    use time::macros::date;

    fn student(surname: &str, born: &str, admitted: i32, faculty: &str) -> StudentRecord {
        let form = StudentForm {
            name: "Ivan".to_string(),
            surname: surname.to_string(),
            middlename: "Ivanovich".to_string(),
            date_of_birth: born.to_string(),
            year_of_admission: admitted.to_string(),
            faculty: faculty.to_string(),
        };
        validate(&form, date!(2024 - 06 - 01)).unwrap()
    }

    fn roster() -> Vec<StudentRecord> {
        vec![
            student("Petrov", "2001-03-10", 2021, "Physics"),
            student("abramov", "1999-12-01", 2018, "Mathematics"),
            student("Sidorov", "2003-07-21", 2021, "History"),
            student("Ёлкин", "2002-01-15", 2020, "physics"),
            student("Егоров", "2000-09-30", 2019, "Chemistry"),
        ]
    }

    fn surnames(students: &[StudentRecord]) -> Vec<&str> {
        students.iter().map(StudentRecord::surname).collect()
    }

    #[test]
    fn test_column_labels() {
        for column in Column::ALL {
            assert_eq!(Column::from_label(column.label()).unwrap(), column);
        }
        let err = "Email".parse::<Column>().unwrap_err();
        assert_eq!(err.to_string(), "Cannot sort by column Email.");
    }

    #[test]
    fn test_collate() {
        assert_eq!(collate("abramov", "Petrov"), Ordering::Less);
        assert_eq!(collate("Егоров", "Ёлкин"), Ordering::Less);
        assert_eq!(collate("Ёлкин", "Жуков"), Ordering::Less);
        assert_eq!(collate("ivan", "Ivan"), Ordering::Less);
        assert_eq!(collate("Ivan", "Ivan"), Ordering::Equal);
    }

    #[test]
    fn test_collate_ignores_accents_first() {
        assert_eq!(collate("Émile", "Fabre"), Ordering::Less);
        assert_eq!(collate("Ärzte", "Bauer"), Ordering::Less);
        assert_eq!(collate("Öztürk", "Zimmer"), Ordering::Less);
        assert_eq!(collate("Edgar", "Émile"), Ordering::Less);
        assert_eq!(collate("resume", "résumé"), Ordering::Less);
        assert_eq!(collate("résumé", "Résumé"), Ordering::Less);
    }

    #[test]
    fn test_sort_by_accented_name() {
        let students = vec![
            student("Zola", "2001-03-10", 2021, "Literature"),
            student("Émile", "2001-03-10", 2021, "Literature"),
            student("Fabre", "2001-03-10", 2021, "Biology"),
        ];
        let sorted = sort(&students, Column::FullName);
        assert_eq!(surnames(&sorted), vec!["Émile", "Fabre", "Zola"]);
    }

    #[test]
    fn test_sort_by_each_column() {
        let students = roster();

        let by_name = sort(&students, Column::FullName);
        assert_eq!(
            surnames(&by_name),
            vec!["abramov", "Petrov", "Sidorov", "Егоров", "Ёлкин"]
        );

        let by_birth = sort(&students, Column::DateOfBirth);
        assert_eq!(
            surnames(&by_birth),
            vec!["abramov", "Егоров", "Petrov", "Ёлкин", "Sidorov"]
        );

        // Petrov and Sidorov share 2021 and keep their order
        let by_year = sort(&students, Column::YearsOfStudy);
        assert_eq!(
            surnames(&by_year),
            vec!["abramov", "Егоров", "Ёлкин", "Petrov", "Sidorov"]
        );

        let by_faculty = sort(&students, Column::Faculty);
        assert_eq!(
            surnames(&by_faculty),
            vec!["Егоров", "Sidorov", "abramov", "Ёлкин", "Petrov"]
        );

        // the source slice is never reordered
        assert_eq!(
            surnames(&students),
            vec!["Petrov", "abramov", "Sidorov", "Ёлкин", "Егоров"]
        );
    }

    #[test]
    fn test_filter_by_partial_faculty() {
        let students = roster();
        let criteria = FilterForm {
            faculty: "phys".to_string(),
            ..FilterForm::default()
        }
        .criteria();
        assert_eq!(surnames(&filter(&students, &criteria)), vec!["Petrov", "Ёлкин"]);
    }

    #[test]
    fn test_filter_combines_criteria() {
        let students = roster();
        let criteria = FilterForm {
            name: "IVAN".to_string(),
            faculty: "Physics".to_string(),
            year_of_admission: "2021".to_string(),
            year_of_graduation: String::new(),
        }
        .criteria();
        assert_eq!(criteria.len(), 3);
        assert_eq!(surnames(&filter(&students, &criteria)), vec!["Petrov"]);

        let criteria = vec![Criterion::YearOfGraduation(2025)];
        assert_eq!(surnames(&filter(&students, &criteria)), vec!["Petrov", "Sidorov"]);
    }

    #[test]
    fn test_empty_form_does_not_constrain() {
        let students = roster();
        let criteria = FilterForm {
            year_of_admission: "not a year".to_string(),
            ..FilterForm::default()
        }
        .criteria();
        assert!(criteria.is_empty());
        assert_eq!(filter(&students, &criteria), students);
    }

    #[test]
    fn test_zero_is_a_real_year() {
        let criteria = FilterForm {
            year_of_admission: "0".to_string(),
            ..FilterForm::default()
        }
        .criteria();
        assert_eq!(criteria, vec![Criterion::YearOfAdmission(0)]);
        assert!(filter(&roster(), &criteria).is_empty());
    }

    #[test]
    fn test_criteria_from_json() {
        let values = json!({
            "fullName": "petr",
            "faculty": "",
            "yearOfAdmission": 2021,
            "yearOfGraduation": null,
        });
        let criteria = criteria_from_json(values.as_object().unwrap()).unwrap();
        assert_eq!(
            criteria,
            vec![
                Criterion::FullName("petr".to_string()),
                Criterion::YearOfAdmission(2021),
            ]
        );
        assert_eq!(surnames(&filter(&roster(), &criteria)), vec!["Petrov"]);
    }

    #[test]
    fn test_unsupported_json_type_matches_nothing() {
        let values = json!({ "faculty": true });
        let criteria = criteria_from_json(values.as_object().unwrap()).unwrap();
        assert_eq!(criteria.len(), 1);
        assert_eq!(
            criteria[0].error().unwrap().to_string(),
            "Type 'boolean' is not supported."
        );
        assert!(filter(&roster(), &criteria).is_empty());

        let values = json!({ "name": 42 });
        let criteria = criteria_from_json(values.as_object().unwrap()).unwrap();
        assert_eq!(
            criteria[0],
            Criterion::Unsupported {
                field: FilterField::FullName,
                kind: "number".to_string()
            }
        );
    }

    #[test]
    fn test_fractional_json_year_is_truncated() {
        let values = json!({ "yearOfAdmission": 2021.7, "yearOfGraduation": 1e12 });
        let criteria = criteria_from_json(values.as_object().unwrap()).unwrap();
        assert_eq!(
            criteria,
            vec![
                Criterion::YearOfAdmission(2021),
                Criterion::Unsupported {
                    field: FilterField::YearOfGraduation,
                    kind: "number".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_unknown_json_key() {
        let values = json!({ "email": "x" });
        let err = criteria_from_json(values.as_object().unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "Cannot filter by field email.");
    }

    fn arb_student() -> impl Strategy<Value = StudentRecord> {
        (
            prop::sample::select(vec!["Petrov", "abramov", "Ёлкин", "Егоров", "Sidorov"]),
            1990i32..2005,
            1u8..=28,
            2000i32..=2024,
            prop::sample::select(vec!["Physics", "physics", "History", "Химия"]),
        )
            .prop_map(|(surname, year, day, admitted, faculty)| {
                student(surname, &format!("{}-02-{:02}", year, day), admitted, faculty)
            })
    }

    fn arb_column() -> impl Strategy<Value = Column> {
        prop::sample::select(Column::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn test_sort_is_idempotent(
            students in prop::collection::vec(arb_student(), 0..12),
            column in arb_column(),
        ) {
            let once = sort(&students, column);
            let twice = sort(&once, column);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_filter_is_ordered_subsequence(
            students in prop::collection::vec(arb_student(), 0..12),
            faculty in prop::sample::select(vec!["", "phys", "HIST", "х"]),
            admitted in prop::option::of(2000i32..=2024),
        ) {
            let mut criteria = Vec::new();
            criteria.extend(Criterion::from_raw(FilterField::Faculty, faculty));
            criteria.extend(admitted.map(Criterion::YearOfAdmission));

            let matches = filter(&students, &criteria);
            let mut rest = students.iter();
            for found in &matches {
                prop_assert!(rest.any(|student| student == found));
            }
        }
    }
}
