use super::student::StudentRecord;

/// 学生名单, 按录入顺序保存; 只能追加
#[derive(Debug, Default, Clone)]
pub struct Roster {
    students: Vec<StudentRecord>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, student: StudentRecord) -> &StudentRecord {
        self.students.push(student);
        &self.students[self.students.len() - 1]
    }

    /// insertion order
    pub fn students(&self) -> &[StudentRecord] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
