use crate::domain::grade::{CourseStatus, Semester};
use chrono::{DateTime, Local};
use std::collections::BTreeSet;
use std::fmt;

/// 建立課程時的選填欄位
///
/// 未指定時：`instructor` 與 `department` 為空字串，`semester` 為 [`Semester::Fall`]。
#[derive(Debug, Clone, Default)]
pub struct CourseOptions {
    pub instructor: Option<String>,
    pub semester: Option<Semester>,
    pub department: Option<String>,
}

impl CourseOptions {
    pub fn instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = Some(instructor.into());
        self
    }

    pub fn semester(mut self, semester: Semester) -> Self {
        self.semester = Some(semester);
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Course {
    code: String,
    title: String,
    credits: u32,
    instructor: String,
    semester: Semester,
    department: String,
    status: CourseStatus,
    enrolled_students: BTreeSet<String>,
    created_date: DateTime<Local>,
}

impl Course {
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        credits: u32,
        options: CourseOptions,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            credits,
            instructor: options.instructor.unwrap_or_default(),
            semester: options.semester.unwrap_or_default(),
            department: options.department.unwrap_or_default(),
            status: CourseStatus::Active,
            enrolled_students: BTreeSet::new(),
            created_date: Local::now(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    pub fn instructor(&self) -> &str {
        &self.instructor
    }

    pub fn semester(&self) -> Semester {
        self.semester
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn status(&self) -> CourseStatus {
        self.status
    }

    pub fn enrolled_students(&self) -> &BTreeSet<String> {
        &self.enrolled_students
    }

    pub fn created_date(&self) -> DateTime<Local> {
        self.created_date
    }

    pub fn has_student(&self, student_id: &str) -> bool {
        self.enrolled_students.contains(student_id)
    }

    /// 回傳集合是否改變；重複選課的判斷在服務層處理
    pub(crate) fn enroll(&mut self, student_id: &str) -> bool {
        self.enrolled_students.insert(student_id.to_string())
    }

    pub(crate) fn unenroll(&mut self, student_id: &str) -> bool {
        self.enrolled_students.remove(student_id)
    }

    pub(crate) fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub(crate) fn set_instructor(&mut self, instructor: impl Into<String>) {
        self.instructor = instructor.into();
    }

    pub(crate) fn set_status(&mut self, status: CourseStatus) {
        self.status = status;
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Course [Code: {}, Title: {}, Credits: {}, Instructor: {}, Semester: {}, Enrolled: {}]",
            self.code,
            self.title,
            self.credits,
            self.instructor,
            self.semester,
            self.enrolled_students.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_options_empty() {
        let course = Course::new("CS101", "Intro", 3, CourseOptions::default());
        assert_eq!(course.instructor(), "");
        assert_eq!(course.department(), "");
        assert_eq!(course.semester(), Semester::Fall);
        assert_eq!(course.status(), CourseStatus::Active);
    }

    #[test]
    fn test_options_override_defaults() {
        let options = CourseOptions::default()
            .instructor("Dr. Smith")
            .semester(Semester::Spring)
            .department("Computer Science");
        let course = Course::new("CS102", "Data Structures", 4, options);
        assert_eq!(course.instructor(), "Dr. Smith");
        assert_eq!(course.semester(), Semester::Spring);
        assert_eq!(course.department(), "Computer Science");
    }

    #[test]
    fn test_enroll_reports_set_change() {
        let mut course = Course::new("CS101", "Intro", 3, CourseOptions::default());
        assert!(course.enroll("S001"));
        assert!(!course.enroll("S001"));
        assert_eq!(course.enrolled_students().len(), 1);
        assert!(course.unenroll("S001"));
        assert!(!course.unenroll("S001"));
    }
}
