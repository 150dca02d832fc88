use crate::domain::grade::{Grade, StudentStatus};
use chrono::{DateTime, Local};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Student {
    id: String,
    reg_no: String,
    full_name: String,
    email: String,
    status: StudentStatus,
    enrolled_courses: BTreeSet<String>,
    course_grades: BTreeMap<String, Grade>,
    created_at: DateTime<Local>,
    last_updated: DateTime<Local>,
}

impl Student {
    pub fn new(
        id: impl Into<String>,
        reg_no: impl Into<String>,
        full_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        let now = Local::now();
        Self {
            id: id.into(),
            reg_no: reg_no.into(),
            full_name: full_name.into(),
            email: email.into(),
            status: StudentStatus::Active,
            enrolled_courses: BTreeSet::new(),
            course_grades: BTreeMap::new(),
            created_at: now,
            last_updated: now,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn reg_no(&self) -> &str {
        &self.reg_no
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn status(&self) -> StudentStatus {
        self.status
    }

    pub fn enrolled_courses(&self) -> &BTreeSet<String> {
        &self.enrolled_courses
    }

    pub fn course_grades(&self) -> &BTreeMap<String, Grade> {
        &self.course_grades
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn last_updated(&self) -> DateTime<Local> {
        self.last_updated
    }

    pub fn is_enrolled_in(&self, course_code: &str) -> bool {
        self.enrolled_courses.contains(course_code)
    }

    pub fn grade_for(&self, course_code: &str) -> Option<Grade> {
        self.course_grades.get(course_code).copied()
    }

    /// 未加權平均績點；沒有成績時為 0.0
    pub fn gpa(&self) -> f64 {
        if self.course_grades.is_empty() {
            return 0.0;
        }
        let total: f64 = self.course_grades.values().map(|g| g.points()).sum();
        total / self.course_grades.len() as f64
    }

    fn touch(&mut self) {
        self.last_updated = Local::now();
    }

    pub(crate) fn enroll_in_course(&mut self, course_code: &str) -> bool {
        let added = self.enrolled_courses.insert(course_code.to_string());
        self.touch();
        added
    }

    /// 退選同時移除該課程成績
    pub(crate) fn unenroll_from_course(&mut self, course_code: &str) -> bool {
        let removed = self.enrolled_courses.remove(course_code);
        self.course_grades.remove(course_code);
        self.touch();
        removed
    }

    /// 只有已選修的課程才會記錄成績，否則不做任何事並回傳 false
    pub(crate) fn record_grade(&mut self, course_code: &str, grade: Grade) -> bool {
        if !self.enrolled_courses.contains(course_code) {
            return false;
        }
        self.course_grades.insert(course_code.to_string(), grade);
        self.touch();
        true
    }

    pub(crate) fn set_full_name(&mut self, full_name: impl Into<String>) {
        self.full_name = full_name.into();
        self.touch();
    }

    pub(crate) fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.touch();
    }

    pub(crate) fn set_status(&mut self, status: StudentStatus) {
        self.status = status;
        self.touch();
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Student [ID: {}, RegNo: {}, Name: {}, Status: {}, GPA: {:.2}]",
            self.id,
            self.reg_no,
            self.full_name,
            self.status,
            self.gpa()
        )
    }
}
