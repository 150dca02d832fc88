use crate::core::repository::{CourseRepository, StudentRepository};
use crate::core::transcript::Transcript;
use crate::domain::{
    Course, CourseCode, CourseOptions, CourseStatus, Grade, Searchable, Semester, SettingsProvider,
    Student, StudentStatus,
};
use crate::utils::error::{RecordsError, Result};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpaStatistics {
    pub average_gpa: f64,
    pub total_students: usize,
}

/// 選課與成績服務
///
/// 同時擁有學生與課程兩個儲存庫。選課關係只能透過 [`RecordsService::enroll`] /
/// [`RecordsService::unenroll`] 改變，兩側一起更新；`&mut self` 保證同一時間只有一個操作。
pub struct RecordsService<C: SettingsProvider> {
    students: StudentRepository,
    courses: CourseRepository,
    config: C,
}

impl<C: SettingsProvider> RecordsService<C> {
    pub fn new(config: C) -> Self {
        Self {
            students: StudentRepository::new(),
            courses: CourseRepository::new(),
            config,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn students(&self) -> &StudentRepository {
        &self.students
    }

    pub fn courses(&self) -> &CourseRepository {
        &self.courses
    }

    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.find_by_id(id)
    }

    pub fn course(&self, code: &str) -> Option<&Course> {
        self.courses.find_by_id(code)
    }

    pub fn add_student(
        &mut self,
        id: &str,
        reg_no: &str,
        full_name: &str,
        email: &str,
    ) -> Result<&Student> {
        let id = id.trim();
        if id.is_empty() {
            return Err(RecordsError::validation("Student ID cannot be empty"));
        }
        if self.students.contains(id) {
            return Err(RecordsError::validation(format!(
                "Student with ID {} already exists",
                id
            )));
        }

        tracing::debug!("Registering student {}", id);
        self.students
            .insert(Student::new(id, reg_no, full_name, email))
    }

    pub fn add_course(
        &mut self,
        code: &str,
        title: &str,
        credits: u32,
        options: CourseOptions,
    ) -> Result<&Course> {
        let code = CourseCode::parse(code)?.full_code();
        if credits == 0 {
            return Err(RecordsError::invalid_value(
                "credits",
                credits.to_string(),
                "must be a positive integer",
            ));
        }
        if self.courses.contains(&code) {
            return Err(RecordsError::validation(format!(
                "Course with code {} already exists",
                code
            )));
        }

        tracing::debug!("Adding course {} ({} credits)", code, credits);
        self.courses
            .insert(Course::new(code, title, credits, options))
    }

    /// 目前選修學分；已不存在的課程代碼以 0 學分計，總和飽和於 u32::MAX
    pub fn credit_load(&self, student: &Student) -> u32 {
        student
            .enrolled_courses()
            .iter()
            .map(|code| self.courses.find_by_id(code).map_or(0, Course::credits))
            .fold(0, u32::saturating_add)
    }

    pub fn enroll(&mut self, student_id: &str, course_code: &str) -> Result<()> {
        let student = self
            .students
            .find_by_id(student_id)
            .ok_or_else(|| RecordsError::StudentNotFound {
                id: student_id.to_string(),
            })?;
        let course = self
            .courses
            .find_by_id(course_code)
            .ok_or_else(|| RecordsError::CourseNotFound {
                code: course_code.to_string(),
            })?;

        if student.is_enrolled_in(course_code) {
            tracing::warn!(
                "Rejected duplicate enrollment of {} in {}",
                student_id,
                course_code
            );
            return Err(RecordsError::DuplicateEnrollment {
                student_id: student_id.to_string(),
                course_code: course_code.to_string(),
            });
        }

        let attempted = self.credit_load(student).saturating_add(course.credits());
        let max = self.config.max_credits_per_semester();
        if attempted > max {
            tracing::warn!(
                "Rejected enrollment of {} in {}: {} credits exceeds cap of {}",
                student_id,
                course_code,
                attempted,
                max
            );
            return Err(RecordsError::CreditLimitExceeded { attempted, max });
        }

        // 兩側皆已確認存在，依序更新
        if let Some(student) = self.students.get_mut(student_id) {
            student.enroll_in_course(course_code);
        }
        if let Some(course) = self.courses.get_mut(course_code) {
            course.enroll(student_id);
        }

        tracing::info!(
            "Enrolled {} in {} ({} credits total)",
            student_id,
            course_code,
            attempted
        );
        Ok(())
    }

    /// 退選；未選修或實體不存在時不視為錯誤。回傳是否有任何改變。
    pub fn unenroll(&mut self, student_id: &str, course_code: &str) -> bool {
        let student_side = self
            .students
            .get_mut(student_id)
            .map_or(false, |s| s.unenroll_from_course(course_code));
        let course_side = self
            .courses
            .get_mut(course_code)
            .map_or(false, |c| c.unenroll(student_id));

        let changed = student_side || course_side;
        if changed {
            tracing::info!("Unenrolled {} from {}", student_id, course_code);
        } else {
            tracing::debug!("No enrollment of {} in {} to remove", student_id, course_code);
        }
        changed
    }

    pub fn record_grade(&mut self, student_id: &str, course_code: &str, grade: Grade) -> Result<()> {
        let student =
            self.students
                .get_mut(student_id)
                .ok_or_else(|| RecordsError::StudentNotFound {
                    id: student_id.to_string(),
                })?;

        if !student.record_grade(course_code, grade) {
            return Err(RecordsError::NotEnrolled {
                student_id: student_id.to_string(),
                course_code: course_code.to_string(),
            });
        }

        tracing::debug!("Recorded grade {} for {} in {}", grade, student_id, course_code);
        Ok(())
    }

    pub fn calculate_gpa(&self, student_id: &str) -> Result<f64> {
        self.students
            .find_by_id(student_id)
            .map(Student::gpa)
            .ok_or_else(|| RecordsError::StudentNotFound {
                id: student_id.to_string(),
            })
    }

    /// 只統計 ACTIVE 學生；平均值為各學生 GPA 的平均
    pub fn calculate_gpa_statistics(&self) -> GpaStatistics {
        let active = self
            .students
            .find_by(|s| s.status() == StudentStatus::Active);

        let average_gpa = if active.is_empty() {
            0.0
        } else {
            active.iter().map(|s| s.gpa()).sum::<f64>() / active.len() as f64
        };

        GpaStatistics {
            average_gpa,
            total_students: active.len(),
        }
    }

    pub fn course_count_by_department(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for course in self.courses.iter() {
            *counts.entry(course.department().to_string()).or_insert(0) += 1;
        }
        counts
    }

    pub fn find_by_instructor(&self, instructor: &str) -> Vec<&Course> {
        let wanted = instructor.to_lowercase();
        self.courses
            .find_by(|c| c.instructor().to_lowercase() == wanted)
    }

    pub fn find_by_department(&self, department: &str) -> Vec<&Course> {
        let wanted = department.to_lowercase();
        self.courses
            .find_by(|c| c.department().to_lowercase() == wanted)
    }

    pub fn find_by_semester(&self, semester: Semester) -> Vec<&Course> {
        self.courses.find_by(|c| c.semester() == semester)
    }

    pub fn courses_sorted_by_code(&self) -> Vec<&Course> {
        let mut courses = self.courses.find_all();
        courses.sort_by(|a, b| a.code().cmp(b.code()));
        courses
    }

    pub fn update_student(&mut self, id: &str, full_name: &str, email: &str) -> bool {
        match self.students.get_mut(id) {
            Some(student) => {
                student.set_full_name(full_name);
                student.set_email(email);
                true
            }
            None => false,
        }
    }

    pub fn update_course(&mut self, code: &str, title: &str, instructor: &str) -> bool {
        match self.courses.get_mut(code) {
            Some(course) => {
                course.set_title(title);
                course.set_instructor(instructor);
                true
            }
            None => false,
        }
    }

    /// 狀態可任意變更，沒有轉換限制
    pub fn set_student_status(&mut self, id: &str, status: StudentStatus) -> bool {
        match self.students.get_mut(id) {
            Some(student) => {
                student.set_status(status);
                true
            }
            None => false,
        }
    }

    pub fn set_course_status(&mut self, code: &str, status: CourseStatus) -> bool {
        match self.courses.get_mut(code) {
            Some(course) => {
                course.set_status(status);
                true
            }
            None => false,
        }
    }

    /// 停用學生，不會自動退選
    pub fn deactivate_student(&mut self, id: &str) -> bool {
        self.set_student_status(id, StudentStatus::Inactive)
    }

    pub fn deactivate_course(&mut self, code: &str) -> bool {
        self.set_course_status(code, CourseStatus::Inactive)
    }

    /// 刪除課程前先將所有選課學生退選
    pub fn remove_course(&mut self, code: &str) -> Result<Course> {
        let enrolled: Vec<String> = self
            .courses
            .find_by_id(code)
            .ok_or_else(|| RecordsError::CourseNotFound {
                code: code.to_string(),
            })?
            .enrolled_students()
            .iter()
            .cloned()
            .collect();

        for student_id in &enrolled {
            self.unenroll(student_id, code);
        }

        tracing::info!("Removed course {} ({} students unenrolled)", code, enrolled.len());
        self.courses
            .remove(code)
            .ok_or_else(|| RecordsError::CourseNotFound {
                code: code.to_string(),
            })
    }

    pub fn transcript(&self, student_id: &str) -> Result<Transcript> {
        self.students
            .find_by_id(student_id)
            .map(Transcript::for_student)
            .ok_or_else(|| RecordsError::StudentNotFound {
                id: student_id.to_string(),
            })
    }
}
