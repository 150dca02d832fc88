use crate::domain::{Grade, Student};
use chrono::{DateTime, Local};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptLine {
    pub course_code: String,
    pub grade: Grade,
    pub points: f64,
}

/// 學生成績單（唯讀快照）
#[derive(Debug, Clone)]
pub struct Transcript {
    pub student_id: String,
    pub reg_no: String,
    pub full_name: String,
    pub lines: Vec<TranscriptLine>,
    pub cumulative_gpa: f64,
    pub generated_at: DateTime<Local>,
}

impl Transcript {
    pub fn for_student(student: &Student) -> Self {
        let lines = student
            .course_grades()
            .iter()
            .map(|(code, grade)| TranscriptLine {
                course_code: code.clone(),
                grade: *grade,
                points: grade.points(),
            })
            .collect();

        Self {
            student_id: student.id().to_string(),
            reg_no: student.reg_no().to_string(),
            full_name: student.full_name().to_string(),
            lines,
            cumulative_gpa: student.gpa(),
            generated_at: Local::now(),
        }
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== OFFICIAL TRANSCRIPT ===")?;
        writeln!(f, "Student: {} ({})", self.full_name, self.reg_no)?;
        writeln!(f, "Student ID: {}", self.student_id)?;
        writeln!(f)?;
        writeln!(f, "Courses and Grades:")?;
        for line in &self.lines {
            writeln!(
                f,
                "{:<10}: {} ({:.1} points)",
                line.course_code, line.grade, line.points
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Cumulative GPA: {:.2}", self.cumulative_gpa)?;
        write!(
            f,
            "Date Generated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}
