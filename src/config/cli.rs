use crate::config::toml_config::AppConfig;
use crate::core::RecordsService;
use crate::domain::{Grade, Semester, SettingsProvider};
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "campus-records")]
#[command(about = "Student, course, enrollment and grade records with CSV snapshots")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the data directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Override the backup directory
    #[arg(long)]
    pub backup_dir: Option<PathBuf>,

    /// Override the per-semester credit cap
    #[arg(long)]
    pub max_credits: Option<u32>,

    /// Student import file, relative to the data directory
    #[arg(long, default_value = "students.csv", global = true)]
    pub students: String,

    /// Course import file, relative to the data directory
    #[arg(long, default_value = "courses.csv", global = true)]
    pub courses: String,

    /// Enroll a student after import, before the command runs (repeatable)
    #[arg(long = "enroll", value_name = "STUDENT:COURSE", value_parser = parse_enrollment, global = true)]
    pub enrollments: Vec<EnrollmentArg>,

    /// Record a grade after enrollments are applied (repeatable)
    #[arg(long = "grade", value_name = "STUDENT:COURSE:GRADE", value_parser = parse_grade, global = true)]
    pub grades: Vec<GradeArg>,

    #[arg(short, long, help = "Enable verbose output", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write sample student and course files into the data directory
    Seed,
    /// Import data files and print counts and statistics
    Summary,
    /// Search imported courses
    Search {
        #[arg(long)]
        instructor: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long, value_parser = parse_semester)]
        semester: Option<Semester>,
    },
    /// Print a student's transcript
    Transcript { student_id: String },
    /// Import data files and write a timestamped backup snapshot
    Backup,
    /// Import data files and write normalised exports
    Export {
        #[arg(long, default_value = "students_export.csv")]
        students_out: String,
        #[arg(long, default_value = "courses_export.csv")]
        courses_out: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentArg {
    pub student_id: String,
    pub course_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeArg {
    pub student_id: String,
    pub course_code: String,
    pub grade: Grade,
}

fn parse_semester(value: &str) -> std::result::Result<Semester, String> {
    value.parse::<Semester>().map_err(|e| e.to_string())
}

fn parse_enrollment(value: &str) -> std::result::Result<EnrollmentArg, String> {
    match value.split(':').map(str::trim).collect::<Vec<_>>()[..] {
        [student_id, course_code] if !student_id.is_empty() && !course_code.is_empty() => {
            Ok(EnrollmentArg {
                student_id: student_id.to_string(),
                course_code: course_code.to_string(),
            })
        }
        _ => Err(format!("expected STUDENT:COURSE, got '{}'", value)),
    }
}

fn parse_grade(value: &str) -> std::result::Result<GradeArg, String> {
    match value.split(':').map(str::trim).collect::<Vec<_>>()[..] {
        [student_id, course_code, grade] if !student_id.is_empty() && !course_code.is_empty() => {
            Ok(GradeArg {
                student_id: student_id.to_string(),
                course_code: course_code.to_string(),
                grade: grade.parse::<Grade>().map_err(|e| e.to_string())?,
            })
        }
        _ => Err(format!("expected STUDENT:COURSE:GRADE, got '{}'", value)),
    }
}

impl CliConfig {
    /// 載入 TOML 設定（若有指定）並套用命令列覆蓋
    pub fn resolve_app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(dir) = &self.data_dir {
            config = config.with_data_directory(dir.clone());
        }
        if let Some(dir) = &self.backup_dir {
            config = config.with_backup_directory(dir.clone());
        }
        if let Some(max) = self.max_credits {
            config = config.with_max_credits(max);
        }

        Ok(config)
    }

    /// 依序套用 --enroll 與 --grade；任何一筆失敗即中止
    pub fn apply_operations<S: SettingsProvider>(
        &self,
        service: &mut RecordsService<S>,
    ) -> Result<()> {
        for enrollment in &self.enrollments {
            service.enroll(&enrollment.student_id, &enrollment.course_code)?;
        }
        for entry in &self.grades {
            service.record_grade(&entry.student_id, &entry.course_code, entry.grade)?;
        }

        if !self.enrollments.is_empty() || !self.grades.is_empty() {
            tracing::info!(
                "Applied {} enrollments and {} grades",
                self.enrollments.len(),
                self.grades.len()
            );
        }
        Ok(())
    }
}
