use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Student not found: {id}")]
    StudentNotFound { id: String },

    #[error("Course not found: {code}")]
    CourseNotFound { code: String },

    #[error("Student {student_id} is already enrolled in course {course_code}")]
    DuplicateEnrollment {
        student_id: String,
        course_code: String,
    },

    #[error("Student {student_id} is not enrolled in course {course_code}")]
    NotEnrolled {
        student_id: String,
        course_code: String,
    },

    #[error("Enrollment would exceed maximum credit limit: {attempted} > {max}")]
    CreditLimitExceeded { attempted: u32, max: u32 },

    #[error("Cannot access {}: {source}", .path.display())]
    FileAccessError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RecordsError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValueError {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// 業務規則錯誤屬於 Low / Medium，檔案與設定錯誤則較嚴重
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DuplicateEnrollment { .. } | Self::NotEnrolled { .. } => ErrorSeverity::Low,
            Self::ValidationError { .. }
            | Self::InvalidValueError { .. }
            | Self::StudentNotFound { .. }
            | Self::CourseNotFound { .. }
            | Self::CreditLimitExceeded { .. } => ErrorSeverity::Medium,
            Self::CsvError(_) | Self::ConfigError { .. } => ErrorSeverity::High,
            Self::FileAccessError { .. } | Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ValidationError { .. } | Self::InvalidValueError { .. } => {
                "Check the input values and try again"
            }
            Self::StudentNotFound { .. } => "Verify the student ID or import the student first",
            Self::CourseNotFound { .. } => "Verify the course code or import the course first",
            Self::DuplicateEnrollment { .. } => "No action needed, the enrollment already exists",
            Self::NotEnrolled { .. } => "Enroll the student in the course before recording a grade",
            Self::CreditLimitExceeded { .. } => {
                "Unenroll from another course or raise max_credits_per_semester"
            }
            Self::FileAccessError { .. } | Self::IoError(_) => {
                "Make sure the file exists and the directory is writable"
            }
            Self::CsvError(_) => "Check that the file is comma-delimited with a header row",
            Self::ConfigError { .. } => "Fix the configuration file and run again",
        }
    }
}

pub type Result<T> = std::result::Result<T, RecordsError>;
