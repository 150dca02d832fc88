use crate::utils::error::{RecordsError, Result};
use std::fmt;
use std::str::FromStr;

/// 課程代碼，例如 `CS101` → 系所 `CS`、編號 `101`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseCode {
    department: String,
    number: String,
}

impl CourseCode {
    pub fn parse(full_code: &str) -> Result<Self> {
        let trimmed = full_code.trim();
        if trimmed.len() < 3 {
            return Err(RecordsError::invalid_value(
                "course code",
                full_code,
                "must be at least 3 characters",
            ));
        }

        let split = trimmed
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(trimmed.len());
        let (department, number) = trimmed.split_at(split);

        if department.is_empty()
            || number.is_empty()
            || !number.chars().all(|c| c.is_ascii_digit())
        {
            return Err(RecordsError::invalid_value(
                "course code",
                full_code,
                "expected leading letters followed by digits",
            ));
        }

        Ok(Self {
            department: department.to_string(),
            number: number.to_string(),
        })
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn full_code(&self) -> String {
        format!("{}{}", self.department, self.number)
    }
}

impl FromStr for CourseCode {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.department, self.number)
    }
}
