use crate::utils::error::{RecordsError, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Grade {
    S,
    A,
    B,
    C,
    F,
}

/// 等第對照表: (等第, 績點, 說明)
const GRADE_TABLE: [(Grade, f64, &str); 5] = [
    (Grade::S, 4.0, "Excellent"),
    (Grade::A, 3.7, "Very Good"),
    (Grade::B, 3.0, "Good"),
    (Grade::C, 2.0, "Average"),
    (Grade::F, 0.0, "Fail"),
];

impl Grade {
    pub const ALL: [Grade; 5] = [Grade::S, Grade::A, Grade::B, Grade::C, Grade::F];

    fn entry(self) -> &'static (Grade, f64, &'static str) {
        // 表格依宣告順序排列
        &GRADE_TABLE[self as usize]
    }

    pub fn points(self) -> f64 {
        self.entry().1
    }

    pub fn description(self) -> &'static str {
        self.entry().2
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Grade::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                RecordsError::invalid_value("grade", s, "expected one of S, A, B, C, F")
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Semester {
    Spring,
    Summer,
    #[default]
    Fall,
}

/// 學期對照表: (學期, 序號, 顯示名稱)
const SEMESTER_TABLE: [(Semester, u8, &str); 3] = [
    (Semester::Spring, 1, "Spring"),
    (Semester::Summer, 2, "Summer"),
    (Semester::Fall, 3, "Fall"),
];

impl Semester {
    pub const ALL: [Semester; 3] = [Semester::Spring, Semester::Summer, Semester::Fall];

    fn entry(self) -> &'static (Semester, u8, &'static str) {
        &SEMESTER_TABLE[self as usize]
    }

    pub fn value(self) -> u8 {
        self.entry().1
    }

    pub fn display_name(self) -> &'static str {
        self.entry().2
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Semester::Spring => "SPRING",
            Semester::Summer => "SUMMER",
            Semester::Fall => "FALL",
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Semester {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Semester::ALL
            .into_iter()
            .find(|sem| sem.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                RecordsError::invalid_value("semester", s, "expected SPRING, SUMMER or FALL")
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
    Graduated,
    Suspended,
}

impl StudentStatus {
    pub const ALL: [StudentStatus; 4] = [
        StudentStatus::Active,
        StudentStatus::Inactive,
        StudentStatus::Graduated,
        StudentStatus::Suspended,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StudentStatus::Active => "ACTIVE",
            StudentStatus::Inactive => "INACTIVE",
            StudentStatus::Graduated => "GRADUATED",
            StudentStatus::Suspended => "SUSPENDED",
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudentStatus {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        StudentStatus::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RecordsError::invalid_value("student status", s, "unknown status"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CourseStatus {
    #[default]
    Active,
    Inactive,
    Completed,
    Cancelled,
}

impl CourseStatus {
    pub const ALL: [CourseStatus; 4] = [
        CourseStatus::Active,
        CourseStatus::Inactive,
        CourseStatus::Completed,
        CourseStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CourseStatus::Active => "ACTIVE",
            CourseStatus::Inactive => "INACTIVE",
            CourseStatus::Completed => "COMPLETED",
            CourseStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseStatus {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        CourseStatus::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RecordsError::invalid_value("course status", s, "unknown status"))
    }
}
