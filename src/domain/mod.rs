// Domain layer: entities, value types and ports. Relation mutators stay crate-private.

pub mod course;
pub mod course_code;
pub mod grade;
pub mod ports;
pub mod student;

pub use course::{Course, CourseOptions};
pub use course_code::CourseCode;
pub use grade::{CourseStatus, Grade, Semester, StudentStatus};
pub use ports::{DirectorySizer, Searchable, SettingsProvider};
pub use student::Student;
