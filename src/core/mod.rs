pub mod records;
pub mod repository;
pub mod transcript;

pub use crate::domain::{Searchable, SettingsProvider};
pub use crate::utils::error::Result;
pub use records::{GpaStatistics, RecordsService};
pub use repository::{CourseRepository, Keyed, Repository, StudentRepository};
pub use transcript::{Transcript, TranscriptLine};
