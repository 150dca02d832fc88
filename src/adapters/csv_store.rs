use crate::core::records::RecordsService;
use crate::domain::{
    CourseOptions, CourseStatus, DirectorySizer, Semester, SettingsProvider, StudentStatus,
};
use crate::utils::error::{RecordsError, Result};
use crate::utils::fs::{format_bytes, WalkDirSizer};
use chrono::{Local, NaiveDateTime};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Trim, WriterBuilder};
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const STUDENT_IMPORT_HEADER: [&str; 4] = ["ID", "RegNo", "FullName", "Email"];
pub const STUDENT_EXPORT_HEADER: [&str; 6] = ["ID", "RegNo", "FullName", "Email", "Status", "GPA"];
pub const COURSE_IMPORT_HEADER: [&str; 6] =
    ["Code", "Title", "Credits", "Instructor", "Semester", "Department"];
pub const COURSE_EXPORT_HEADER: [&str; 7] = [
    "Code",
    "Title",
    "Credits",
    "Instructor",
    "Semester",
    "Department",
    "Status",
];

// 匯出檔中 Status 欄位的位置；匯入時此欄可有可無
const STUDENT_STATUS_COLUMN: usize = 4;
const COURSE_STATUS_COLUMN: usize = 6;

pub const BACKUP_STUDENTS_FILE: &str = "students.csv";
pub const BACKUP_COURSES_FILE: &str = "courses.csv";
pub const SAMPLE_STUDENTS_FILE: &str = "sample_students.csv";
pub const SAMPLE_COURSES_FILE: &str = "sample_courses.csv";

const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupReport {
    pub path: PathBuf,
    /// 無法計算大小時為 None
    pub size_bytes: Option<u64>,
}

impl BackupReport {
    pub fn size_display(&self) -> String {
        self.size_bytes
            .map(format_bytes)
            .unwrap_or_else(|| "unknown".to_string())
    }
}

#[derive(Serialize)]
struct StudentExportRow<'a> {
    id: &'a str,
    reg_no: &'a str,
    full_name: &'a str,
    email: &'a str,
    status: &'static str,
    gpa: String,
}

#[derive(Serialize)]
struct CourseExportRow<'a> {
    code: &'a str,
    title: &'a str,
    credits: u32,
    instructor: &'a str,
    semester: &'static str,
    department: &'a str,
    status: &'static str,
}

struct CourseImportRow {
    code: String,
    title: String,
    credits: u32,
    instructor: String,
    semester: Semester,
    department: String,
    status: Option<CourseStatus>,
}

/// CSV 匯入/匯出與備份
///
/// 檔名一律相對於設定中的資料目錄解析；資料與備份根目錄在第一次使用時建立。
pub struct CsvStore<C: SettingsProvider, Z: DirectorySizer = WalkDirSizer> {
    config: C,
    sizer: Z,
}

impl<C: SettingsProvider> CsvStore<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            sizer: WalkDirSizer,
        }
    }
}

impl<C: SettingsProvider, Z: DirectorySizer> CsvStore<C, Z> {
    pub fn with_sizer(config: C, sizer: Z) -> Self {
        Self { config, sizer }
    }

    pub fn data_path(&self, file: impl AsRef<Path>) -> PathBuf {
        self.config.data_directory().join(file)
    }

    pub fn ensure_directories(&self) -> Result<()> {
        create_dir(self.config.data_directory())?;
        create_dir(self.config.backup_directory())
    }

    pub fn import_students<S: SettingsProvider>(
        &self,
        service: &mut RecordsService<S>,
        file: impl AsRef<Path>,
    ) -> Result<ImportSummary> {
        let path = self.data_path(file);
        tracing::debug!("Importing students from {}", path.display());

        let summary = import_rows(&path, "student", |record| {
            if record.len() < STUDENT_IMPORT_HEADER.len() {
                return Err(wrong_field_count(record, STUDENT_IMPORT_HEADER.len()));
            }
            let status = optional_column::<StudentStatus>(record, STUDENT_STATUS_COLUMN)?;
            let id = service
                .add_student(&record[0], &record[1], &record[2], &record[3])?
                .id()
                .to_string();
            if let Some(status) = status {
                service.set_student_status(&id, status);
            }
            Ok(())
        })?;

        tracing::info!(
            "Imported {} students from {} ({} rows skipped)",
            summary.imported,
            path.display(),
            summary.skipped
        );
        Ok(summary)
    }

    pub fn import_courses<S: SettingsProvider>(
        &self,
        service: &mut RecordsService<S>,
        file: impl AsRef<Path>,
    ) -> Result<ImportSummary> {
        let path = self.data_path(file);
        tracing::debug!("Importing courses from {}", path.display());

        let summary = import_rows(&path, "course", |record| {
            let row = parse_course_row(record)?;
            let options = CourseOptions::default()
                .instructor(row.instructor)
                .semester(row.semester)
                .department(row.department);
            let code = service
                .add_course(&row.code, &row.title, row.credits, options)?
                .code()
                .to_string();
            if let Some(status) = row.status {
                service.set_course_status(&code, status);
            }
            Ok(())
        })?;

        tracing::info!(
            "Imported {} courses from {} ({} rows skipped)",
            summary.imported,
            path.display(),
            summary.skipped
        );
        Ok(summary)
    }

    pub fn export_students<S: SettingsProvider>(
        &self,
        service: &RecordsService<S>,
        file: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        create_dir(self.config.data_directory())?;
        let path = self.data_path(file);
        write_students(service, &path)?;
        tracing::info!("Students exported to: {}", path.display());
        Ok(path)
    }

    pub fn export_courses<S: SettingsProvider>(
        &self,
        service: &RecordsService<S>,
        file: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        create_dir(self.config.data_directory())?;
        let path = self.data_path(file);
        write_courses(service, &path)?;
        tracing::info!("Courses exported to: {}", path.display());
        Ok(path)
    }

    pub fn create_backup<S: SettingsProvider>(
        &self,
        service: &RecordsService<S>,
    ) -> Result<BackupReport> {
        self.create_backup_at(service, Local::now().naive_local())
    }

    pub fn create_backup_at<S: SettingsProvider>(
        &self,
        service: &RecordsService<S>,
        timestamp: NaiveDateTime,
    ) -> Result<BackupReport> {
        let folder = self.config.backup_directory().join(format!(
            "backup_{}",
            timestamp.format(BACKUP_TIMESTAMP_FORMAT)
        ));
        create_dir(&folder)?;

        write_students(service, &folder.join(BACKUP_STUDENTS_FILE))?;
        write_courses(service, &folder.join(BACKUP_COURSES_FILE))?;

        // 大小只用於報告，計算失敗不影響備份結果
        let size_bytes = match self.sizer.directory_size(&folder) {
            Ok(size) => Some(size),
            Err(e) => {
                tracing::warn!("Could not determine size of {}: {}", folder.display(), e);
                None
            }
        };

        let report = BackupReport {
            path: folder,
            size_bytes,
        };
        tracing::info!(
            "Backup created: {} ({})",
            report.path.display(),
            report.size_display()
        );
        Ok(report)
    }

    /// 在資料目錄建立範例學生與課程檔
    pub fn write_sample_data(&self) -> Result<(PathBuf, PathBuf)> {
        create_dir(self.config.data_directory())?;

        let students_path = self.data_path(SAMPLE_STUDENTS_FILE);
        let mut writer = open_writer(&students_path)?;
        writer.write_record(STUDENT_IMPORT_HEADER)?;
        writer.write_record(["S001", "2023001", "John Smith", "john.smith@university.edu"])?;
        writer.write_record(["S002", "2023002", "Jane Doe", "jane.doe@university.edu"])?;
        writer.write_record(["S003", "2023003", "Bob Johnson", "bob.johnson@university.edu"])?;
        writer.flush()?;

        let courses_path = self.data_path(SAMPLE_COURSES_FILE);
        let mut writer = open_writer(&courses_path)?;
        writer.write_record(COURSE_IMPORT_HEADER)?;
        writer.write_record([
            "CS101",
            "Introduction to Programming",
            "3",
            "Dr. Smith",
            "FALL",
            "Computer Science",
        ])?;
        writer.write_record([
            "CS102",
            "Data Structures",
            "4",
            "Dr. Johnson",
            "FALL",
            "Computer Science",
        ])?;
        writer.write_record([
            "MATH201",
            "Calculus I",
            "4",
            "Prof. Wilson",
            "FALL",
            "Mathematics",
        ])?;
        writer.flush()?;

        tracing::info!("Sample data files created in {}", self.config.data_directory().display());
        Ok((students_path, courses_path))
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| RecordsError::FileAccessError {
        path: path.to_path_buf(),
        source,
    })
}

fn open_writer(path: &Path) -> Result<csv::Writer<File>> {
    let file = File::create(path).map_err(|source| RecordsError::FileAccessError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(file))
}

/// 逐列匯入；單列失敗只記錄並略過，檔案無法開啟或讀取中斷時才回傳錯誤
fn import_rows<F>(path: &Path, kind: &str, mut handle: F) -> Result<ImportSummary>
where
    F: FnMut(&StringRecord) -> Result<()>,
{
    let file = File::open(path).map_err(|source| RecordsError::FileAccessError {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(file);

    let mut summary = ImportSummary::default();
    let mut record = StringRecord::new();
    loop {
        match reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => match handle(&record) {
                Ok(()) => summary.imported += 1,
                Err(e) => {
                    let line = record.position().map_or(0, |p| p.line());
                    tracing::warn!("Skipping {} row at line {}: {}", kind, line, e);
                    summary.skipped += 1;
                }
            },
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
            Err(e) => {
                tracing::warn!("Skipping unreadable {} row: {}", kind, e);
                summary.skipped += 1;
            }
        }
    }

    Ok(summary)
}

fn wrong_field_count(record: &StringRecord, expected: usize) -> RecordsError {
    RecordsError::invalid_value(
        "row",
        record.iter().collect::<Vec<_>>().join(","),
        format!("expected at least {} fields, found {}", expected, record.len()),
    )
}

fn parse_course_row(record: &StringRecord) -> Result<CourseImportRow> {
    if record.len() < COURSE_IMPORT_HEADER.len() {
        return Err(wrong_field_count(record, COURSE_IMPORT_HEADER.len()));
    }

    let credits = record[2].parse::<u32>().map_err(|e| {
        RecordsError::invalid_value("credits", &record[2], e.to_string())
    })?;

    Ok(CourseImportRow {
        code: record[0].to_string(),
        title: record[1].to_string(),
        credits,
        instructor: record[3].to_string(),
        semester: record[4].parse()?,
        department: record[5].to_string(),
        status: optional_column(record, COURSE_STATUS_COLUMN)?,
    })
}

/// 欄位缺少或為空時回傳 None；有值但無法解析則整列略過
fn optional_column<T>(record: &StringRecord, index: usize) -> Result<Option<T>>
where
    T: FromStr<Err = RecordsError>,
{
    match record.get(index) {
        Some(value) if !value.is_empty() => value.parse().map(Some),
        _ => Ok(None),
    }
}

fn write_students<S: SettingsProvider>(service: &RecordsService<S>, path: &Path) -> Result<()> {
    let mut writer = open_writer(path)?;
    writer.write_record(STUDENT_EXPORT_HEADER)?;
    for student in service.students().iter() {
        writer.serialize(StudentExportRow {
            id: student.id(),
            reg_no: student.reg_no(),
            full_name: student.full_name(),
            email: student.email(),
            status: student.status().as_str(),
            gpa: format!("{:.2}", student.gpa()),
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn write_courses<S: SettingsProvider>(service: &RecordsService<S>, path: &Path) -> Result<()> {
    let mut writer = open_writer(path)?;
    writer.write_record(COURSE_EXPORT_HEADER)?;
    for course in service.courses().iter() {
        writer.serialize(CourseExportRow {
            code: course.code(),
            title: course.title(),
            credits: course.credits(),
            instructor: course.instructor(),
            semester: course.semester().as_str(),
            department: course.department(),
            status: course.status().as_str(),
        })?;
    }
    writer.flush()?;
    Ok(())
}
