use campus_records::adapters::csv_store::{SAMPLE_COURSES_FILE, SAMPLE_STUDENTS_FILE};
use campus_records::core::Searchable;
use campus_records::domain::{CourseOptions, CourseStatus, Grade, Semester, StudentStatus};
use campus_records::{AppConfig, CsvStore, ImportSummary, RecordsError, RecordsService};
use std::collections::BTreeSet;
use tempfile::TempDir;

fn config_in(temp_dir: &TempDir) -> AppConfig {
    AppConfig::default()
        .with_data_directory(temp_dir.path().join("data"))
        .with_backup_directory(temp_dir.path().join("backups"))
}

fn populated_service(config: &AppConfig) -> RecordsService<&AppConfig> {
    let mut service = RecordsService::new(config);
    service
        .add_student("S001", "2023001", "John Smith", "john.smith@university.edu")
        .unwrap();
    service
        .add_student("S002", "2023002", "Jane Doe", "jane.doe@university.edu")
        .unwrap();
    service
        .add_course(
            "CS101",
            "Introduction to Programming",
            3,
            CourseOptions::default()
                .instructor("Dr. Smith")
                .department("Computer Science"),
        )
        .unwrap();
    service
        .add_course(
            "MATH201",
            "Calculus I",
            4,
            CourseOptions::default()
                .instructor("Prof. Wilson")
                .semester(Semester::Spring)
                .department("Mathematics"),
        )
        .unwrap();
    service.enroll("S001", "CS101").unwrap();
    service.record_grade("S001", "CS101", Grade::A).unwrap();
    service
}

#[test]
fn test_export_then_import_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    let store = CsvStore::new(&config);
    let mut original = populated_service(&config);
    original.set_student_status("S002", StudentStatus::Graduated);
    original.set_course_status("MATH201", CourseStatus::Cancelled);

    store.export_students(&original, "students.csv").unwrap();
    store.export_courses(&original, "courses.csv").unwrap();

    let mut restored = RecordsService::new(&config);
    let students = store.import_students(&mut restored, "students.csv").unwrap();
    let courses = store.import_courses(&mut restored, "courses.csv").unwrap();
    assert_eq!(students, ImportSummary { imported: 2, skipped: 0 });
    assert_eq!(courses, ImportSummary { imported: 2, skipped: 0 });

    let ids = |s: &RecordsService<&AppConfig>| -> BTreeSet<String> {
        s.students().find_all().iter().map(|x| x.id().to_string()).collect()
    };
    let codes = |s: &RecordsService<&AppConfig>| -> BTreeSet<String> {
        s.courses().find_all().iter().map(|x| x.code().to_string()).collect()
    };
    assert_eq!(ids(&original), ids(&restored));
    assert_eq!(codes(&original), codes(&restored));

    for student in original.students().iter() {
        let copy = restored.student(student.id()).unwrap();
        assert_eq!(copy.reg_no(), student.reg_no());
        assert_eq!(copy.full_name(), student.full_name());
        assert_eq!(copy.email(), student.email());
        assert_eq!(copy.status(), student.status());
    }
    for course in original.courses().iter() {
        let copy = restored.course(course.code()).unwrap();
        assert_eq!(copy.title(), course.title());
        assert_eq!(copy.credits(), course.credits());
        assert_eq!(copy.instructor(), course.instructor());
        assert_eq!(copy.semester(), course.semester());
        assert_eq!(copy.department(), course.department());
        assert_eq!(copy.status(), course.status());
    }
    assert_eq!(restored.student("S002").unwrap().status(), StudentStatus::Graduated);
    assert_eq!(restored.course("MATH201").unwrap().status(), CourseStatus::Cancelled);
}

#[test]
fn test_course_import_skips_non_enum_semester() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    std::fs::create_dir_all(temp_dir.path().join("data")).unwrap();
    std::fs::write(
        temp_dir.path().join("data").join("courses.csv"),
        "Code,Title,Credits,Instructor,Semester,Department\n\
         CS101,Intro,3,Dr. Smith,FALL,Computer Science\n\
         CS102,Data Structures,4,Dr. Johnson,AUTUMN,Computer Science\n\
         MATH201,Calculus I,4,Prof. Wilson,summer,Mathematics\n",
    )
    .unwrap();

    let store = CsvStore::new(&config);
    let mut service = RecordsService::new(&config);
    let summary = store.import_courses(&mut service, "courses.csv").unwrap();

    assert_eq!(summary.imported, 2);
    assert_eq!(summary.skipped, 1);
    assert!(service.course("CS101").is_some());
    assert!(service.course("MATH201").is_some());
    assert!(service.course("CS102").is_none());
}

#[test]
fn test_backup_snapshot_contents() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    let store = CsvStore::new(&config);
    let mut service = populated_service(&config);
    service.set_student_status("S002", StudentStatus::Suspended);

    let report = store.create_backup(&service).unwrap();

    let folder_name = report.path.file_name().unwrap().to_string_lossy().to_string();
    assert!(folder_name.starts_with("backup_"));
    assert_eq!(folder_name.len(), "backup_2024-01-01_00-00-00".len());
    assert_eq!(report.path.parent().unwrap(), temp_dir.path().join("backups"));

    let students = std::fs::read_to_string(report.path.join("students.csv")).unwrap();
    assert_eq!(
        students,
        "ID,RegNo,FullName,Email,Status,GPA\n\
         S001,2023001,John Smith,john.smith@university.edu,ACTIVE,3.70\n\
         S002,2023002,Jane Doe,jane.doe@university.edu,SUSPENDED,0.00\n"
    );

    let courses = std::fs::read_to_string(report.path.join("courses.csv")).unwrap();
    assert!(courses.starts_with("Code,Title,Credits,Instructor,Semester,Department,Status\n"));
    assert!(courses.contains("MATH201,Calculus I,4,Prof. Wilson,SPRING,Mathematics,ACTIVE"));

    assert!(report.size_bytes.unwrap() > 0);
}

#[test]
fn test_missing_import_file_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    let store = CsvStore::new(&config);
    let mut service = RecordsService::new(&config);

    match store.import_courses(&mut service, "nope.csv") {
        Err(RecordsError::FileAccessError { path, .. }) => {
            assert_eq!(path, temp_dir.path().join("data").join("nope.csv"));
        }
        other => panic!("expected FileAccessError, got {:?}", other),
    }
}

#[test]
fn test_sample_data_seed_and_enroll() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    let store = CsvStore::new(&config);
    store.write_sample_data().unwrap();

    let mut service = RecordsService::new(&config);
    store.import_students(&mut service, SAMPLE_STUDENTS_FILE).unwrap();
    store.import_courses(&mut service, SAMPLE_COURSES_FILE).unwrap();

    service.enroll("S002", "CS102").unwrap();
    service.enroll("S002", "MATH201").unwrap();
    assert_eq!(service.credit_load(service.student("S002").unwrap()), 8);
    assert_eq!(service.find_by_instructor("dr. johnson").len(), 1);
    assert_eq!(service.course_count_by_department().get("Computer Science"), Some(&2));
}
