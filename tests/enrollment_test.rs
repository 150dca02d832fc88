use campus_records::core::Searchable;
use campus_records::domain::{CourseOptions, Grade, Semester, StudentStatus};
use campus_records::{AppConfig, RecordsError, RecordsService};

fn build_service(max_credits: u32) -> RecordsService<AppConfig> {
    let mut service = RecordsService::new(AppConfig::default().with_max_credits(max_credits));

    for (id, name) in [("S001", "John Smith"), ("S002", "Jane Doe")] {
        service
            .add_student(id, &format!("2023{}", &id[1..]), name, "student@uni.edu")
            .unwrap();
    }

    let catalogue = [
        ("CS101", 4, Semester::Fall),
        ("CS102", 4, Semester::Fall),
        ("CS201", 4, Semester::Spring),
        ("CS202", 4, Semester::Spring),
        ("CS301", 4, Semester::Summer),
        ("ART100", 1, Semester::Fall),
    ];
    for (code, credits, semester) in catalogue {
        service
            .add_course(
                code,
                &format!("Course {}", code),
                credits,
                CourseOptions::default()
                    .semester(semester)
                    .department("Computer Science"),
            )
            .unwrap();
    }

    service
}

fn assert_relation_symmetric(service: &RecordsService<AppConfig>) {
    for student in service.students().find_all() {
        for code in student.enrolled_courses() {
            let course = service.course(code).expect("enrolled course should exist");
            assert!(
                course.has_student(student.id()),
                "{} lists {} but course does not list student",
                student.id(),
                code
            );
        }
    }
    for course in service.courses().find_all() {
        for id in course.enrolled_students() {
            let student = service.student(id).expect("enrolled student should exist");
            assert!(
                student.is_enrolled_in(course.code()),
                "{} lists {} but student does not list course",
                course.code(),
                id
            );
        }
    }
}

fn credit_total(service: &RecordsService<AppConfig>, id: &str) -> u32 {
    service.credit_load(service.student(id).unwrap())
}

#[test]
fn test_fifth_four_credit_course_exceeds_cap() {
    let mut service = build_service(18);
    for code in ["CS101", "CS102", "CS201", "CS202"] {
        service.enroll("S001", code).unwrap();
    }
    assert_eq!(credit_total(&service, "S001"), 16);

    let err = service.enroll("S001", "CS301").unwrap_err();
    match err {
        RecordsError::CreditLimitExceeded { attempted, max } => {
            assert_eq!(attempted, 20);
            assert_eq!(max, 18);
        }
        other => panic!("expected CreditLimitExceeded, got {:?}", other),
    }

    let enrolled: Vec<&str> = service
        .student("S001")
        .unwrap()
        .enrolled_courses()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(enrolled, vec!["CS101", "CS102", "CS201", "CS202"]);
    assert_relation_symmetric(&service);
}

#[test]
fn test_cap_holds_across_enrollment_sequence() {
    let mut service = build_service(18);
    let attempts = [
        ("S001", "CS101"),
        ("S001", "CS102"),
        ("S002", "CS101"),
        ("S001", "CS101"),
        ("S001", "CS201"),
        ("S001", "ART100"),
        ("S001", "CS202"),
        ("S001", "CS301"),
        ("S002", "MISSING1"),
        ("S003", "CS101"),
    ];

    for (student, course) in attempts {
        let _ = service.enroll(student, course);
        assert!(credit_total(&service, "S001") <= 18);
        assert!(credit_total(&service, "S002") <= 18);
        assert_relation_symmetric(&service);
    }

    // 4 + 4 + 4 + 1 = 13，再加 4 = 17，CS301 會超過
    assert_eq!(credit_total(&service, "S001"), 17);
}

#[test]
fn test_duplicate_enrollment_is_rejected() {
    let mut service = build_service(18);
    service.enroll("S002", "CS101").unwrap();

    let err = service.enroll("S002", "CS101").unwrap_err();
    assert!(matches!(err, RecordsError::DuplicateEnrollment { .. }));
    assert_eq!(service.course("CS101").unwrap().enrolled_students().len(), 1);
    assert_eq!(service.student("S002").unwrap().enrolled_courses().len(), 1);
    assert_relation_symmetric(&service);
}

#[test]
fn test_unenroll_then_gpa_excludes_course() {
    let mut service = build_service(18);
    service.enroll("S001", "CS101").unwrap();
    service.enroll("S001", "CS102").unwrap();
    service.record_grade("S001", "CS101", Grade::S).unwrap();
    service.record_grade("S001", "CS102", Grade::C).unwrap();
    assert!((service.calculate_gpa("S001").unwrap() - 3.0).abs() < 1e-9);

    assert!(service.unenroll("S001", "CS102"));
    assert!((service.calculate_gpa("S001").unwrap() - 4.0).abs() < 1e-9);
    assert!(service.student("S001").unwrap().grade_for("CS102").is_none());
    assert_relation_symmetric(&service);

    // 重新選課不會帶回舊成績
    service.enroll("S001", "CS102").unwrap();
    assert!(service.student("S001").unwrap().grade_for("CS102").is_none());
}

#[test]
fn test_grade_for_unenrolled_course_is_not_recorded() {
    let mut service = build_service(18);
    service.enroll("S001", "CS101").unwrap();
    service.record_grade("S001", "CS101", Grade::B).unwrap();
    let before = service.calculate_gpa("S001").unwrap();

    assert!(service.record_grade("S001", "CS201", Grade::S).is_err());

    let student = service.student("S001").unwrap();
    assert!(student.grade_for("CS201").is_none());
    assert_eq!(service.calculate_gpa("S001").unwrap(), before);
}

#[test]
fn test_graduated_student_can_be_reactivated() {
    let mut service = build_service(18);
    assert!(service.set_student_status("S001", StudentStatus::Graduated));
    assert_eq!(service.calculate_gpa_statistics().total_students, 1);

    // 目前沒有狀態轉換限制
    assert!(service.set_student_status("S001", StudentStatus::Active));
    assert_eq!(service.student("S001").unwrap().status(), StudentStatus::Active);
    assert_eq!(service.calculate_gpa_statistics().total_students, 2);
}

#[test]
fn test_lower_cap_from_config() {
    let mut service = build_service(8);
    service.enroll("S001", "CS101").unwrap();
    service.enroll("S001", "CS102").unwrap();
    assert!(matches!(
        service.enroll("S001", "ART100"),
        Err(RecordsError::CreditLimitExceeded { attempted: 9, max: 8 })
    ));
}
