use anyhow::Context;
use campus_records::config::{AppConfig, CliConfig, Command};
use campus_records::core::Searchable;
use campus_records::domain::Course;
use campus_records::utils::error::ErrorSeverity;
use campus_records::utils::fs::list_files_by_depth;
use campus_records::utils::{logger, validation::Validate};
use campus_records::{CsvStore, RecordsService, Result};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    let config = cli
        .resolve_app_config()
        .context("failed to load configuration")?;

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    tracing::info!("🚀 Starting {} v{}", config.app.name, config.app.version);
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    if let Err(e) = run(&cli, &config) {
        tracing::error!("❌ {} failed: {} (Severity: {:?})", command_name(&cli.command), e, e.severity());
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Seed => "seed",
        Command::Summary => "summary",
        Command::Search { .. } => "search",
        Command::Transcript { .. } => "transcript",
        Command::Backup => "backup",
        Command::Export { .. } => "export",
    }
}

fn run(cli: &CliConfig, config: &AppConfig) -> Result<()> {
    let store = CsvStore::new(config);
    store.ensure_directories()?;
    let mut service = RecordsService::new(config);

    match &cli.command {
        Command::Seed => {
            let (students, courses) = store.write_sample_data()?;
            println!("✅ Sample data written:");
            println!("  {}", students.display());
            println!("  {}", courses.display());
        }
        Command::Summary => {
            load_data(cli, &store, &mut service)?;
            print_summary(&service);
        }
        Command::Search {
            instructor,
            department,
            semester,
        } => {
            load_data(cli, &store, &mut service)?;
            let mut results: Vec<&Course> = match (instructor, department, semester) {
                (Some(name), _, _) => service.find_by_instructor(name),
                (None, Some(dept), _) => service.find_by_department(dept),
                (None, None, Some(sem)) => service.find_by_semester(*sem),
                (None, None, None) => service.courses().find_all(),
            };
            results.sort_by(|a, b| a.code().cmp(b.code()));

            if results.is_empty() {
                println!("No courses found.");
            }
            for course in results {
                println!("{}", course);
            }
        }
        Command::Transcript { student_id } => {
            load_data(cli, &store, &mut service)?;
            println!("{}", service.transcript(student_id)?);
        }
        Command::Backup => {
            load_data(cli, &store, &mut service)?;
            let report = store.create_backup(&service)?;
            println!("✅ Backup created: {}", report.path.display());
            println!("📦 Backup size: {}", report.size_display());
            for (depth, name) in list_files_by_depth(&report.path, 1)? {
                println!("{}{}", "  ".repeat(depth), name);
            }
        }
        Command::Export {
            students_out,
            courses_out,
        } => {
            load_data(cli, &store, &mut service)?;
            let students = store.export_students(&service, students_out)?;
            let courses = store.export_courses(&service, courses_out)?;
            println!("📁 Students exported to: {}", students.display());
            println!("📁 Courses exported to: {}", courses.display());
        }
    }

    Ok(())
}

fn load_data(
    cli: &CliConfig,
    store: &CsvStore<&AppConfig>,
    service: &mut RecordsService<&AppConfig>,
) -> Result<()> {
    let students = store.import_students(service, &cli.students)?;
    let courses = store.import_courses(service, &cli.courses)?;
    tracing::info!(
        "📥 Loaded {} students ({} skipped), {} courses ({} skipped)",
        students.imported,
        students.skipped,
        courses.imported,
        courses.skipped
    );
    cli.apply_operations(service)
}

fn print_summary(service: &RecordsService<&AppConfig>) {
    let stats = service.calculate_gpa_statistics();

    println!("📋 Records Summary:");
    println!("  Students: {}", service.students().count());
    println!("  Courses: {}", service.courses().count());
    println!(
        "  Active students: {} (average GPA {:.2})",
        stats.total_students, stats.average_gpa
    );

    println!();
    println!("🏫 Courses by department:");
    for (department, count) in service.course_count_by_department() {
        let label = if department.is_empty() {
            "(none)"
        } else {
            department.as_str()
        };
        println!("  {}: {}", label, count);
    }

    println!();
    println!("📚 Courses sorted by code:");
    for course in service.courses_sorted_by_code() {
        println!("  {}", course);
    }
}
