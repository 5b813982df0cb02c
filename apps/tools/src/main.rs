use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    config::{load_settings, prepare_database_url},
    dashboard::{EMPTY_HINT, EMPTY_TITLE},
    DashboardView,
};
use shared::{catalog::CourseCatalog, protocol::ENROLLMENT_SLOT_KEY};
use storage::{EnrollmentStore, Storage};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    /// Defaults to the same database the desktop app uses.
    #[arg(long)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the course catalog.
    Courses,
    /// Print the stored enrollment.
    Show {
        /// Print the slot payload as stored instead of the dashboard summary.
        #[arg(long)]
        raw: bool,
    },
    /// Remove the stored enrollment.
    Clear,
}

/// `RUST_LOG` when set, otherwise the configured filter.
fn log_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&settings.log_filter))
        .init();

    if let Command::Courses = cli.command {
        for course in CourseCatalog::builtin().list_courses() {
            println!(
                "{}\t{}\t{} {}\t{}\t{}",
                course.id, course.name, course.day, course.time, course.instructor, course.level
            );
        }
        return Ok(());
    }

    let database_url =
        prepare_database_url(cli.database_url.as_deref().unwrap_or(&settings.database_url));
    let storage = Storage::new(&database_url).await?;

    match cli.command {
        Command::Courses => {}
        Command::Show { raw: true } => match storage.read_slot(ENROLLMENT_SLOT_KEY).await? {
            Some(slot) => {
                println!("updated_at={}", slot.updated_at.to_rfc3339());
                println!("{}", slot.payload);
            }
            None => println!("slot '{ENROLLMENT_SLOT_KEY}' is empty"),
        },
        Command::Show { raw: false } => match DashboardView::from_record(storage.load().await?) {
            DashboardView::Empty => println!("{EMPTY_TITLE}: {EMPTY_HINT}"),
            DashboardView::Enrolled(summary) => {
                println!("{} ({})", summary.student_name(), summary.age_label());
                println!(
                    "courses={} weekly_hours={} status={}",
                    summary.course_count(),
                    summary.weekly_hours_label(),
                    summary.status_label()
                );
                for course in summary.courses() {
                    println!(
                        "  {}\t{} {}\t{}",
                        course.name, course.day, course.time, course.instructor
                    );
                }
            }
        },
        Command::Clear => {
            if storage.clear().await? {
                println!("cleared slot '{ENROLLMENT_SLOT_KEY}'");
            } else {
                println!("slot '{ENROLLMENT_SLOT_KEY}' was already empty");
            }
        }
    }

    Ok(())
}
