use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::config::{load_settings, prepare_database_url};
use crossbeam_channel::bounded;
use eframe::egui;
use shared::catalog::CourseCatalog;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{
    commands::BackendCommand,
    runtime::{launch, WorkerConfig},
};
use crate::controller::events::UiEvent;
use crate::ui::{DesktopGuiApp, StartupConfig};

const APP_TITLE: &str = "Course Enrollment";

#[derive(Parser, Debug)]
#[command(about = "Course enrollment form and student dashboard")]
struct Cli {
    /// SQLite url for the enrollment slot. Overrides settings and `--data-dir`.
    #[arg(long)]
    database_url: Option<String>,
    /// Directory holding `enrollment.sqlite3`.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

impl Cli {
    fn startup_config(self) -> StartupConfig {
        StartupConfig {
            database_url: self.database_url,
            data_dir: self.data_dir,
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings();
    init_tracing(&settings.log_filter);

    let startup = cli.startup_config();
    let catalog = Arc::new(CourseCatalog::builtin());

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);

    let database_url = prepare_database_url(&startup.resolve_database_url(&settings.database_url));
    launch(
        cmd_rx,
        ui_tx,
        WorkerConfig {
            database_url,
            redirect_delay: settings.redirect_delay(),
            catalog: Arc::clone(&catalog),
        },
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([960.0, 760.0])
            .with_min_inner_size([640.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(DesktopGuiApp::new(cmd_tx, ui_rx, catalog)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_storage_overrides() {
        let cli = Cli::parse_from([
            "desktop_gui",
            "--database-url",
            "sqlite::memory:",
            "--data-dir",
            "/tmp/enroll",
        ]);
        let startup = cli.startup_config();
        assert_eq!(startup.database_url.as_deref(), Some("sqlite::memory:"));
        assert_eq!(startup.data_dir, Some(PathBuf::from("/tmp/enroll")));
    }

    #[test]
    fn defaults_to_configured_database() {
        let startup = Cli::parse_from(["desktop_gui"]).startup_config();
        assert_eq!(
            startup.resolve_database_url("sqlite://configured.db"),
            "sqlite://configured.db"
        );
    }
}
