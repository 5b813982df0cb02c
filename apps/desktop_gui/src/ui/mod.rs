//! UI layer for desktop GUI: enrollment form, dashboard, and notices.

pub mod app;

pub use app::{DesktopGuiApp, StartupConfig};
