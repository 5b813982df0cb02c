//! Enrollment client logic shared by the desktop app and the maintenance tool.
//!
//! The form owns the draft, [`EnrollmentService`] owns the persistence
//! handle, and the dashboard is a one-shot read of whatever the slot holds.

pub mod config;
pub mod dashboard;
pub mod form;
pub mod navigation;
pub mod notice;
mod service;

pub use dashboard::{DashboardView, EnrollmentSummary};
pub use form::{submit_draft, EnrollmentForm, SubmitOutcome};
pub use navigation::{Navigator, Redirect, View};
pub use notice::{Notice, NoticeSeverity};
pub use service::EnrollmentService;
