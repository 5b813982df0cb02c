//! Backend commands queued from UI to backend worker.

use shared::domain::EnrollmentDraft;

pub enum BackendCommand {
    SubmitEnrollment { draft: EnrollmentDraft },
    LoadDashboard,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SubmitEnrollment { .. } => "submit_enrollment",
            Self::LoadDashboard => "load_dashboard",
        }
    }
}
