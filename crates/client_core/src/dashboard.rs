use shared::protocol::{EnrolledCourse, StudentEnrollmentRecord};
use storage::EnrollmentStore;
use tracing::warn;

/// Every course is counted as one two-hour weekly session, whatever its
/// listed time window.
pub const HOURS_PER_COURSE: u32 = 2;
pub const ACTIVE_STATUS: &str = "Active";
pub const EMPTY_TITLE: &str = "No Enrollment Found";
pub const EMPTY_HINT: &str = "You need to enroll in a course first!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardView {
    Empty,
    Enrolled(EnrollmentSummary),
}

impl DashboardView {
    /// Reads the slot once. Read failures land in the empty state, the same
    /// as a slot that was never written.
    pub async fn load<S>(store: &S) -> Self
    where
        S: EnrollmentStore + ?Sized,
    {
        match store.load().await {
            Ok(record) => Self::from_record(record),
            Err(err) => {
                warn!("failed to read enrollment slot, showing empty dashboard: {err:#}");
                Self::Empty
            }
        }
    }

    pub fn from_record(record: Option<StudentEnrollmentRecord>) -> Self {
        match record {
            Some(record) => Self::Enrolled(EnrollmentSummary::new(record)),
            None => Self::Empty,
        }
    }

    pub fn summary(&self) -> Option<&EnrollmentSummary> {
        match self {
            Self::Enrolled(summary) => Some(summary),
            Self::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentSummary {
    record: StudentEnrollmentRecord,
}

impl EnrollmentSummary {
    pub fn new(record: StudentEnrollmentRecord) -> Self {
        Self { record }
    }

    pub fn record(&self) -> &StudentEnrollmentRecord {
        &self.record
    }

    pub fn student_name(&self) -> &str {
        &self.record.name
    }

    pub fn age(&self) -> u32 {
        self.record.age
    }

    pub fn courses(&self) -> &[EnrolledCourse] {
        &self.record.courses
    }

    pub fn course_count(&self) -> usize {
        self.record.courses.len()
    }

    pub fn weekly_hours(&self) -> u32 {
        u32::try_from(self.course_count())
            .unwrap_or(u32::MAX)
            .saturating_mul(HOURS_PER_COURSE)
    }

    pub fn weekly_hours_label(&self) -> String {
        format!("{}h", self.weekly_hours())
    }

    pub fn status_label(&self) -> &'static str {
        ACTIVE_STATUS
    }

    pub fn greeting(&self) -> String {
        format!("Welcome, {}! 🎉", self.record.name)
    }

    pub fn age_label(&self) -> String {
        format!("Age {}", self.record.age)
    }
}

#[cfg(test)]
#[path = "tests/dashboard_tests.rs"]
mod tests;
