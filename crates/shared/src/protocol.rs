use serde::{Deserialize, Serialize};

use crate::{
    catalog::CourseCatalog,
    domain::{Course, CourseId, EnrollmentDraft},
    error::EnrollmentError,
};

/// Storage key of the single enrollment slot.
pub const ENROLLMENT_SLOT_KEY: &str = "studentEnrollment";

/// Course entry as written into the slot. `description` is left out because
/// the dashboard never shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrolledCourse {
    pub id: CourseId,
    pub name: String,
    pub time: String,
    pub day: String,
    pub instructor: String,
    pub level: String,
}

impl From<&Course> for EnrolledCourse {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.clone(),
            name: course.name.clone(),
            time: course.time.clone(),
            day: course.day.clone(),
            instructor: course.instructor.clone(),
            level: course.level.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentEnrollmentRecord {
    pub name: String,
    pub age: u32,
    pub courses: Vec<EnrolledCourse>,
}

impl StudentEnrollmentRecord {
    /// Validates `draft` and resolves its selection against `catalog`.
    pub fn from_draft(
        catalog: &CourseCatalog,
        draft: &EnrollmentDraft,
    ) -> Result<Self, EnrollmentError> {
        let age = draft.validate()?;
        let courses = catalog
            .resolve(&draft.selected_course_ids)
            .into_iter()
            .map(EnrolledCourse::from)
            .collect();

        Ok(Self {
            name: draft.name.clone(),
            age: u32::from(age.years()),
            courses,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
