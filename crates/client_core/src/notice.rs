//! Transient, user-facing messages raised by the form.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn missing_information() -> Self {
        Self {
            severity: NoticeSeverity::Destructive,
            title: "Missing Information".to_string(),
            description: "Please fill in all fields and select at least one course.".to_string(),
        }
    }

    pub fn enrolled(student_name: &str, course_count: usize) -> Self {
        Self {
            severity: NoticeSeverity::Success,
            title: "Enrollment Successful! 🎉".to_string(),
            description: format!(
                "Welcome {student_name}! You've enrolled in {course_count} course(s)."
            ),
        }
    }

    pub fn save_failed(reason: impl fmt::Display) -> Self {
        Self {
            severity: NoticeSeverity::Destructive,
            title: "Enrollment Not Saved".to_string(),
            description: format!("Your enrollment could not be stored: {reason}"),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == NoticeSeverity::Destructive
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
