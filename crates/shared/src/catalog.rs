//! Static course offerings shown by the enrollment form.

use std::collections::{BTreeSet, HashSet};

use crate::{
    domain::{Course, CourseId},
    error::EnrollmentError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseCatalog {
    courses: Vec<Course>,
}

impl CourseCatalog {
    pub fn new(courses: Vec<Course>) -> Result<Self, EnrollmentError> {
        let mut seen = HashSet::with_capacity(courses.len());
        for course in &courses {
            if !seen.insert(&course.id) {
                return Err(EnrollmentError::DuplicateCourse(course.id.clone()));
            }
        }
        Ok(Self { courses })
    }

    pub fn builtin() -> Self {
        Self {
            courses: vec![
                course(
                    "1",
                    "Creative Coding for Kids",
                    "10:00 AM - 12:00 PM",
                    "Saturday",
                    "Ms. Sarah",
                    "Beginner",
                    "Learn programming through fun games and animations!",
                ),
                course(
                    "2",
                    "Digital Art & Design",
                    "2:00 PM - 4:00 PM",
                    "Saturday",
                    "Mr. Alex",
                    "Beginner",
                    "Create amazing digital artwork and learn design principles!",
                ),
                course(
                    "3",
                    "Robotics Workshop",
                    "10:00 AM - 12:00 PM",
                    "Sunday",
                    "Dr. Maya",
                    "Intermediate",
                    "Build and program your own robots!",
                ),
                course(
                    "4",
                    "Web Development Basics",
                    "2:00 PM - 4:00 PM",
                    "Sunday",
                    "Mr. David",
                    "Beginner",
                    "Create your first website with HTML, CSS, and JavaScript!",
                ),
            ],
        }
    }

    pub fn list_courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn get(&self, id: &CourseId) -> Option<&Course> {
        self.courses.iter().find(|course| &course.id == id)
    }

    pub fn contains(&self, id: &CourseId) -> bool {
        self.get(id).is_some()
    }

    /// Courses whose id is in `ids`, in catalog order. Ids the catalog does
    /// not know are skipped.
    pub fn resolve(&self, ids: &BTreeSet<CourseId>) -> Vec<&Course> {
        self.courses
            .iter()
            .filter(|course| ids.contains(&course.id))
            .collect()
    }
}

impl Default for CourseCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn course(
    id: &str,
    name: &str,
    time: &str,
    day: &str,
    instructor: &str,
    level: &str,
    description: &str,
) -> Course {
    Course {
        id: CourseId::from(id),
        name: name.to_string(),
        time: time.to_string(),
        day: day.to_string(),
        instructor: instructor.to_string(),
        level: level.to_string(),
        description: description.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
