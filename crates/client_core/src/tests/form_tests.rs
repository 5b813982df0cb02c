use super::*;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use proptest::prelude::*;
use storage::Storage;

use crate::notice::NoticeSeverity;

const NO_DELAY: Duration = Duration::from_millis(0);

struct FailingStore;

#[async_trait]
impl EnrollmentStore for FailingStore {
    async fn save(&self, _record: &StudentEnrollmentRecord) -> Result<()> {
        Err(anyhow!("disk quota exceeded"))
    }

    async fn load(&self) -> Result<Option<StudentEnrollmentRecord>> {
        Ok(None)
    }

    async fn clear(&self) -> Result<bool> {
        Ok(false)
    }
}

fn form() -> EnrollmentForm {
    EnrollmentForm::new(Arc::new(CourseCatalog::builtin()))
}

fn filled_form(name: &str, years: u8, ids: &[&str]) -> EnrollmentForm {
    let mut form = form();
    form.set_name(name);
    form.set_age(Age::new(years).expect("age"));
    for id in ids {
        form.toggle_course(&CourseId::from(*id)).expect("toggle");
    }
    form
}

#[test]
fn set_name_replaces_value_verbatim() {
    let mut form = form();
    form.set_name("  Alex ");
    form.set_name("Alex");
    assert_eq!(form.draft().name, "Alex");
}

#[test]
fn toggle_adds_then_removes_course() {
    let mut form = form();
    let robotics = CourseId::from("3");

    assert!(form.toggle_course(&robotics).expect("toggle on"));
    assert!(form.is_selected(&robotics));
    assert!(!form.toggle_course(&robotics).expect("toggle off"));
    assert!(form.draft().selected_course_ids.is_empty());
}

#[test]
fn toggle_refuses_unknown_course() {
    let mut form = filled_form("Alex", 8, &["1"]);
    let before = form.draft().clone();

    let err = form
        .toggle_course(&CourseId::from("99"))
        .expect_err("unknown id");

    assert_eq!(err, EnrollmentError::UnknownCourse(CourseId::from("99")));
    assert_eq!(form.draft(), &before);
}

#[test]
fn reset_discards_draft() {
    let mut form = filled_form("Alex", 8, &["1", "2"]);
    form.reset();
    assert_eq!(form.draft(), &EnrollmentDraft::default());
}

#[tokio::test]
async fn empty_name_is_rejected_without_writing() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let form = filled_form("", 8, &["1", "2"]);

    let outcome = form.submit(&storage, NO_DELAY).await;

    assert_eq!(outcome.notice(), &Notice::missing_information());
    assert!(outcome.notice().is_error());
    assert_eq!(outcome.redirect(), None);
    assert!(matches!(
        outcome,
        SubmitOutcome::Rejected {
            error: EnrollmentError::Validation(shared::error::ValidationFailure::MissingName),
            ..
        }
    ));
    assert_eq!(storage.load().await.expect("load"), None);
    assert_eq!(form.draft().selected_course_ids.len(), 2);
}

#[tokio::test]
async fn missing_age_and_empty_selection_are_rejected() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");

    let mut no_age = form();
    no_age.set_name("Alex");
    no_age
        .toggle_course(&CourseId::from("1"))
        .expect("toggle");
    assert!(!no_age.submit(&storage, NO_DELAY).await.is_saved());

    let no_courses = filled_form("Alex", 8, &[]);
    assert!(!no_courses.submit(&storage, NO_DELAY).await.is_saved());

    assert_eq!(storage.load().await.expect("load"), None);
}

#[tokio::test]
async fn valid_submission_persists_catalog_ordered_record() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let form = filled_form("Alex", 8, &["3", "1"]);

    let outcome = form.submit(&storage, Duration::from_millis(1500)).await;

    let SubmitOutcome::Saved {
        record,
        notice,
        redirect,
    } = outcome
    else {
        panic!("expected a saved outcome");
    };
    assert_eq!(record.age, 8);
    let ids: Vec<&str> = record.courses.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
    assert_eq!(notice.severity, NoticeSeverity::Success);
    assert_eq!(
        notice.description,
        "Welcome Alex! You've enrolled in 2 course(s)."
    );
    assert_eq!(
        redirect,
        Redirect {
            target: View::Dashboard,
            delay: Duration::from_millis(1500),
        }
    );
    assert_eq!(storage.load().await.expect("load"), Some(record));
}

#[tokio::test]
async fn write_failure_is_reported_as_notice() {
    let form = filled_form("Alex", 8, &["2"]);

    let outcome = form.submit(&FailingStore, NO_DELAY).await;

    assert!(matches!(outcome, SubmitOutcome::SaveFailed { .. }));
    assert_eq!(outcome.notice().title, "Enrollment Not Saved");
    assert!(outcome.notice().description.contains("disk quota exceeded"));
    assert_eq!(outcome.redirect(), None);
}

#[test]
fn prepare_submission_has_no_side_effects() {
    let form = filled_form("Alex", 8, &["4"]);
    let first = form.prepare_submission().expect("record");
    let second = form.prepare_submission().expect("record");
    assert_eq!(first, second);
    assert_eq!(first.courses[0].name, "Web Development Basics");
}

proptest! {
    #[test]
    fn even_toggle_counts_restore_membership(ids in proptest::collection::vec(1u8..=4, 0..24)) {
        let mut form = form();
        let mut expected = std::collections::BTreeSet::new();
        for id in &ids {
            let course = CourseId::new(id.to_string());
            form.toggle_course(&course).expect("catalog course");
            if !expected.remove(&course) {
                expected.insert(course);
            }
        }
        prop_assert_eq!(&form.draft().selected_course_ids, &expected);
    }
}
