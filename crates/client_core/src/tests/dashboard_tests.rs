use super::*;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{
    catalog::CourseCatalog,
    domain::{Age, CourseId, EnrollmentDraft},
};
use storage::Storage;

struct UnreadableStore;

#[async_trait]
impl EnrollmentStore for UnreadableStore {
    async fn save(&self, _record: &StudentEnrollmentRecord) -> Result<()> {
        Ok(())
    }

    async fn load(&self) -> Result<Option<StudentEnrollmentRecord>> {
        Err(anyhow!("database is locked"))
    }

    async fn clear(&self) -> Result<bool> {
        Ok(false)
    }
}

fn record(ids: &[&str]) -> StudentEnrollmentRecord {
    let draft = EnrollmentDraft {
        name: "Alex".to_string(),
        age: Some(Age::new(8).expect("age")),
        selected_course_ids: ids.iter().map(|id| CourseId::from(*id)).collect(),
    };
    StudentEnrollmentRecord::from_draft(&CourseCatalog::builtin(), &draft).expect("record")
}

#[test]
fn derived_values_follow_course_count() {
    let summary = EnrollmentSummary::new(record(&["1", "3"]));

    assert_eq!(summary.course_count(), 2);
    assert_eq!(summary.weekly_hours(), 4);
    assert_eq!(summary.weekly_hours_label(), "4h");
    assert_eq!(summary.status_label(), "Active");
    assert_eq!(summary.greeting(), "Welcome, Alex! 🎉");
    assert_eq!(summary.age_label(), "Age 8");
}

#[test]
fn weekly_hours_ignore_listed_time_windows() {
    let mut stretched = record(&["2"]);
    stretched.courses[0].time = "9:00 AM - 5:00 PM".to_string();
    assert_eq!(EnrollmentSummary::new(stretched).weekly_hours(), 2);
}

#[test]
fn absent_record_is_empty_view() {
    let view = DashboardView::from_record(None);
    assert!(view.is_empty());
    assert_eq!(view.summary(), None);
}

#[tokio::test]
async fn loads_empty_view_from_fresh_store() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    assert_eq!(DashboardView::load(&storage).await, DashboardView::Empty);
}

#[tokio::test]
async fn read_errors_show_empty_view() {
    assert_eq!(
        DashboardView::load(&UnreadableStore).await,
        DashboardView::Empty
    );
}

#[tokio::test]
async fn loads_saved_record() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let saved = record(&["4"]);
    storage.save(&saved).await.expect("save");

    let view = DashboardView::load(&storage).await;
    let summary = view.summary().expect("enrolled");
    assert_eq!(summary.record(), &saved);
    assert_eq!(summary.courses()[0].instructor, "Mr. David");
}
