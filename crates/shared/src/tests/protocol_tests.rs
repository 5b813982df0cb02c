use super::*;
use crate::domain::Age;

fn alex_draft(ids: &[&str]) -> EnrollmentDraft {
    EnrollmentDraft {
        name: "Alex".to_string(),
        age: Some(Age::new(8).expect("age")),
        selected_course_ids: ids.iter().map(|id| CourseId::from(*id)).collect(),
    }
}

#[test]
fn record_lists_courses_in_catalog_order() {
    let catalog = CourseCatalog::builtin();
    let record = StudentEnrollmentRecord::from_draft(&catalog, &alex_draft(&["3", "1"]))
        .expect("record");

    assert_eq!(record.name, "Alex");
    assert_eq!(record.age, 8);
    let ids: Vec<&str> = record.courses.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
    assert_eq!(record.courses[1].instructor, "Dr. Maya");
}

#[test]
fn record_from_invalid_draft_is_a_validation_error() {
    let catalog = CourseCatalog::builtin();
    let mut draft = alex_draft(&["1"]);
    draft.name.clear();

    let err = StudentEnrollmentRecord::from_draft(&catalog, &draft).expect_err("invalid");
    assert!(err.is_validation());
}

#[test]
fn serialized_record_matches_slot_layout() {
    let catalog = CourseCatalog::builtin();
    let record =
        StudentEnrollmentRecord::from_draft(&catalog, &alex_draft(&["2"])).expect("record");

    let value: serde_json::Value =
        serde_json::from_str(&record.to_json().expect("json")).expect("value");
    assert_eq!(value["name"], "Alex");
    assert_eq!(value["age"], 8);
    assert_eq!(value["courses"][0]["id"], "2");
    assert_eq!(value["courses"][0]["day"], "Saturday");
    assert!(value["courses"][0].get("description").is_none());
}

#[test]
fn parses_records_that_still_carry_descriptions() {
    let raw = r#"{"name":"Sam","age":11,"courses":[{"id":"3","name":"Robotics Workshop","time":"10:00 AM - 12:00 PM","day":"Sunday","instructor":"Dr. Maya","level":"Intermediate","description":"Build and program your own robots!"}]}"#;
    let record = StudentEnrollmentRecord::from_json(raw).expect("record");
    assert_eq!(record.age, 11);
    assert_eq!(record.courses[0].level, "Intermediate");
}

#[test]
fn json_round_trip_is_lossless() {
    let catalog = CourseCatalog::builtin();
    let record = StudentEnrollmentRecord::from_draft(&catalog, &alex_draft(&["1", "2", "4"]))
        .expect("record");

    let decoded =
        StudentEnrollmentRecord::from_json(&record.to_json().expect("json")).expect("decode");
    assert_eq!(decoded, record);
}
