use pretty_assertions::assert_eq;
use solfa_types::{ActiveDate, LevelCompletion, ProgressDocument};

#[test]
fn default_document_is_empty() {
    let doc = ProgressDocument::default();
    assert!(doc.completed_submodules.is_empty());
    assert!(doc.completed_levels.is_empty());
    assert!(doc.submodule_scores.is_empty());
    assert_eq!(doc.total_xp, 0);
    assert_eq!(doc.streak_days, 0);
    assert_eq!(doc.last_active_date, None);
    assert_eq!(doc.practice_sessions_completed, 0);
    assert_eq!(doc.total_practice_minutes, 0);
    assert_eq!(doc.current_module_id, None);
    assert_eq!(doc.current_submodule_id, None);
}

#[test]
fn round_trips_through_json() {
    let mut doc = ProgressDocument::default();
    doc.completed_submodules.insert("1.1".to_string());
    doc.completed_submodules.insert("1.2".to_string());
    doc.completed_levels.insert(
        "1-note-id".to_string(),
        LevelCompletion {
            percentage: 80,
            stars: 2,
            passed: true,
            best_time: None,
        },
    );
    doc.submodule_scores.insert("1.1".to_string(), 95);
    doc.total_xp = 120;
    doc.streak_days = 4;
    doc.last_active_date = Some(ActiveDate::new("2025-10-01"));
    doc.current_module_id = Some("1".to_string());
    doc.current_submodule_id = Some("1.2".to_string());

    let json = serde_json::to_string(&doc).unwrap();
    let parsed: ProgressDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, doc);
}

#[test]
fn missing_fields_parse_as_defaults() {
    // A document written by an older build that predates practice
    // tracking still parses, with the new fields at their defaults.
    let parsed: ProgressDocument = serde_json::from_str(
        r#"{"completed_submodules":["1.1"],"total_xp":50}"#,
    )
    .unwrap();

    assert!(parsed.completed_submodules.contains("1.1"));
    assert_eq!(parsed.total_xp, 50);
    assert_eq!(parsed.practice_sessions_completed, 0);
    assert_eq!(parsed.last_active_date, None);
}

#[test]
fn empty_object_parses_as_empty_document() {
    let parsed: ProgressDocument = serde_json::from_str("{}").unwrap();
    assert_eq!(parsed, ProgressDocument::default());
}
