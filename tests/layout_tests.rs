use class_schedule_ics::{ColumnLayout, ConversionError, LayoutField};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn default_layout_matches_legacy_positions() {
    let layout = ColumnLayout::default();
    assert_eq!(layout.start_col, 0);
    assert_eq!(layout.end_col, 1);
    assert_eq!(layout.summary_col, 4);
    assert_eq!(layout.description_cols, vec![6, 7, 8]);
    assert_eq!(layout.location_col, 10);
    assert_eq!(
        layout.to_cli_summary(),
        "start=A, end=B, summary=E, description=G,H,I, location=K"
    );
}

#[test]
fn layout_json_round_trip() {
    let mut layout = ColumnLayout::default();
    layout.set_field(LayoutField::Location, &[11]).unwrap();
    layout.set_field(LayoutField::Description, &[5]).unwrap();

    let file = NamedTempFile::new().unwrap();
    layout.save_json(file.path()).unwrap();
    let loaded = ColumnLayout::load_json(file.path()).unwrap();
    assert_eq!(loaded, layout);
}

#[test]
fn description_columns_default_to_none_when_omitted() {
    let layout: ColumnLayout = serde_json::from_str(
        r#"{"start_col": 1, "end_col": 2, "summary_col": 3, "location_col": 4}"#,
    )
    .unwrap();
    assert!(layout.description_cols.is_empty());
}

#[test]
fn single_column_fields_reject_lists() {
    let mut layout = ColumnLayout::default();
    assert!(layout.set_field(LayoutField::Start, &[1, 2]).is_err());
    assert!(layout.set_field(LayoutField::Summary, &[]).is_err());
    assert_eq!(layout, ColumnLayout::default());
}

#[test]
fn huge_column_indices_still_summarize() {
    let mut layout = ColumnLayout::default();
    layout.set_field(LayoutField::Start, &[usize::MAX]).unwrap();
    layout
        .set_field(LayoutField::Description, &[usize::MAX, 16_383])
        .unwrap();

    let summary = layout.to_cli_summary();
    assert!(summary.starts_with("start="), "{summary}");
    assert!(summary.contains(",XFD, location=K"), "{summary}");
}

#[test]
fn malformed_layout_file_is_a_serialization_error() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"{\"start_col\": \"A\"}").unwrap();
    let err = ColumnLayout::load_json(file.path()).unwrap_err();
    assert!(matches!(err, ConversionError::Serialization(_)));
}
