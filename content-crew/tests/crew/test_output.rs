//! File output tests

use chrono::{Local, TimeZone};
use std::fs;

use content_crew::crew::output::{output_filename, save_content, save_run_record};
use content_crew::crew::{CrewOutput, Stage};

use super::common::*;

#[tokio::test]
async fn test_save_content_writes_markdown() {
    let dir = tempfile::tempdir().unwrap();
    let now = Local.with_ymd_and_hms(2025, 6, 1, 14, 30, 0).unwrap();
    let request = sample_request();

    let path = save_content(dir.path(), &request, "Final text", now)
        .await
        .unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "blog_home_composting_20250601_143000.md"
    );
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("# Blog Content: Home composting\n\n"));
    assert!(written.contains("Target Audience: urban gardeners\nTone: casual\n"));
    assert!(written.contains("Created: 2025-06-01 14:30:00"));
    assert!(written.ends_with("---\n\nFinal text"));
}

#[tokio::test]
async fn test_save_content_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("out").join("content");

    let path = save_content(&nested, &sample_request(), "text", Local::now())
        .await
        .unwrap();
    assert!(path.starts_with(&nested));
    assert!(path.exists());
}

#[test]
fn test_filename_depends_only_on_inputs_and_clock() {
    let now = Local.with_ymd_and_hms(2025, 6, 1, 14, 30, 0).unwrap();
    let request = sample_request();
    assert_eq!(output_filename(&request, now), output_filename(&request, now));
}

#[tokio::test]
async fn test_run_record_round_trips() {
    let h = harness();
    let output = h.crew.kickoff(&sample_request()).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let now = Local.with_ymd_and_hms(2025, 6, 1, 14, 30, 0).unwrap();
    let path = save_run_record(dir.path(), &output, now).await.unwrap();
    assert!(path.ends_with("content_run_20250601_143000.yaml"));

    let loaded: CrewOutput = serde_yaml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded, output);
    assert_eq!(loaded.tasks_output[0].stage, Stage::Research);
    assert_eq!(loaded.tasks_output[0].agent, "Research Specialist");
}
