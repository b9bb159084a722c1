//! CLI schema and prompting tests

use clap::Parser;
use std::io::Cursor;

use content_crew::crew::cli::{Args, Prompter};
use content_crew::crew::ContentRequest;
use content_crew_sdk::{FieldType, WorkflowDefinition};

#[test]
fn test_interactive_session_collects_all_fields() {
    let args = Args::parse_from(["content-crew"]);
    let input = Cursor::new("social\nRemote work\n\nstartup founders\nwitty\n");
    let mut output = Vec::new();

    let request = Prompter::new(input, &mut output)
        .collect_request(&args)
        .unwrap();

    assert_eq!(
        request,
        ContentRequest::new("social", "Remote work", "startup founders", "witty")
    );
    // The empty audience answer was asked again
    let printed = String::from_utf8(output).unwrap();
    assert_eq!(printed.matches("Who is the target audience").count(), 2);
}

#[test]
fn test_invalid_content_type_flag_is_rejected() {
    let args = Args::parse_from(["content-crew", "-t", "podcast"]);
    let mut output = Vec::new();
    let result = Prompter::new(Cursor::new(""), &mut output).collect_request(&args);
    assert!(result.is_err());
}

#[test]
fn test_workflow_metadata() {
    let metadata = Args::metadata();
    assert_eq!(metadata.id, "content_crew");
    assert_eq!(metadata.name, "Content Creation Crew");

    let fields = Args::fields();
    let content_type = fields.iter().find(|f| f.name == "content_type").unwrap();
    assert_eq!(content_type.cli_arg, "--content-type");
    assert!(!content_type.required);
    assert_eq!(
        content_type.field_type,
        FieldType::Select {
            options: vec!["blog".into(), "social".into(), "email".into()]
        }
    );

    let scrape = fields.iter().find(|f| f.name == "scrape_limit").unwrap();
    assert_eq!(scrape.field_type, FieldType::Number { min: Some(0), max: Some(5) });
    assert_eq!(scrape.default.as_deref(), Some("2"));

    let save_stages = fields.iter().find(|f| f.name == "save_stages").unwrap();
    assert_eq!(save_stages.field_type, FieldType::Flag);

    let json = serde_json::to_value(Args::full_metadata()).unwrap();
    assert_eq!(json["id"], "content_crew");
    assert!(json["fields"].as_array().unwrap().len() >= 10);
}
