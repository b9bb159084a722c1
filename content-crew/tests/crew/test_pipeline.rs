//! End-to-end pipeline behaviour with stub collaborators

use content_crew::crew::{ContentRequest, Stage};

use super::common::*;

#[tokio::test]
async fn test_stages_run_in_order() {
    let h = harness();
    let output = h.crew.kickoff(&sample_request()).await.unwrap();

    let roles: Vec<String> = h
        .model
        .calls()
        .iter()
        .map(|call| role_of(&call.system).to_string())
        .collect();
    assert_eq!(
        roles,
        vec![
            "Research Specialist",
            "Content Writer",
            "Content Editor",
            "SEO Specialist"
        ]
    );

    let stages: Vec<Stage> = output.tasks_output.iter().map(|t| t.stage).collect();
    assert_eq!(stages, Stage::ALL.to_vec());
}

#[tokio::test]
async fn test_each_stage_gets_previous_output_as_context() {
    let h = harness();
    h.crew.kickoff(&sample_request()).await.unwrap();
    let calls = h.model.calls();

    assert!(!calls[0].user.contains("Context from the previous task"));
    assert!(calls[1]
        .user
        .contains("Context from the previous task:\nResearch Specialist output"));
    assert!(calls[2]
        .user
        .contains("Context from the previous task:\nContent Writer output"));
    assert!(calls[3]
        .user
        .contains("Context from the previous task:\nContent Editor output"));
}

#[tokio::test]
async fn test_final_output_is_optimize_stage() {
    let h = harness();
    let output = h.crew.kickoff(&sample_request()).await.unwrap();

    assert_eq!(output.raw, "SEO Specialist output");
    assert_eq!(output.stage(Stage::Edit).unwrap().raw, "Content Editor output");
    assert_eq!(output.to_string(), output.raw);
}

#[tokio::test]
async fn test_research_and_seo_stages_use_search() {
    let h = harness();
    h.crew.kickoff(&sample_request()).await.unwrap();

    let queries = h.search.queries.lock().unwrap().clone();
    assert_eq!(
        queries,
        vec![
            ("Home composting".to_string(), 5),
            ("Home composting SEO keywords".to_string(), 5),
        ]
    );

    let calls = h.model.calls();
    assert!(calls[0].user.contains("Tool observations:"));
    assert!(calls[0].user.contains("1. Result 1\nURL: https://example.com/1"));
    assert!(!calls[1].user.contains("Tool observations:"));
    assert!(!calls[2].user.contains("Tool observations:"));
    assert!(calls[3]
        .user
        .contains("Search results for \"Home composting SEO keywords\""));
}

#[tokio::test]
async fn test_researcher_scrapes_top_results_only() {
    let h = harness();
    h.crew.kickoff(&sample_request()).await.unwrap();

    let mut urls = h.scraper.urls.lock().unwrap().clone();
    urls.sort();
    assert_eq!(
        urls,
        vec!["https://example.com/1", "https://example.com/2"]
    );

    let research_prompt = &h.model.calls()[0].user;
    assert!(research_prompt.contains("Content of https://example.com/1:\nPage body of https://example.com/1"));
    // A failed scrape is reported to the model, not raised
    assert!(research_prompt.contains("Could not scrape https://example.com/2"));
}

#[tokio::test]
async fn test_search_failure_becomes_observation() {
    let h = harness_with(
        StubModel::default(),
        StubSearch {
            fail: true,
            ..Default::default()
        },
    );

    let output = h.crew.kickoff(&sample_request()).await.unwrap();
    assert_eq!(output.raw, "SEO Specialist output");

    let research_prompt = &h.model.calls()[0].user;
    assert!(research_prompt.contains("Search for \"Home composting\" failed: search API quota exceeded"));
    assert!(h.scraper.urls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_stage_failure_stops_the_run() {
    let h = harness_with(StubModel::failing_on("Content Editor"), StubSearch::default());

    let err = h.crew.kickoff(&sample_request()).await.unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Stage 3 (Edit) failed"));
    assert!(message.contains("model overloaded"));

    // The SEO stage never ran
    assert_eq!(h.model.calls().len(), 3);
}

#[tokio::test]
async fn test_blank_field_fails_before_any_call() {
    let h = harness();
    let request = ContentRequest::new("blog", "  ", "urban gardeners", "casual");

    let err = h.crew.kickoff(&request).await.unwrap_err();
    assert!(format!("{:#}", err).contains("'topic' must not be empty"));
    assert!(h.model.calls().is_empty());
    assert!(h.search.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_prompts_carry_request_fields() {
    let h = harness();
    h.crew.kickoff(&sample_request()).await.unwrap();
    let calls = h.model.calls();

    assert!(calls[0].user.starts_with("Research the topic: Home composting"));
    assert!(calls[1].user.contains("- Be written in a casual tone"));
    assert!(calls[1].user.contains("- Target urban gardeners"));
    assert!(calls[3].user.contains("The target audience is urban gardeners."));
    assert!(calls[2].system.contains("meticulous editor"));
}
