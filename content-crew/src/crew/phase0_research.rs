//! Stage 1: Research
//!
//! The Research Specialist searches the web for the topic, scrapes the top
//! results and compiles the key points the writer will work from.

use crate::crew::types::{ContentRequest, Stage, StageTask};

pub fn task(request: &ContentRequest) -> StageTask {
    let description = format!(
        r#"Research the topic: {topic}

Focus your research on information that would be relevant and valuable to
{audience}.

Gather the following:
1. Key facts and statistics about the topic
2. Current trends or developments
3. Common questions or pain points related to the topic
4. Credible sources that could be cited
5. Interesting angles or perspectives on the topic

Use the search tool to find relevant information and the scrape tool to extract content from websites.
Compile your findings in a structured format that can be used by the content writer.
Include at least 5-7 key points that should be covered in the content."#,
        topic = request.topic,
        audience = request.target_audience,
    );

    let expected_output = format!(
        "A comprehensive research document on {topic} containing key facts, \
statistics, trends, common questions, credible sources, and interesting perspectives. \
The document should include 5-7 key points organized in a clear structure for the content writer to use.",
        topic = request.topic,
    );

    StageTask {
        stage: Stage::Research,
        description,
        expected_output,
        search_query: Some(request.topic.trim().to_string()),
    }
}
