//! Stage 4: SEO optimization
//!
//! The SEO Specialist looks up keywords for the topic and reports on how to
//! make the edited piece more discoverable. Its output is the run's final text.

use crate::crew::types::{ContentRequest, Stage, StageTask};

pub fn task(request: &ContentRequest) -> StageTask {
    let description = format!(
        r#"Optimize the {content_type} content about {topic} for search engines.

Your optimization should:
1. Identify 3-5 relevant keywords or phrases that the content should target
2. Suggest improvements to the title/headline for SEO
3. Recommend meta description text (if applicable)
4. Suggest improvements to headings and subheadings
5. Identify opportunities for internal or external links

Use the search tool to research popular keywords and SEO trends related to the topic.
Make sure your suggestions maintain readability and don't compromise the quality or tone of the content.
The target audience is {audience}."#,
        content_type = request.content_type,
        topic = request.topic,
        audience = request.target_audience,
    );

    let expected_output = format!(
        "An SEO optimization report for the {content_type} content that includes \
3-5 target keywords, improved title suggestions, meta description recommendations, heading improvements, \
and link opportunities. The report should maintain the content's readability and quality while enhancing \
its search engine visibility.",
        content_type = request.content_type,
    );

    StageTask {
        stage: Stage::Optimize,
        description,
        expected_output,
        search_query: Some(format!("{} SEO keywords", request.topic.trim())),
    }
}
