//! Stage 2: Write
//!
//! Turns the research notes into a first draft in the requested format.

use crate::crew::types::{ContentRequest, Stage, StageTask};

pub fn task(request: &ContentRequest) -> StageTask {
    let description = format!(
        r#"Create {content_type} content about {topic} based on the research provided.

The content should:
- Be written in a {tone} tone
- Target {audience}
- Include the key points from the research
- Be engaging and informative

For a blog post: Create a compelling headline, introduction, 3-5 main sections with subheadings, and a conclusion.
For social media: Create 3-5 posts with appropriate hashtags and calls to action.
For email: Create a subject line and email body with a clear call to action.

Make the content compelling and valuable to the target audience."#,
        content_type = request.content_type,
        topic = request.topic,
        tone = request.tone,
        audience = request.target_audience,
    );

    let expected_output = format!(
        "A complete {content_type} piece about {topic} written in a {tone} tone for {audience}. \
The content will incorporate all key research points in an engaging and structured format.",
        content_type = request.content_type,
        topic = request.topic,
        tone = request.tone,
        audience = request.target_audience,
    );

    StageTask {
        stage: Stage::Write,
        description,
        expected_output,
        search_query: None,
    }
}
