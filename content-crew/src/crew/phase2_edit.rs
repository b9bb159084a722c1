//! Stage 3: Edit

use crate::crew::types::{ContentRequest, Stage, StageTask};

pub fn task(request: &ContentRequest) -> StageTask {
    let description = format!(
        r#"Edit and refine the {content_type} content about {topic}.

Check for:
1. Clarity and coherence
2. Grammar and spelling errors
3. Factual accuracy
4. Appropriate tone for {audience}
5. Logical flow and structure

Make necessary improvements while preserving the writer's voice and the key messages.
Provide specific feedback on what was changed and why."#,
        content_type = request.content_type,
        topic = request.topic,
        audience = request.target_audience,
    );

    let expected_output = format!(
        "A polished and refined version of the {content_type} content \
with improved clarity, grammar, accuracy, tone, and structure. The output should include \
both the edited content and specific feedback on the changes made.",
        content_type = request.content_type,
    );

    StageTask {
        stage: Stage::Edit,
        description,
        expected_output,
        search_query: None,
    }
}
