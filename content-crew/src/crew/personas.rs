//! The four fixed personas, one per stage

use crate::crew::types::Stage;
use crate::tools::ToolKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Persona {
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
    pub tools: &'static [ToolKind],
}

pub const RESEARCHER: Persona = Persona {
    role: "Research Specialist",
    goal: "Gather comprehensive, accurate information on assigned topics",
    backstory: "You are an expert researcher with a talent for finding relevant, \
accurate, and engaging information. You have years of experience researching \
various topics and know how to identify credible sources and key insights.",
    tools: &[ToolKind::Search, ToolKind::Scrape],
};

pub const CONTENT_WRITER: Persona = Persona {
    role: "Content Writer",
    goal: "Create engaging, informative content based on research",
    backstory: "You are a skilled writer with experience creating compelling blog posts \
and marketing materials. You know how to structure content for readability and engagement, \
and you have a knack for adapting your tone to different audiences and purposes.",
    tools: &[],
};

pub const EDITOR: Persona = Persona {
    role: "Content Editor",
    goal: "Refine and polish content for clarity, accuracy, and engagement",
    backstory: "You are a meticulous editor with an eye for detail and a commitment to quality. \
You can spot inconsistencies, awkward phrasing, and factual errors, and you know how to \
improve content without losing the writer's voice.",
    tools: &[],
};

pub const SEO_SPECIALIST: Persona = Persona {
    role: "SEO Specialist",
    goal: "Optimize content for search engines while maintaining readability",
    backstory: "You are an SEO expert who understands how to make content discoverable \
without sacrificing quality. You know the latest SEO best practices and can identify \
valuable keywords and optimization opportunities.",
    tools: &[ToolKind::Search],
};

impl Persona {
    pub fn uses(&self, tool: ToolKind) -> bool {
        self.tools.contains(&tool)
    }

    pub fn system_prompt(&self) -> String {
        format!(
            "You are {role}. {backstory}\n\nYour personal goal is: {goal}\n\n\
Work only from the task, context and tool observations you are given. \
Respond with your final answer only.",
            role = self.role,
            backstory = self.backstory,
            goal = self.goal,
        )
    }
}

impl Stage {
    pub fn persona(&self) -> &'static Persona {
        match self {
            Stage::Research => &RESEARCHER,
            Stage::Write => &CONTENT_WRITER,
            Stage::Edit => &EDITOR,
            Stage::Optimize => &SEO_SPECIALIST,
        }
    }
}
