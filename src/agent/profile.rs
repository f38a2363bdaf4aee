//! Agent profiles.
//!
//! The agents share one control loop, owned by the host framework. What sets
//! them apart is a system prompt, the tools they may call and the parts of
//! the conversation state they read.

use crate::config::{AgentPrompt, Prompts};
use crate::tools::ToolName;
use serde::{Deserialize, Serialize};

/// The available agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Book authoring assistant.
    #[default]
    Leo,
    /// Authoring assistant used from the student-facing app.
    LeoStudent,
    /// Read-only reading companion for students.
    Student,
}

/// Conversation state fields an agent reads when building its prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateField {
    AgentPrompt,
    Todos,
    PageContext,
    ReadingPosition,
}

/// Prompt template, tool subset and state schema of one agent.
#[derive(Debug, Clone, Copy)]
pub struct AgentProfile {
    pub kind: AgentKind,
    pub tools: &'static [ToolName],
    pub state: &'static [StateField],
}

const AUTHORING_TOOLS: &[ToolName] = &[
    ToolName::ListBooks,
    ToolName::CreateBook,
    ToolName::CreateChapter,
    ToolName::CreatePage,
    ToolName::GeneratePageImage,
    ToolName::DeleteBook,
    ToolName::DeleteChapter,
    ToolName::DeletePage,
    ToolName::UpdateBook,
    ToolName::UpdateChapter,
    ToolName::UpdatePage,
    ToolName::ListChapters,
    ToolName::ListPages,
];

const LEO_TOOLS: &[ToolName] = &[
    ToolName::ReadBook,
    ToolName::ListBooks,
    ToolName::CreateBook,
    ToolName::CreateChapter,
    ToolName::CreatePage,
    ToolName::GeneratePageImage,
    ToolName::DeleteBook,
    ToolName::DeleteChapter,
    ToolName::DeletePage,
    ToolName::UpdateBook,
    ToolName::UpdateChapter,
    ToolName::UpdatePage,
    ToolName::ListChapters,
    ToolName::ListPages,
];

const READING_TOOLS: &[ToolName] = &[
    ToolName::GetBookDetails,
    ToolName::ListChapters,
    ToolName::GetChapterDetails,
    ToolName::ListPages,
    ToolName::GetPageContent,
];

impl AgentKind {
    pub const ALL: [AgentKind; 3] = [AgentKind::Leo, AgentKind::LeoStudent, AgentKind::Student];

    pub fn profile(&self) -> AgentProfile {
        match self {
            AgentKind::Leo => AgentProfile {
                kind: *self,
                tools: LEO_TOOLS,
                state: &[
                    StateField::AgentPrompt,
                    StateField::Todos,
                    StateField::PageContext,
                ],
            },
            AgentKind::LeoStudent => AgentProfile {
                kind: *self,
                tools: AUTHORING_TOOLS,
                state: &[StateField::AgentPrompt],
            },
            AgentKind::Student => AgentProfile {
                kind: *self,
                tools: READING_TOOLS,
                state: &[StateField::AgentPrompt, StateField::ReadingPosition],
            },
        }
    }

    /// Graph name used by the host framework.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Leo => "leo",
            AgentKind::LeoStudent => "leo-student",
            AgentKind::Student => "student",
        }
    }

    /// The prompt template for this agent.
    pub fn prompt<'a>(&self, prompts: &'a Prompts) -> &'a AgentPrompt {
        match self {
            AgentKind::Leo => &prompts.leo,
            AgentKind::LeoStudent => &prompts.leo_student,
            AgentKind::Student => &prompts.student,
        }
    }
}

impl AgentProfile {
    /// Whether the agent may call this tool.
    pub fn allows(&self, tool: ToolName) -> bool {
        self.tools.contains(&tool)
    }

    /// Whether the agent reads this part of the conversation state.
    pub fn reads(&self, field: StateField) -> bool {
        self.state.contains(&field)
    }
}

impl std::str::FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "leo" => Ok(AgentKind::Leo),
            "leo-student" | "leo_student" => Ok(AgentKind::LeoStudent),
            "student" => Ok(AgentKind::Student),
            _ => Err(format!("Unknown agent: {}", s)),
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_is_read_only() {
        let profile = AgentKind::Student.profile();
        assert!(profile.allows(ToolName::GetPageContent));
        assert!(!profile.allows(ToolName::DeleteBook));
        assert!(!profile.allows(ToolName::UpdatePage));
    }

    #[test]
    fn test_authoring_agents_share_crud_tools() {
        for tool in AUTHORING_TOOLS {
            assert!(AgentKind::Leo.profile().allows(*tool));
            assert!(AgentKind::LeoStudent.profile().allows(*tool));
        }
        assert!(AgentKind::Leo.profile().allows(ToolName::ReadBook));
        assert!(!AgentKind::LeoStudent.profile().allows(ToolName::ReadBook));
    }

    #[test]
    fn test_parse_agent_names() {
        assert_eq!("leo-student".parse::<AgentKind>().unwrap(), AgentKind::LeoStudent);
        assert_eq!("leo_student".parse::<AgentKind>().unwrap(), AgentKind::LeoStudent);
        assert_eq!("Student".parse::<AgentKind>().unwrap(), AgentKind::Student);
        assert!("narrator".parse::<AgentKind>().is_err());
    }

    #[test]
    fn test_only_leo_reads_todos() {
        assert!(AgentKind::Leo.profile().reads(StateField::Todos));
        assert!(!AgentKind::Student.profile().reads(StateField::Todos));
        assert!(AgentKind::Student.profile().reads(StateField::ReadingPosition));
    }
}
