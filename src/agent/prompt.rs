//! System message composition.

use super::profile::{AgentKind, StateField};
use crate::config::Prompts;
use crate::tools::{ConversationState, TodoStatus, READING_LEVELS};
use std::collections::HashMap;

fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).map(str::trim).filter(|v| !v.is_empty())
}

/// Build the system message an agent runs with.
///
/// Only the state fields in the agent's profile are consulted.
pub fn compose_system_message(
    kind: AgentKind,
    prompts: &Prompts,
    state: &ConversationState,
) -> String {
    let profile = kind.profile();

    let mut vars = HashMap::new();
    vars.insert(
        "reading_levels".to_string(),
        READING_LEVELS
            .iter()
            .map(|level| format!("`\"{}\"`", level))
            .collect::<Vec<_>>()
            .join(", "),
    );
    let mut message = prompts.render_with_custom(&kind.prompt(prompts).system, &vars);

    if profile.reads(StateField::ReadingPosition) {
        match (present(state.book_id.as_ref()), present(state.chapter_id.as_ref())) {
            (Some(book), Some(chapter)) => message.push_str(&format!(
                "\n\nThe student is currently reading Book ID: {}, Chapter ID: {}",
                book, chapter
            )),
            (Some(book), None) => message.push_str(&format!(
                "\n\nThe student is currently reading Book ID: {}",
                book
            )),
            (None, Some(chapter)) => message.push_str(&format!(
                "\n\nThe student is currently reading Chapter ID: {}",
                chapter
            )),
            (None, None) => {}
        }
    }

    if profile.reads(StateField::Todos) {
        if let Some(todos) = state.todos.as_ref().filter(|t| !t.is_empty()) {
            message.push_str("\n\n## Task Checklist");
            for todo in todos {
                let line = match todo.status {
                    TodoStatus::Completed => format!("\n- [x] {}", todo.content),
                    TodoStatus::InProgress => format!("\n- [ ] {} (in progress)", todo.content),
                    TodoStatus::Pending => format!("\n- [ ] {}", todo.content),
                };
                message.push_str(&line);
            }
        }
    }

    if profile.reads(StateField::PageContext) {
        let lines = state
            .page_context
            .as_ref()
            .map(|ctx| ctx.lines())
            .unwrap_or_default();
        if !lines.is_empty() {
            message.push_str("\n\n## Current Page Context\n");
            message.push_str(&lines.join("\n"));
        }
    }

    if profile.reads(StateField::AgentPrompt) {
        if let Some(instructions) = present(state.agent_prompt.as_ref()) {
            message.push_str(&format!(
                "\n\nHere are additional instructions provided by the developer:\n\
                 <DEVELOPER_INSTRUCTIONS>\n{}\n</DEVELOPER_INSTRUCTIONS>",
                instructions
            ));
        }
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{PageContext, TodoItem};

    #[test]
    fn test_student_reading_position() {
        let state = ConversationState {
            book_id: Some("7".to_string()),
            chapter_id: Some("3".to_string()),
            ..ConversationState::default()
        };
        let message = compose_system_message(AgentKind::Student, &Prompts::default(), &state);
        assert!(message.ends_with("The student is currently reading Book ID: 7, Chapter ID: 3"));
    }

    #[test]
    fn test_reading_levels_rendered() {
        let message = compose_system_message(
            AgentKind::Leo,
            &Prompts::default(),
            &ConversationState::default(),
        );
        assert!(message.contains("`\"7th grade\"`, `\"8th grade\"`"));
        assert!(!message.contains("{{reading_levels}}"));
    }

    #[test]
    fn test_developer_instructions_wrapped() {
        let state = ConversationState {
            agent_prompt: Some("You are Leo.".to_string()),
            ..ConversationState::default()
        };
        let message = compose_system_message(AgentKind::LeoStudent, &Prompts::default(), &state);
        assert!(message.ends_with("<DEVELOPER_INSTRUCTIONS>\nYou are Leo.\n</DEVELOPER_INSTRUCTIONS>"));
    }

    #[test]
    fn test_blank_developer_prompt_omitted() {
        let state = ConversationState {
            agent_prompt: Some("  ".to_string()),
            ..ConversationState::default()
        };
        let message = compose_system_message(AgentKind::Leo, &Prompts::default(), &state);
        assert!(!message.contains("DEVELOPER_INSTRUCTIONS"));
    }

    #[test]
    fn test_checklist_and_page_context_only_for_leo() {
        let state = ConversationState {
            todos: Some(vec![
                TodoItem {
                    content: "Outline".to_string(),
                    status: TodoStatus::Completed,
                },
                TodoItem {
                    content: "Write chapter 1".to_string(),
                    status: TodoStatus::InProgress,
                },
            ]),
            page_context: Some(PageContext {
                page_name: Some("Book editor".to_string()),
                resource_type: Some("Book".to_string()),
                ..PageContext::default()
            }),
            ..ConversationState::default()
        };

        let leo = compose_system_message(AgentKind::Leo, &Prompts::default(), &state);
        assert!(leo.contains("## Task Checklist\n- [x] Outline\n- [ ] Write chapter 1 (in progress)"));
        assert!(leo.contains("## Current Page Context\n- Page Name: Book editor\n- Resource Type: Book"));

        let student = compose_system_message(AgentKind::Student, &Prompts::default(), &state);
        assert!(!student.contains("Task Checklist"));
        assert!(!student.contains("Current Page Context"));
    }
}
