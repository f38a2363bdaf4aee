//! Conversation state handed to every tool call.

use crate::api::Credential;
use crate::error::{LeoError, Result};
use serde::{Deserialize, Serialize};

/// State supplied by the host for one conversation turn.
///
/// Tools only read the credential. The remaining fields feed the system
/// prompt and are never written back by a tool.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationState {
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
    /// Free-text instructions from the embedding application's developer.
    pub agent_prompt: Option<String>,
    /// Task checklist, carried by the authoring agent only.
    pub todos: Option<Vec<TodoItem>>,
    /// Where the user is in the host application.
    pub page_context: Option<PageContext>,
    /// Book the student is reading.
    pub book_id: Option<String>,
    /// Chapter the student is reading.
    pub chapter_id: Option<String>,
}

impl ConversationState {
    /// State carrying only a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            api_token: Some(token.into()),
            ..Self::default()
        }
    }

    /// The credential, or [`LeoError::MissingCredential`] if absent or blank.
    pub fn credential(&self) -> Result<Credential> {
        self.api_token
            .clone()
            .and_then(Credential::new)
            .ok_or(LeoError::MissingCredential)
    }
}

impl std::fmt::Debug for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationState")
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .field("agent_prompt", &self.agent_prompt)
            .field("todos", &self.todos)
            .field("page_context", &self.page_context)
            .field("book_id", &self.book_id)
            .field("chapter_id", &self.chapter_id)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// One entry of the task checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub content: String,
    #[serde(default)]
    pub status: TodoStatus,
}

/// Description of the screen the user is on, sent by the frontend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageContext {
    pub page_name: Option<String>,
    pub action: Option<String>,
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub parent_resource_type: Option<String>,
    pub parent_resource_id: Option<String>,
    pub page_title: Option<String>,
}

impl PageContext {
    /// Labelled lines for every present, non-blank field.
    pub fn lines(&self) -> Vec<String> {
        [
            ("Page Name", &self.page_name),
            ("Action", &self.action),
            ("Resource Type", &self.resource_type),
            ("Resource ID", &self.resource_id),
            ("Parent Resource Type", &self.parent_resource_type),
            ("Parent Resource ID", &self.parent_resource_id),
            ("Page Title", &self.page_title),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| format!("- {}: {}", label, v))
        })
        .collect()
    }
}
