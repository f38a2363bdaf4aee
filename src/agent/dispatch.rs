//! Tool-call dispatch for a model binding.
//!
//! The host's reasoning node emits tool calls; the dispatcher runs them
//! against the content tools, restricted to the agent's tool subset, and
//! hands back tool messages for the conversation.

use super::profile::AgentKind;
use crate::error::{ErrorKind, LeoError, Result};
use crate::tools::{
    parse_tool_call, render_outcome, tool_definitions, ContentTools, ConversationState,
    ToolEnvelope,
};
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestMessage,
    ChatCompletionRequestToolMessageArgs, ChatCompletionTool,
};
use futures::future::join_all;
use tracing::{info, warn};

/// Runs tool calls on behalf of one agent.
#[derive(Clone)]
pub struct ToolDispatcher {
    tools: ContentTools,
    agent: AgentKind,
}

impl ToolDispatcher {
    pub fn new(tools: ContentTools, agent: AgentKind) -> Self {
        Self { tools, agent }
    }

    pub fn agent(&self) -> AgentKind {
        self.agent
    }

    /// Tool definitions to bind to the model.
    pub fn definitions(&self) -> Vec<ChatCompletionTool> {
        tool_definitions(self.agent.profile().tools)
    }

    /// Parse, authorize and run one call given by name and JSON arguments.
    pub async fn call(
        &self,
        name: &str,
        arguments: &str,
        state: &ConversationState,
    ) -> Result<ToolEnvelope> {
        let call = parse_tool_call(name, arguments)?;

        if !self.agent.profile().allows(call.name()) {
            return Err(LeoError::InvalidInput(format!(
                "Tool {} is not available to the {} agent",
                call.name(),
                self.agent
            )));
        }

        self.tools.execute(&call, state).await
    }

    /// Execute a single model tool call and return a record of it.
    pub async fn dispatch(
        &self,
        tool_call: &ChatCompletionMessageToolCall,
        state: &ConversationState,
    ) -> ToolCallRecord {
        let name = &tool_call.function.name;
        let arguments = &tool_call.function.arguments;

        info!("Agent {} calling tool: {} with args: {}", self.agent, name, arguments);

        let outcome = self.call(name, arguments, state).await;
        if let Err(e) = &outcome {
            warn!("Tool {} failed: {}", name, e);
        }

        ToolCallRecord {
            id: tool_call.id.clone(),
            name: name.clone(),
            arguments: arguments.clone(),
            error_kind: outcome.as_ref().err().map(LeoError::kind),
            result: render_outcome(&outcome),
        }
    }

    /// Execute all tool calls of one model turn concurrently.
    ///
    /// Records are returned in the order of `tool_calls`.
    pub async fn dispatch_all(
        &self,
        tool_calls: &[ChatCompletionMessageToolCall],
        state: &ConversationState,
    ) -> Vec<ToolCallRecord> {
        join_all(tool_calls.iter().map(|call| self.dispatch(call, state))).await
    }
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// ID the model gave the call.
    pub id: String,
    /// Name of the tool called.
    pub name: String,
    /// JSON arguments passed to the tool.
    pub arguments: String,
    /// Set when the call failed.
    pub error_kind: Option<ErrorKind>,
    /// Envelope JSON, or the error text.
    pub result: String,
}

impl ToolCallRecord {
    pub fn is_error(&self) -> bool {
        self.error_kind.is_some()
    }

    /// Tool message answering this call.
    pub fn to_message(&self) -> Result<ChatCompletionRequestMessage> {
        let message = ChatCompletionRequestToolMessageArgs::default()
            .tool_call_id(&self.id)
            .content(self.result.clone())
            .build()
            .map_err(|e| LeoError::Agent(e.to_string()))?;
        Ok(message.into())
    }
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryContentApi;
    use async_openai::types::{ChatCompletionToolType, FunctionCall};
    use std::sync::Arc;

    fn tool_call(id: &str, name: &str, arguments: &str) -> ChatCompletionMessageToolCall {
        ChatCompletionMessageToolCall {
            id: id.to_string(),
            r#type: ChatCompletionToolType::Function,
            function: FunctionCall {
                name: name.to_string(),
                arguments: arguments.to_string(),
            },
        }
    }

    fn dispatcher(agent: AgentKind) -> (Arc<MemoryContentApi>, ToolDispatcher) {
        let api = Arc::new(MemoryContentApi::new().with_recording());
        let dispatcher = ToolDispatcher::new(ContentTools::new(api.clone()), agent);
        (api, dispatcher)
    }

    #[test]
    fn test_tool_call_record_display() {
        let record = ToolCallRecord {
            id: "call_1".to_string(),
            name: "list_chapters".to_string(),
            arguments: r#"{"book_id": 7}"#.to_string(),
            error_kind: None,
            result: "{}".to_string(),
        };
        assert_eq!(format!("{}", record), r#"list_chapters({"book_id": 7})"#);
    }

    #[tokio::test]
    async fn test_student_cannot_delete() {
        let (api, dispatcher) = dispatcher(AgentKind::Student);
        let book = api.seed_book("Kept");

        let record = dispatcher
            .dispatch(
                &tool_call("call_1", "delete_book", &format!(r#"{{"book_id": {}}}"#, book)),
                &ConversationState::with_token("token"),
            )
            .await;

        assert_eq!(record.error_kind, Some(ErrorKind::Validation));
        assert!(record.result.contains("not available to the student agent"));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_dispatch_all_keeps_order() {
        let (api, dispatcher) = dispatcher(AgentKind::Student);
        let book = api.seed_book("The Cyborg Llama");
        api.seed_chapter(book, "Arrival");

        let calls = vec![
            tool_call("a", "get_book_details", &format!(r#"{{"book_id": {}}}"#, book)),
            tool_call("b", "list_chapters", "not json"),
            tool_call("c", "list_chapters", &format!(r#"{{"book_id": {}}}"#, book)),
        ];
        let records = dispatcher
            .dispatch_all(&calls, &ConversationState::with_token("token"))
            .await;

        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(!records[0].is_error());
        assert!(records[0].result.contains("The Cyborg Llama"));
        assert!(records[1].result.starts_with("Error: Invalid input: Invalid tool arguments"));
        assert!(records[2].result.contains("Arrival"));

        for record in &records {
            assert!(record.to_message().is_ok());
        }
    }

    #[test]
    fn test_definitions_match_profile() {
        let (_, dispatcher) = dispatcher(AgentKind::Student);
        assert_eq!(
            dispatcher.definitions().len(),
            AgentKind::Student.profile().tools.len()
        );
    }
}
