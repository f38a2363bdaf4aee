//! Tool names and structured tool-call requests.

use crate::error::{LeoError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Every tool the content adapter can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    ListBooks,
    ReadBook,
    GetBookDetails,
    CreateBook,
    UpdateBook,
    DeleteBook,
    ListChapters,
    GetChapterDetails,
    CreateChapter,
    UpdateChapter,
    DeleteChapter,
    ListPages,
    GetPageContent,
    CreatePage,
    UpdatePage,
    DeletePage,
    GeneratePageImage,
}

impl ToolName {
    pub const ALL: [ToolName; 17] = [
        ToolName::ListBooks,
        ToolName::ReadBook,
        ToolName::GetBookDetails,
        ToolName::CreateBook,
        ToolName::UpdateBook,
        ToolName::DeleteBook,
        ToolName::ListChapters,
        ToolName::GetChapterDetails,
        ToolName::CreateChapter,
        ToolName::UpdateChapter,
        ToolName::DeleteChapter,
        ToolName::ListPages,
        ToolName::GetPageContent,
        ToolName::CreatePage,
        ToolName::UpdatePage,
        ToolName::DeletePage,
        ToolName::GeneratePageImage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::ListBooks => "list_books",
            ToolName::ReadBook => "read_book",
            ToolName::GetBookDetails => "get_book_details",
            ToolName::CreateBook => "create_book",
            ToolName::UpdateBook => "update_book",
            ToolName::DeleteBook => "delete_book",
            ToolName::ListChapters => "list_chapters",
            ToolName::GetChapterDetails => "get_chapter_details",
            ToolName::CreateChapter => "create_chapter",
            ToolName::UpdateChapter => "update_chapter",
            ToolName::DeleteChapter => "delete_chapter",
            ToolName::ListPages => "list_pages",
            ToolName::GetPageContent => "get_page_content",
            ToolName::CreatePage => "create_page",
            ToolName::UpdatePage => "update_page",
            ToolName::DeletePage => "delete_page",
            ToolName::GeneratePageImage => "generate_page_image",
        }
    }
}

impl std::str::FromStr for ToolName {
    type Err = LeoError;

    fn from_str(s: &str) -> Result<Self> {
        ToolName::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| LeoError::InvalidInput(format!("Unknown tool: {}", s)))
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured request to run one tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ToolCall {
    /// List all published books.
    ListBooks,

    /// Fetch all books so the model can summarize one.
    ReadBook,

    GetBookDetails { book_id: u64 },

    CreateBook {
        title: String,
        learning_outcome: String,
        reading_level: String,
    },

    UpdateBook {
        book_id: u64,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        learning_outcome: Option<String>,
        #[serde(default)]
        reading_level: Option<String>,
    },

    DeleteBook { book_id: u64 },

    ListChapters { book_id: u64 },

    GetChapterDetails { book_id: u64, chapter_id: u64 },

    CreateChapter {
        book_id: u64,
        title: String,
        description: String,
    },

    UpdateChapter {
        book_id: u64,
        chapter_id: u64,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },

    DeleteChapter { book_id: u64, chapter_id: u64 },

    ListPages { book_id: u64, chapter_id: u64 },

    GetPageContent {
        book_id: u64,
        chapter_id: u64,
        page_id: u64,
    },

    CreatePage {
        book_id: u64,
        chapter_id: u64,
        content: String,
    },

    /// Update the page at a 1-based position within the chapter.
    UpdatePage {
        book_id: u64,
        chapter_id: u64,
        page_number: u32,
        #[serde(default)]
        content: Option<String>,
    },

    /// Delete the page at a 1-based position within the chapter.
    DeletePage {
        book_id: u64,
        chapter_id: u64,
        page_number: u32,
    },

    GeneratePageImage {
        book_id: u64,
        chapter_id: u64,
        page_id: u64,
    },
}

impl ToolCall {
    pub fn name(&self) -> ToolName {
        match self {
            ToolCall::ListBooks => ToolName::ListBooks,
            ToolCall::ReadBook => ToolName::ReadBook,
            ToolCall::GetBookDetails { .. } => ToolName::GetBookDetails,
            ToolCall::CreateBook { .. } => ToolName::CreateBook,
            ToolCall::UpdateBook { .. } => ToolName::UpdateBook,
            ToolCall::DeleteBook { .. } => ToolName::DeleteBook,
            ToolCall::ListChapters { .. } => ToolName::ListChapters,
            ToolCall::GetChapterDetails { .. } => ToolName::GetChapterDetails,
            ToolCall::CreateChapter { .. } => ToolName::CreateChapter,
            ToolCall::UpdateChapter { .. } => ToolName::UpdateChapter,
            ToolCall::DeleteChapter { .. } => ToolName::DeleteChapter,
            ToolCall::ListPages { .. } => ToolName::ListPages,
            ToolCall::GetPageContent { .. } => ToolName::GetPageContent,
            ToolCall::CreatePage { .. } => ToolName::CreatePage,
            ToolCall::UpdatePage { .. } => ToolName::UpdatePage,
            ToolCall::DeletePage { .. } => ToolName::DeletePage,
            ToolCall::GeneratePageImage { .. } => ToolName::GeneratePageImage,
        }
    }
}

/// Parse a tool call from a name and its JSON-encoded arguments.
///
/// An empty argument string is treated as `{}`.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let tool: ToolName = name.parse()?;

    let args: Value = if arguments.trim().is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_str(arguments)
            .map_err(|e| LeoError::InvalidInput(format!("Invalid tool arguments: {}", e)))?
    };

    parse_tool_value(tool, args)
}

/// Parse a tool call from a name and already-decoded arguments.
pub fn parse_tool_value(tool: ToolName, args: Value) -> Result<ToolCall> {
    let mut object = match args {
        Value::Object(map) => map,
        Value::Null => Default::default(),
        other => {
            return Err(LeoError::InvalidInput(format!(
                "Tool arguments must be a JSON object, got: {}",
                other
            )))
        }
    };
    object.insert("name".to_string(), Value::String(tool.as_str().to_string()));

    serde_json::from_value(Value::Object(object))
        .map_err(|e| LeoError::InvalidInput(format!("Invalid arguments for {}: {}", tool, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_update_page() {
        let call = parse_tool_call(
            "update_page",
            r#"{"book_id": 1, "chapter_id": 2, "page_number": 3, "content": "Hello"}"#,
        )
        .unwrap();
        assert_eq!(
            call,
            ToolCall::UpdatePage {
                book_id: 1,
                chapter_id: 2,
                page_number: 3,
                content: Some("Hello".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_optional_fields_default_to_none() {
        let call = parse_tool_call("update_book", r#"{"book_id": 4}"#).unwrap();
        match call {
            ToolCall::UpdateBook {
                book_id,
                title,
                learning_outcome,
                reading_level,
            } => {
                assert_eq!(book_id, 4);
                assert!(title.is_none() && learning_outcome.is_none() && reading_level.is_none());
            }
            _ => panic!("Expected UpdateBook"),
        }
    }

    #[test]
    fn test_parse_no_argument_tool() {
        assert_eq!(parse_tool_call("list_books", "").unwrap(), ToolCall::ListBooks);
        assert_eq!(parse_tool_call("read_book", "{}").unwrap(), ToolCall::ReadBook);
    }

    #[test]
    fn test_unknown_tool() {
        let err = parse_tool_call("format_disk", "{}").unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Unknown tool: format_disk");
    }

    #[test]
    fn test_missing_required_argument() {
        let err = parse_tool_call("delete_chapter", r#"{"book_id": 1}"#).unwrap_err();
        assert!(err.to_string().contains("chapter_id"));
    }

    #[test]
    fn test_name_roundtrips_through_str() {
        for tool in ToolName::ALL {
            assert_eq!(tool.as_str().parse::<ToolName>().unwrap(), tool);
        }
    }
}
