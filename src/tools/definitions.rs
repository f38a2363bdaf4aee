//! Schema descriptions of the tools, as advertised to a model binding.

use super::ToolName;
use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};
use serde_json::{json, Value};

/// Reading levels a book may carry.
pub const READING_LEVELS: [&str; 6] = [
    "7th grade",
    "8th grade",
    "9th grade",
    "10th grade",
    "11th grade",
    "12th grade",
];

/// Name, description and JSON Schema of one tool.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: ToolName,
    pub description: &'static str,
    pub parameters: Value,
}

fn id(what: &str) -> Value {
    json!({"type": "integer", "description": format!("ID of the {}", what)})
}

fn text(description: &str) -> Value {
    json!({"type": "string", "description": description})
}

fn page_number() -> Value {
    json!({
        "type": "integer",
        "minimum": 1,
        "description": "Position of the page in the chapter; page_number=1 is the first page"
    })
}

fn reading_level() -> Value {
    json!({
        "type": "string",
        "enum": READING_LEVELS,
        "description": "Reading level; pick the closest grade if the user's does not match"
    })
}

fn object(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

/// Describe one tool.
pub fn tool_spec(name: ToolName) -> ToolSpec {
    let (description, parameters) = match name {
        ToolName::ListBooks => (
            "Lists all available published books that can be read.",
            object(json!({}), &[]),
        ),
        ToolName::ReadBook => (
            "Read the contents of the books, give back a summary of the book.",
            object(json!({}), &[]),
        ),
        ToolName::GetBookDetails => (
            "Get details about a specific book including its title, learning outcome, and \
             reading level. Use this to understand the context of what the student is reading.",
            object(json!({"book_id": id("book")}), &["book_id"]),
        ),
        ToolName::CreateBook => (
            "Creates a new book with the given title, learning outcome, and reading level. \
             Returns the created book object, including its ID.",
            object(
                json!({
                    "title": text("Title of the book"),
                    "learning_outcome": text("What the reader should learn"),
                    "reading_level": reading_level()
                }),
                &["title", "learning_outcome", "reading_level"],
            ),
        ),
        ToolName::UpdateBook => (
            "Updates a book's attributes (title, learning outcome, reading level). \
             Any combination of these fields may be provided.",
            object(
                json!({
                    "book_id": id("book"),
                    "title": text("New title"),
                    "learning_outcome": text("New learning outcome"),
                    "reading_level": reading_level()
                }),
                &["book_id"],
            ),
        ),
        ToolName::DeleteBook => (
            "Deletes a specific book by ID.",
            object(json!({"book_id": id("book")}), &["book_id"]),
        ),
        ToolName::ListChapters => (
            "Lists all chapters for the given book ID.",
            object(json!({"book_id": id("book")}), &["book_id"]),
        ),
        ToolName::GetChapterDetails => (
            "Get details about a specific chapter including its title and description.",
            object(
                json!({"book_id": id("book"), "chapter_id": id("chapter")}),
                &["book_id", "chapter_id"],
            ),
        ),
        ToolName::CreateChapter => (
            "Creates a new chapter for a given book. Returns the created chapter object, \
             including its ID.",
            object(
                json!({
                    "book_id": id("book"),
                    "title": text("Title of the chapter"),
                    "description": text("Short description of the chapter")
                }),
                &["book_id", "title", "description"],
            ),
        ),
        ToolName::UpdateChapter => (
            "Updates a specific chapter by ID within a book. Only provided fields \
             (title, description) will be updated.",
            object(
                json!({
                    "book_id": id("book"),
                    "chapter_id": id("chapter"),
                    "title": text("New title"),
                    "description": text("New description")
                }),
                &["book_id", "chapter_id"],
            ),
        ),
        ToolName::DeleteChapter => (
            "Deletes a specific chapter by ID within a book.",
            object(
                json!({"book_id": id("book"), "chapter_id": id("chapter")}),
                &["book_id", "chapter_id"],
            ),
        ),
        ToolName::ListPages => (
            "Lists all pages within a given chapter, in reading order.",
            object(
                json!({"book_id": id("book"), "chapter_id": id("chapter")}),
                &["book_id", "chapter_id"],
            ),
        ),
        ToolName::GetPageContent => (
            "Get the content of a specific page. Use this to reference exact text when \
             answering questions.",
            object(
                json!({
                    "book_id": id("book"),
                    "chapter_id": id("chapter"),
                    "page_id": id("page")
                }),
                &["book_id", "chapter_id", "page_id"],
            ),
        ),
        ToolName::CreatePage => (
            "Creates a new page within a given chapter. Returns the created page object.",
            object(
                json!({
                    "book_id": id("book"),
                    "chapter_id": id("chapter"),
                    "content": text("Text of the page")
                }),
                &["book_id", "chapter_id", "content"],
            ),
        ),
        ToolName::UpdatePage => (
            "Updates a specific page by its position (page number) within a chapter. \
             Page numbers start at 1. Only provided fields (content) will be updated.",
            object(
                json!({
                    "book_id": id("book"),
                    "chapter_id": id("chapter"),
                    "page_number": page_number(),
                    "content": text("New text of the page")
                }),
                &["book_id", "chapter_id", "page_number"],
            ),
        ),
        ToolName::DeletePage => (
            "Deletes a specific page by its position (page number) within a chapter. \
             Page numbers start at 1.",
            object(
                json!({
                    "book_id": id("book"),
                    "chapter_id": id("chapter"),
                    "page_number": page_number()
                }),
                &["book_id", "chapter_id", "page_number"],
            ),
        ),
        ToolName::GeneratePageImage => (
            "Generates an image for a specific page based on its content and the book's context.",
            object(
                json!({
                    "book_id": id("book"),
                    "chapter_id": id("chapter"),
                    "page_id": id("page")
                }),
                &["book_id", "chapter_id", "page_id"],
            ),
        ),
    };

    ToolSpec {
        name,
        description,
        parameters,
    }
}

/// Get OpenAI function/tool definitions for a set of tools.
pub fn tool_definitions(tools: &[ToolName]) -> Vec<ChatCompletionTool> {
    tools
        .iter()
        .map(|tool| {
            let spec = tool_spec(*tool);
            ChatCompletionTool {
                r#type: ChatCompletionToolType::Function,
                function: FunctionObject {
                    name: spec.name.as_str().to_string(),
                    description: Some(spec.description.to_string()),
                    parameters: Some(spec.parameters),
                    strict: None,
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tool_has_object_schema() {
        for tool in ToolName::ALL {
            let spec = tool_spec(tool);
            assert_eq!(spec.parameters["type"], "object", "{}", tool);
            assert!(!spec.description.is_empty());
        }
    }

    #[test]
    fn test_update_requires_only_identifiers() {
        let spec = tool_spec(ToolName::UpdatePage);
        assert_eq!(
            spec.parameters["required"],
            json!(["book_id", "chapter_id", "page_number"])
        );
    }

    #[test]
    fn test_reading_level_enum() {
        let spec = tool_spec(ToolName::CreateBook);
        assert_eq!(
            spec.parameters["properties"]["reading_level"]["enum"][0],
            "7th grade"
        );
    }

    #[test]
    fn test_definitions_follow_requested_order() {
        let defs = tool_definitions(&[ToolName::ListPages, ToolName::GetBookDetails]);
        let names: Vec<_> = defs.iter().map(|d| d.function.name.as_str()).collect();
        assert_eq!(names, vec!["list_pages", "get_book_details"]);
    }
}
