//! The content tools: one method per CRUD operation.
//!
//! Every operation checks its arguments, talks to the content API and wraps
//! the response in a [`ToolEnvelope`]. Nothing is retried; the model decides
//! what to do with a failure.

use super::resolver::resolve_page_position;
use super::{ConversationState, ToolCall, ToolEnvelope, ToolName};
use crate::api::{
    BookAttributes, ChapterAttributes, ContentApi, Credential, Endpoint, HttpMethod,
    PageAttributes, ResourcePayload,
};
use crate::error::{LeoError, Result};
use futures::future::join_all;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Tool adapter over a content API backend.
#[derive(Clone)]
pub struct ContentTools {
    api: Arc<dyn ContentApi>,
}

impl ContentTools {
    pub fn new(api: Arc<dyn ContentApi>) -> Self {
        Self { api }
    }

    /// Run one tool call.
    ///
    /// The credential is checked here, once, before anything else; without it
    /// no request is made.
    pub async fn execute(&self, call: &ToolCall, state: &ConversationState) -> Result<ToolEnvelope> {
        let credential = state.credential()?;
        let cred = &credential;

        info!("Running tool {}", call.name());

        match call {
            ToolCall::ListBooks => self.list_books(cred).await,
            ToolCall::ReadBook => self.read_book(cred).await,
            ToolCall::GetBookDetails { book_id } => self.get_book_details(cred, *book_id).await,
            ToolCall::CreateBook {
                title,
                learning_outcome,
                reading_level,
            } => {
                self.create_book(cred, title, learning_outcome, reading_level)
                    .await
            }
            ToolCall::UpdateBook {
                book_id,
                title,
                learning_outcome,
                reading_level,
            } => {
                self.update_book(
                    cred,
                    *book_id,
                    title.as_deref(),
                    learning_outcome.as_deref(),
                    reading_level.as_deref(),
                )
                .await
            }
            ToolCall::DeleteBook { book_id } => self.delete_book(cred, *book_id).await,
            ToolCall::ListChapters { book_id } => self.list_chapters(cred, *book_id).await,
            ToolCall::GetChapterDetails {
                book_id,
                chapter_id,
            } => self.get_chapter_details(cred, *book_id, *chapter_id).await,
            ToolCall::CreateChapter {
                book_id,
                title,
                description,
            } => self.create_chapter(cred, *book_id, title, description).await,
            ToolCall::UpdateChapter {
                book_id,
                chapter_id,
                title,
                description,
            } => {
                self.update_chapter(
                    cred,
                    *book_id,
                    *chapter_id,
                    title.as_deref(),
                    description.as_deref(),
                )
                .await
            }
            ToolCall::DeleteChapter {
                book_id,
                chapter_id,
            } => self.delete_chapter(cred, *book_id, *chapter_id).await,
            ToolCall::ListPages {
                book_id,
                chapter_id,
            } => self.list_pages(cred, *book_id, *chapter_id).await,
            ToolCall::GetPageContent {
                book_id,
                chapter_id,
                page_id,
            } => {
                self.get_page_content(cred, *book_id, *chapter_id, *page_id)
                    .await
            }
            ToolCall::CreatePage {
                book_id,
                chapter_id,
                content,
            } => self.create_page(cred, *book_id, *chapter_id, content).await,
            ToolCall::UpdatePage {
                book_id,
                chapter_id,
                page_number,
                content,
            } => {
                self.update_page(cred, *book_id, *chapter_id, *page_number, content.as_deref())
                    .await
            }
            ToolCall::DeletePage {
                book_id,
                chapter_id,
                page_number,
            } => {
                self.delete_page(cred, *book_id, *chapter_id, *page_number)
                    .await
            }
            ToolCall::GeneratePageImage {
                book_id,
                chapter_id,
                page_id,
            } => {
                self.generate_page_image(cred, *book_id, *chapter_id, *page_id)
                    .await
            }
        }
    }

    /// Run several tool calls from the same turn concurrently.
    ///
    /// Results come back in request order; the calls themselves are not
    /// ordered against each other.
    pub async fn execute_batch(
        &self,
        calls: &[ToolCall],
        state: &ConversationState,
    ) -> Vec<Result<ToolEnvelope>> {
        join_all(calls.iter().map(|call| self.execute(call, state))).await
    }

    async fn get(&self, cred: &Credential, endpoint: Endpoint) -> Result<Value> {
        self.api.request(HttpMethod::Get, &endpoint, None, cred).await
    }

    async fn send(
        &self,
        cred: &Credential,
        method: HttpMethod,
        endpoint: Endpoint,
        payload: Option<Value>,
    ) -> Result<Value> {
        self.api
            .request(method, &endpoint, payload.as_ref(), cred)
            .await
    }

    /// GET a resource for its details, then DELETE it.
    ///
    /// A failed GET does not stop the delete; the delete response is used
    /// as output instead.
    async fn fetch_then_delete(&self, cred: &Credential, endpoint: Endpoint) -> Result<Value> {
        let snapshot = match self.get(cred, endpoint.clone()).await {
            Ok(value) if value.is_object() => Some(value),
            Ok(_) => None,
            Err(e) => {
                warn!("Could not fetch {} before deleting: {}", endpoint, e);
                None
            }
        };

        let deleted = self.send(cred, HttpMethod::Delete, endpoint, None).await?;
        Ok(snapshot.unwrap_or(deleted))
    }

    // === Books ===

    pub async fn list_books(&self, cred: &Credential) -> Result<ToolEnvelope> {
        let output = self.get(cred, Endpoint::books()).await?;
        Ok(ToolEnvelope::new(ToolName::ListBooks, output))
    }

    pub async fn read_book(&self, cred: &Credential) -> Result<ToolEnvelope> {
        let output = self.get(cred, Endpoint::books()).await?;
        Ok(ToolEnvelope::new(ToolName::ReadBook, output))
    }

    pub async fn get_book_details(&self, cred: &Credential, book_id: u64) -> Result<ToolEnvelope> {
        let output = self.get(cred, Endpoint::book(book_id)).await?;
        Ok(ToolEnvelope::new(ToolName::GetBookDetails, output).arg("book_id", book_id))
    }

    pub async fn create_book(
        &self,
        cred: &Credential,
        title: &str,
        learning_outcome: &str,
        reading_level: &str,
    ) -> Result<ToolEnvelope> {
        let attrs = BookAttributes {
            title: Some(title.to_string()),
            learning_outcome: Some(learning_outcome.to_string()),
            reading_level: Some(reading_level.to_string()),
        };
        let output = self
            .send(cred, HttpMethod::Post, Endpoint::books(), Some(attrs.to_body()?))
            .await?;
        Ok(ToolEnvelope::new(ToolName::CreateBook, output).arg("title", title))
    }

    pub async fn update_book(
        &self,
        cred: &Credential,
        book_id: u64,
        title: Option<&str>,
        learning_outcome: Option<&str>,
        reading_level: Option<&str>,
    ) -> Result<ToolEnvelope> {
        let attrs = BookAttributes::changes(title, learning_outcome, reading_level);
        if attrs.is_empty() {
            return Err(LeoError::NoFieldsProvided);
        }

        let output = self
            .send(cred, HttpMethod::Put, Endpoint::book(book_id), Some(attrs.to_body()?))
            .await?;
        Ok(ToolEnvelope::new(ToolName::UpdateBook, output)
            .arg("book_id", book_id)
            .arg_if_supplied("title", title)
            .arg_if_supplied("learning_outcome", learning_outcome)
            .arg_if_supplied("reading_level", reading_level))
    }

    pub async fn delete_book(&self, cred: &Credential, book_id: u64) -> Result<ToolEnvelope> {
        let output = self.fetch_then_delete(cred, Endpoint::book(book_id)).await?;
        Ok(ToolEnvelope::new(ToolName::DeleteBook, output).arg("book_id", book_id))
    }

    // === Chapters ===

    pub async fn list_chapters(&self, cred: &Credential, book_id: u64) -> Result<ToolEnvelope> {
        let output = self.get(cred, Endpoint::chapters(book_id)).await?;
        Ok(ToolEnvelope::new(ToolName::ListChapters, output).arg("book_id", book_id))
    }

    pub async fn get_chapter_details(
        &self,
        cred: &Credential,
        book_id: u64,
        chapter_id: u64,
    ) -> Result<ToolEnvelope> {
        let output = self.get(cred, Endpoint::chapter(book_id, chapter_id)).await?;
        Ok(ToolEnvelope::new(ToolName::GetChapterDetails, output)
            .arg("book_id", book_id)
            .arg("chapter_id", chapter_id))
    }

    pub async fn create_chapter(
        &self,
        cred: &Credential,
        book_id: u64,
        title: &str,
        description: &str,
    ) -> Result<ToolEnvelope> {
        let attrs = ChapterAttributes {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
        };
        let output = self
            .send(
                cred,
                HttpMethod::Post,
                Endpoint::chapters(book_id),
                Some(attrs.to_body()?),
            )
            .await?;
        Ok(ToolEnvelope::new(ToolName::CreateChapter, output)
            .arg("book_id", book_id)
            .arg("title", title))
    }

    pub async fn update_chapter(
        &self,
        cred: &Credential,
        book_id: u64,
        chapter_id: u64,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<ToolEnvelope> {
        let attrs = ChapterAttributes::changes(title, description);
        if attrs.is_empty() {
            return Err(LeoError::NoFieldsProvided);
        }

        let output = self
            .send(
                cred,
                HttpMethod::Put,
                Endpoint::chapter(book_id, chapter_id),
                Some(attrs.to_body()?),
            )
            .await?;
        Ok(ToolEnvelope::new(ToolName::UpdateChapter, output)
            .arg("book_id", book_id)
            .arg("chapter_id", chapter_id)
            .arg_if_supplied("title", title)
            .arg_if_supplied("description", description))
    }

    pub async fn delete_chapter(
        &self,
        cred: &Credential,
        book_id: u64,
        chapter_id: u64,
    ) -> Result<ToolEnvelope> {
        let output = self
            .fetch_then_delete(cred, Endpoint::chapter(book_id, chapter_id))
            .await?;
        Ok(ToolEnvelope::new(ToolName::DeleteChapter, output)
            .arg("book_id", book_id)
            .arg("chapter_id", chapter_id))
    }

    // === Pages ===

    pub async fn list_pages(
        &self,
        cred: &Credential,
        book_id: u64,
        chapter_id: u64,
    ) -> Result<ToolEnvelope> {
        let output = self.get(cred, Endpoint::pages(book_id, chapter_id)).await?;
        Ok(ToolEnvelope::new(ToolName::ListPages, output)
            .arg("book_id", book_id)
            .arg("chapter_id", chapter_id))
    }

    pub async fn get_page_content(
        &self,
        cred: &Credential,
        book_id: u64,
        chapter_id: u64,
        page_id: u64,
    ) -> Result<ToolEnvelope> {
        let output = self
            .get(cred, Endpoint::page(book_id, chapter_id, page_id))
            .await?;
        Ok(ToolEnvelope::new(ToolName::GetPageContent, output)
            .arg("book_id", book_id)
            .arg("chapter_id", chapter_id)
            .arg("page_id", page_id))
    }

    pub async fn create_page(
        &self,
        cred: &Credential,
        book_id: u64,
        chapter_id: u64,
        content: &str,
    ) -> Result<ToolEnvelope> {
        let attrs = PageAttributes {
            content: Some(content.to_string()),
        };
        let output = self
            .send(
                cred,
                HttpMethod::Post,
                Endpoint::pages(book_id, chapter_id),
                Some(attrs.to_body()?),
            )
            .await?;
        Ok(ToolEnvelope::new(ToolName::CreatePage, output)
            .arg("book_id", book_id)
            .arg("chapter_id", chapter_id))
    }

    /// Update the page at `page_number` (1-based) in the chapter.
    pub async fn update_page(
        &self,
        cred: &Credential,
        book_id: u64,
        chapter_id: u64,
        page_number: u32,
        content: Option<&str>,
    ) -> Result<ToolEnvelope> {
        let attrs = PageAttributes::changes(content);
        if attrs.is_empty() {
            return Err(LeoError::NoFieldsProvided);
        }

        let target =
            resolve_page_position(self.api.as_ref(), cred, book_id, chapter_id, page_number)
                .await?;

        let output = self
            .send(
                cred,
                HttpMethod::Put,
                Endpoint::page(book_id, chapter_id, target.page_id),
                Some(attrs.to_body()?),
            )
            .await?;
        Ok(ToolEnvelope::new(ToolName::UpdatePage, output)
            .arg("book_id", book_id)
            .arg("chapter_id", chapter_id)
            .arg("page_number", page_number)
            .arg_if_supplied("content", content))
    }

    /// Delete the page at `page_number` (1-based) in the chapter.
    ///
    /// The output is the page as it was listed, tagged with its position.
    pub async fn delete_page(
        &self,
        cred: &Credential,
        book_id: u64,
        chapter_id: u64,
        page_number: u32,
    ) -> Result<ToolEnvelope> {
        let target =
            resolve_page_position(self.api.as_ref(), cred, book_id, chapter_id, page_number)
                .await?;
        debug!(
            "Deleting page {} of {} (ID {})",
            page_number, target.page_count, target.page_id
        );

        self.send(
            cred,
            HttpMethod::Delete,
            Endpoint::page(book_id, chapter_id, target.page_id),
            None,
        )
        .await?;

        let mut page = target.page;
        page.insert("page_number".to_string(), json!(page_number));

        Ok(ToolEnvelope::new(ToolName::DeletePage, json!({ "page": page }))
            .arg("book_id", book_id)
            .arg("chapter_id", chapter_id)
            .arg("page_number", page_number))
    }

    pub async fn generate_page_image(
        &self,
        cred: &Credential,
        book_id: u64,
        chapter_id: u64,
        page_id: u64,
    ) -> Result<ToolEnvelope> {
        let output = self
            .send(
                cred,
                HttpMethod::Post,
                Endpoint::generate_image(book_id, chapter_id, page_id),
                None,
            )
            .await?;
        Ok(ToolEnvelope::new(ToolName::GeneratePageImage, output)
            .arg("book_id", book_id)
            .arg("chapter_id", chapter_id)
            .arg("page_id", page_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MemoryContentApi, RecordedCall};
    use crate::error::ErrorKind;
    use crate::tools::render_outcome;

    fn setup() -> (Arc<MemoryContentApi>, ContentTools) {
        let api = Arc::new(MemoryContentApi::new().with_recording());
        let tools = ContentTools::new(api.clone());
        (api, tools)
    }

    fn state() -> ConversationState {
        ConversationState::with_token("token")
    }

    /// A book with one chapter of `count` pages, call log cleared.
    fn seeded(api: &MemoryContentApi, count: usize) -> (u64, u64, Vec<u64>) {
        let book = api.seed_book("Seeded");
        let chapter = api.seed_chapter(book, "Chapter");
        let pages = (0..count)
            .map(|i| api.seed_page(chapter, &format!("page {}", i + 1)))
            .collect();
        api.clear_calls();
        (book, chapter, pages)
    }

    fn every_call() -> Vec<ToolCall> {
        vec![
            ToolCall::ListBooks,
            ToolCall::ReadBook,
            ToolCall::GetBookDetails { book_id: 1 },
            ToolCall::CreateBook {
                title: "T".into(),
                learning_outcome: "L".into(),
                reading_level: "8th grade".into(),
            },
            ToolCall::UpdateBook {
                book_id: 1,
                title: Some("T".into()),
                learning_outcome: None,
                reading_level: None,
            },
            ToolCall::DeleteBook { book_id: 1 },
            ToolCall::ListChapters { book_id: 1 },
            ToolCall::GetChapterDetails {
                book_id: 1,
                chapter_id: 2,
            },
            ToolCall::CreateChapter {
                book_id: 1,
                title: "C".into(),
                description: "D".into(),
            },
            ToolCall::UpdateChapter {
                book_id: 1,
                chapter_id: 2,
                title: Some("C".into()),
                description: None,
            },
            ToolCall::DeleteChapter {
                book_id: 1,
                chapter_id: 2,
            },
            ToolCall::ListPages {
                book_id: 1,
                chapter_id: 2,
            },
            ToolCall::GetPageContent {
                book_id: 1,
                chapter_id: 2,
                page_id: 3,
            },
            ToolCall::CreatePage {
                book_id: 1,
                chapter_id: 2,
                content: "x".into(),
            },
            ToolCall::UpdatePage {
                book_id: 1,
                chapter_id: 2,
                page_number: 1,
                content: Some("x".into()),
            },
            ToolCall::DeletePage {
                book_id: 1,
                chapter_id: 2,
                page_number: 1,
            },
            ToolCall::GeneratePageImage {
                book_id: 1,
                chapter_id: 2,
                page_id: 3,
            },
        ]
    }

    #[tokio::test]
    async fn test_missing_credential_makes_no_request() {
        let (api, tools) = setup();
        let no_token = ConversationState::default();

        let calls = every_call();
        assert_eq!(calls.len(), ToolName::ALL.len());

        for call in &calls {
            let outcome = tools.execute(call, &no_token).await;
            assert_eq!(
                render_outcome(&outcome),
                "Error: api_token is required but not provided in state.",
                "{}",
                call.name()
            );
            assert_eq!(outcome.unwrap_err().kind(), ErrorKind::MissingCredential);
        }
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_updates_without_fields_make_no_request() {
        let (api, tools) = setup();
        let calls = [
            ToolCall::UpdateBook {
                book_id: 1,
                title: None,
                learning_outcome: Some(String::new()),
                reading_level: None,
            },
            ToolCall::UpdateChapter {
                book_id: 1,
                chapter_id: 2,
                title: None,
                description: None,
            },
            ToolCall::UpdatePage {
                book_id: 1,
                chapter_id: 2,
                page_number: 3,
                content: None,
            },
        ];

        for call in &calls {
            let outcome = tools.execute(call, &state()).await;
            assert_eq!(render_outcome(&outcome), "Error: No fields provided to update.");
        }
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_update_page_by_position() {
        let (api, tools) = setup();
        let (book, chapter, pages) = seeded(&api, 5);

        let call = ToolCall::UpdatePage {
            book_id: book,
            chapter_id: chapter,
            page_number: 3,
            content: Some("Hello".into()),
        };
        let envelope = tools.execute(&call, &state()).await.unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0],
            RecordedCall {
                method: HttpMethod::Get,
                endpoint: Endpoint::pages(book, chapter).path().to_string(),
                payload: None,
            }
        );
        assert_eq!(
            calls[1],
            RecordedCall {
                method: HttpMethod::Put,
                endpoint: Endpoint::page(book, chapter, pages[2]).path().to_string(),
                payload: Some(json!({"page": {"content": "Hello"}})),
            }
        );

        assert_eq!(envelope.tool_name, "update_page");
        assert_eq!(
            Value::Object(envelope.tool_args.clone()),
            json!({"book_id": book, "chapter_id": chapter, "page_number": 3, "content": "Hello"})
        );
        assert_eq!(envelope.tool_output["id"], json!(pages[2]));
        assert_eq!(envelope.tool_output["content"], "Hello");
    }

    #[tokio::test]
    async fn test_delete_page_out_of_range() {
        let (api, tools) = setup();
        let (book, chapter, _) = seeded(&api, 5);

        let call = ToolCall::DeletePage {
            book_id: book,
            chapter_id: chapter,
            page_number: 9,
        };
        let outcome = tools.execute(&call, &state()).await;
        assert_eq!(
            render_outcome(&outcome),
            "Error: Page 9 does not exist in this chapter. Chapter has 5 pages."
        );

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, HttpMethod::Get);
    }

    #[tokio::test]
    async fn test_update_page_out_of_range_makes_no_mutation() {
        let (api, tools) = setup();
        let (book, chapter, _) = seeded(&api, 2);

        let outcome = tools
            .update_page(&state().credential().unwrap(), book, chapter, 3, Some("x"))
            .await;
        assert!(matches!(
            outcome,
            Err(LeoError::PageOutOfRange {
                requested: 3,
                count: 2
            })
        ));
        assert!(api.calls().iter().all(|c| !c.method.is_mutating()));
    }

    #[tokio::test]
    async fn test_delete_page_echoes_listed_page() {
        let (api, tools) = setup();
        let (book, chapter, pages) = seeded(&api, 3);

        let envelope = tools
            .delete_page(&state().credential().unwrap(), book, chapter, 2)
            .await
            .unwrap();

        assert_eq!(envelope.tool_output["page"]["id"], json!(pages[1]));
        assert_eq!(envelope.tool_output["page"]["page_number"], json!(2));
        assert_eq!(envelope.tool_output["page"]["content"], "page 2");
        assert_eq!(api.page_ids(chapter), vec![pages[0], pages[2]]);
    }

    #[tokio::test]
    async fn test_create_then_fetch_book() {
        let (_api, tools) = setup();
        let cred = state().credential().unwrap();

        let created = tools
            .create_book(&cred, "The Cyborg Llama", "Learn about robots", "7th grade")
            .await
            .unwrap();
        assert_eq!(
            Value::Object(created.tool_args.clone()),
            json!({"title": "The Cyborg Llama"})
        );

        let id = created.tool_output["id"].as_u64().unwrap();
        let fetched = tools.get_book_details(&cred, id).await.unwrap();
        assert_eq!(fetched.tool_output["title"], "The Cyborg Llama");
    }

    #[tokio::test]
    async fn test_update_book_sends_only_supplied_fields() {
        let (api, tools) = setup();
        let (book, _, _) = seeded(&api, 0);

        let envelope = tools
            .update_book(&state().credential().unwrap(), book, None, None, Some("9th grade"))
            .await
            .unwrap();

        assert_eq!(
            api.calls()[0].payload,
            Some(json!({"book": {"reading_level": "9th grade"}}))
        );
        assert_eq!(
            Value::Object(envelope.tool_args),
            json!({"book_id": book, "reading_level": "9th grade"})
        );
        assert_eq!(envelope.tool_output["title"], "Seeded");
    }

    #[tokio::test]
    async fn test_delete_book_echoes_prefetched_details() {
        let (api, tools) = setup();
        let (book, _, _) = seeded(&api, 0);

        let envelope = tools
            .delete_book(&state().credential().unwrap(), book)
            .await
            .unwrap();
        assert_eq!(envelope.tool_output["title"], "Seeded");

        let methods: Vec<HttpMethod> = api.calls().iter().map(|c| c.method).collect();
        assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Delete]);
    }

    #[tokio::test]
    async fn test_delete_twice_surfaces_not_found() {
        let (api, tools) = setup();
        let (book, chapter, _) = seeded(&api, 0);
        let cred = state().credential().unwrap();

        tools.delete_chapter(&cred, book, chapter).await.unwrap();
        let second = tools.delete_chapter(&cred, book, chapter).await.unwrap_err();
        assert!(second.is_not_found());
        assert_eq!(second.kind(), ErrorKind::Upstream);
    }

    /// Prefetch fails but the delete goes through: output is the delete response.
    struct FlakyGet {
        inner: MemoryContentApi,
    }

    #[async_trait::async_trait]
    impl ContentApi for FlakyGet {
        async fn request(
            &self,
            method: HttpMethod,
            endpoint: &Endpoint,
            payload: Option<&Value>,
            credential: &Credential,
        ) -> Result<Value> {
            if method == HttpMethod::Get {
                return Err(LeoError::Upstream {
                    status: 503,
                    body: "maintenance".to_string(),
                });
            }
            self.inner.request(method, endpoint, payload, credential).await
        }
    }

    #[tokio::test]
    async fn test_delete_survives_failed_prefetch() {
        let inner = MemoryContentApi::new().with_recording();
        let book = inner.seed_book("Doomed");
        let tools = ContentTools::new(Arc::new(FlakyGet { inner }));

        let envelope = tools
            .delete_book(&state().credential().unwrap(), book)
            .await
            .unwrap();
        assert!(envelope.tool_output.is_null());
        assert_eq!(
            Value::Object(envelope.tool_args),
            json!({"book_id": book})
        );
    }

    #[tokio::test]
    async fn test_generate_page_image() {
        let (api, tools) = setup();
        let (book, chapter, pages) = seeded(&api, 1);

        let envelope = tools
            .generate_page_image(&state().credential().unwrap(), book, chapter, pages[0])
            .await
            .unwrap();
        assert_eq!(
            envelope.tool_output["image_url"],
            json!(format!("/images/pages/{}.png", pages[0]))
        );
        assert_eq!(api.calls()[0].method, HttpMethod::Post);
        assert!(api.calls()[0].endpoint.ends_with("/generate_image.json"));
    }

    #[tokio::test]
    async fn test_upstream_error_is_rendered_verbatim() {
        let (_api, tools) = setup();
        let outcome = tools
            .execute(&ToolCall::ListChapters { book_id: 404 }, &state())
            .await;
        assert_eq!(
            render_outcome(&outcome),
            r#"Error: API request failed with status 404: {"error":"Not Found"}"#
        );
    }

    #[tokio::test]
    async fn test_batch_preserves_request_order() {
        let (api, tools) = setup();
        let (book, chapter, _) = seeded(&api, 2);

        let calls = vec![
            ToolCall::ListPages {
                book_id: book,
                chapter_id: chapter,
            },
            ToolCall::GetBookDetails { book_id: 999 },
            ToolCall::ListChapters { book_id: book },
        ];
        let results = tools.execute_batch(&calls, &state()).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().tool_name, "list_pages");
        assert!(results[1].as_ref().unwrap_err().is_not_found());
        assert_eq!(results[2].as_ref().unwrap().tool_name, "list_chapters");
    }
}
