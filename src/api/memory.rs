//! In-memory content API.
//!
//! Mimics the REST surface of the real server (server-assigned IDs, nested
//! resources, 404 on unknown IDs, empty body on DELETE). With recording
//! enabled it keeps every request it receives. Useful for testing and offline
//! runs.

use super::{ContentApi, Credential, Endpoint, HttpMethod};
use crate::error::{LeoError, Result};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// A request as seen by [`MemoryContentApi`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub endpoint: String,
    pub payload: Option<Value>,
}

#[derive(Default)]
struct Store {
    next_id: u64,
    books: BTreeMap<u64, Map<String, Value>>,
    chapters: BTreeMap<u64, Map<String, Value>>,
    pages: BTreeMap<u64, Map<String, Value>>,
    calls: Vec<RecordedCall>,
}

impl Store {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn book(&self, book_id: u64) -> Result<&Map<String, Value>> {
        self.books.get(&book_id).ok_or_else(not_found)
    }

    fn chapter(&self, book_id: u64, chapter_id: u64) -> Result<&Map<String, Value>> {
        self.book(book_id)?;
        self.chapters
            .get(&chapter_id)
            .filter(|c| id_field(c, "book_id") == Some(book_id))
            .ok_or_else(not_found)
    }

    fn page(&self, book_id: u64, chapter_id: u64, page_id: u64) -> Result<&Map<String, Value>> {
        self.chapter(book_id, chapter_id)?;
        self.pages
            .get(&page_id)
            .filter(|p| id_field(p, "chapter_id") == Some(chapter_id))
            .ok_or_else(not_found)
    }

    fn insert_book(&mut self, attrs: &Map<String, Value>) -> Value {
        let id = self.allocate_id();
        let mut book = Map::new();
        book.insert("id".into(), json!(id));
        for key in ["title", "learning_outcome", "reading_level"] {
            book.insert(key.into(), attrs.get(key).cloned().unwrap_or(Value::Null));
        }
        book.insert("status".into(), json!("draft"));
        self.books.insert(id, book.clone());
        Value::Object(book)
    }

    fn insert_chapter(&mut self, book_id: u64, attrs: &Map<String, Value>) -> Value {
        let id = self.allocate_id();
        let mut chapter = Map::new();
        chapter.insert("id".into(), json!(id));
        chapter.insert("book_id".into(), json!(book_id));
        for key in ["title", "description"] {
            chapter.insert(key.into(), attrs.get(key).cloned().unwrap_or(Value::Null));
        }
        self.chapters.insert(id, chapter.clone());
        Value::Object(chapter)
    }

    fn insert_page(&mut self, chapter_id: u64, attrs: &Map<String, Value>) -> Value {
        let id = self.allocate_id();
        let mut page = Map::new();
        page.insert("id".into(), json!(id));
        page.insert("chapter_id".into(), json!(chapter_id));
        page.insert(
            "content".into(),
            attrs.get("content").cloned().unwrap_or(Value::Null),
        );
        page.insert("image_url".into(), Value::Null);
        self.pages.insert(id, page.clone());
        Value::Object(page)
    }

    fn remove_chapter(&mut self, chapter_id: u64) {
        self.chapters.remove(&chapter_id);
        self.pages
            .retain(|_, p| id_field(p, "chapter_id") != Some(chapter_id));
    }

    fn remove_book(&mut self, book_id: u64) {
        self.books.remove(&book_id);
        let chapter_ids: Vec<u64> = self
            .chapters
            .iter()
            .filter(|(_, c)| id_field(c, "book_id") == Some(book_id))
            .map(|(id, _)| *id)
            .collect();
        for chapter_id in chapter_ids {
            self.remove_chapter(chapter_id);
        }
    }
}

fn id_field(record: &Map<String, Value>, key: &str) -> Option<u64> {
    record.get(key).and_then(Value::as_u64)
}

fn not_found() -> LeoError {
    LeoError::Upstream {
        status: 404,
        body: json!({"error": "Not Found"}).to_string(),
    }
}

fn unprocessable(message: &str) -> LeoError {
    LeoError::Upstream {
        status: 422,
        body: json!({"error": message}).to_string(),
    }
}

/// Pull the attribute map out of a `{"<root>": {...}}` body.
fn attributes<'a>(payload: Option<&'a Value>, root: &str) -> Result<&'a Map<String, Value>> {
    payload
        .and_then(|p| p.get(root))
        .and_then(Value::as_object)
        .ok_or_else(|| unprocessable(&format!("param is missing or the value is empty: {}", root)))
}

fn merge(record: &mut Map<String, Value>, attrs: &Map<String, Value>, allowed: &[&str]) {
    for key in allowed {
        if let Some(value) = attrs.get(*key) {
            record.insert((*key).to_string(), value.clone());
        }
    }
}

fn parse_id(segment: &str) -> Result<u64> {
    segment.parse().map_err(|_| not_found())
}

/// In-memory content API.
pub struct MemoryContentApi {
    store: Mutex<Store>,
    required_token: Option<String>,
    record_calls: bool,
}

impl MemoryContentApi {
    /// Create an empty API that accepts any credential and records nothing.
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Store::default()),
            required_token: None,
            record_calls: false,
        }
    }

    /// Keep every request for [`calls`](Self::calls). The log is never trimmed.
    pub fn with_recording(mut self) -> Self {
        self.record_calls = true;
        self
    }

    /// Answer 401 unless the request carries this token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Create a book without recording a call.
    pub fn seed_book(&self, title: &str) -> u64 {
        let attrs = json!({"title": title, "reading_level": "8th grade"});
        let book = self.lock().insert_book(attrs.as_object().unwrap_or(&Map::new()));
        book["id"].as_u64().unwrap_or_default()
    }

    /// Create a chapter without recording a call.
    pub fn seed_chapter(&self, book_id: u64, title: &str) -> u64 {
        let attrs = json!({"title": title});
        let chapter = self
            .lock()
            .insert_chapter(book_id, attrs.as_object().unwrap_or(&Map::new()));
        chapter["id"].as_u64().unwrap_or_default()
    }

    /// Create a page without recording a call.
    pub fn seed_page(&self, chapter_id: u64, content: &str) -> u64 {
        let attrs = json!({"content": content});
        let page = self
            .lock()
            .insert_page(chapter_id, attrs.as_object().unwrap_or(&Map::new()));
        page["id"].as_u64().unwrap_or_default()
    }

    /// Every request recorded so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Number of requests recorded so far.
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Forget recorded requests, keeping the data.
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Page IDs of a chapter in listing order.
    pub fn page_ids(&self, chapter_id: u64) -> Vec<u64> {
        self.lock()
            .pages
            .iter()
            .filter(|(_, p)| id_field(p, "chapter_id") == Some(chapter_id))
            .map(|(id, _)| *id)
            .collect()
    }

    fn route(
        store: &mut Store,
        method: HttpMethod,
        segments: &[&str],
        payload: Option<&Value>,
    ) -> Result<Value> {
        match (method, segments) {
            (HttpMethod::Get, ["books"]) => Ok(Value::Array(
                store.books.values().cloned().map(Value::Object).collect(),
            )),
            (HttpMethod::Post, ["books"]) => {
                let attrs = attributes(payload, "book")?;
                Ok(store.insert_book(attrs))
            }
            (method, ["books", book_id]) => {
                let book_id = parse_id(book_id)?;
                let book = store.book(book_id)?.clone();
                match method {
                    HttpMethod::Get => Ok(Value::Object(book)),
                    HttpMethod::Put => {
                        let attrs = attributes(payload, "book")?;
                        let record = store.books.entry(book_id).or_default();
                        merge(record, attrs, &["title", "learning_outcome", "reading_level"]);
                        Ok(Value::Object(record.clone()))
                    }
                    HttpMethod::Delete => {
                        store.remove_book(book_id);
                        Ok(Value::Null)
                    }
                    HttpMethod::Post => Err(not_found()),
                }
            }
            (method, ["books", book_id, "chapters"]) => {
                let book_id = parse_id(book_id)?;
                store.book(book_id)?;
                match method {
                    HttpMethod::Get => Ok(Value::Array(
                        store
                            .chapters
                            .values()
                            .filter(|c| id_field(c, "book_id") == Some(book_id))
                            .cloned()
                            .map(Value::Object)
                            .collect(),
                    )),
                    HttpMethod::Post => {
                        let attrs = attributes(payload, "chapter")?;
                        Ok(store.insert_chapter(book_id, attrs))
                    }
                    _ => Err(not_found()),
                }
            }
            (method, ["books", book_id, "chapters", chapter_id]) => {
                let book_id = parse_id(book_id)?;
                let chapter_id = parse_id(chapter_id)?;
                let chapter = store.chapter(book_id, chapter_id)?.clone();
                match method {
                    HttpMethod::Get => Ok(Value::Object(chapter)),
                    HttpMethod::Put => {
                        let attrs = attributes(payload, "chapter")?;
                        let record = store.chapters.entry(chapter_id).or_default();
                        merge(record, attrs, &["title", "description"]);
                        Ok(Value::Object(record.clone()))
                    }
                    HttpMethod::Delete => {
                        store.remove_chapter(chapter_id);
                        Ok(Value::Null)
                    }
                    HttpMethod::Post => Err(not_found()),
                }
            }
            (method, ["books", book_id, "chapters", chapter_id, "pages"]) => {
                let book_id = parse_id(book_id)?;
                let chapter_id = parse_id(chapter_id)?;
                store.chapter(book_id, chapter_id)?;
                match method {
                    HttpMethod::Get => Ok(Value::Array(
                        store
                            .pages
                            .values()
                            .filter(|p| id_field(p, "chapter_id") == Some(chapter_id))
                            .cloned()
                            .map(Value::Object)
                            .collect(),
                    )),
                    HttpMethod::Post => {
                        let attrs = attributes(payload, "page")?;
                        Ok(store.insert_page(chapter_id, attrs))
                    }
                    _ => Err(not_found()),
                }
            }
            (method, ["books", book_id, "chapters", chapter_id, "pages", page_id]) => {
                let book_id = parse_id(book_id)?;
                let chapter_id = parse_id(chapter_id)?;
                let page_id = parse_id(page_id)?;
                let page = store.page(book_id, chapter_id, page_id)?.clone();
                match method {
                    HttpMethod::Get => Ok(Value::Object(page)),
                    HttpMethod::Put => {
                        let attrs = attributes(payload, "page")?;
                        let record = store.pages.entry(page_id).or_default();
                        merge(record, attrs, &["content"]);
                        Ok(Value::Object(record.clone()))
                    }
                    HttpMethod::Delete => {
                        store.pages.remove(&page_id);
                        Ok(Value::Null)
                    }
                    HttpMethod::Post => Err(not_found()),
                }
            }
            (
                HttpMethod::Post,
                ["books", book_id, "chapters", chapter_id, "pages", page_id, "generate_image"],
            ) => {
                let book_id = parse_id(book_id)?;
                let chapter_id = parse_id(chapter_id)?;
                let page_id = parse_id(page_id)?;
                store.page(book_id, chapter_id, page_id)?;
                let record = store.pages.entry(page_id).or_default();
                record.insert(
                    "image_url".into(),
                    json!(format!("/images/pages/{}.png", page_id)),
                );
                Ok(Value::Object(record.clone()))
            }
            _ => Err(not_found()),
        }
    }
}

impl Default for MemoryContentApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentApi for MemoryContentApi {
    async fn request(
        &self,
        method: HttpMethod,
        endpoint: &Endpoint,
        payload: Option<&Value>,
        credential: &Credential,
    ) -> Result<Value> {
        let mut store = self.lock();
        if self.record_calls {
            store.calls.push(RecordedCall {
                method,
                endpoint: endpoint.path().to_string(),
                payload: payload.cloned(),
            });
        }

        if let Some(required) = &self.required_token {
            if credential.token() != required {
                return Err(LeoError::Upstream {
                    status: 401,
                    body: json!({"error": "Unauthorized"}).to_string(),
                });
            }
        }

        Self::route(&mut store, method, &endpoint.segments(), payload)
    }
}
