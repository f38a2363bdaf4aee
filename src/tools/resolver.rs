//! Page position resolution.

use crate::api::{ContentApi, Credential, Endpoint, HttpMethod};
use crate::error::{LeoError, Result};
use serde_json::{Map, Value};
use tracing::debug;

/// A page located by its position in a chapter listing.
#[derive(Debug, Clone)]
pub struct ResolvedPage {
    /// Server ID the position mapped to.
    pub page_id: u64,
    /// The page as listed.
    pub page: Map<String, Value>,
    /// Pages in the chapter at listing time.
    pub page_count: usize,
}

/// Map a 1-based page position to a server page ID.
///
/// Lists the chapter's pages with one GET and indexes into the result. The
/// server does not store positions, and nothing ties this listing to the
/// caller's follow-up request: a page inserted or removed in between makes
/// the follow-up hit a different page than the one listed here.
pub async fn resolve_page_position(
    api: &dyn ContentApi,
    credential: &Credential,
    book_id: u64,
    chapter_id: u64,
    position: u32,
) -> Result<ResolvedPage> {
    if position == 0 {
        return Err(LeoError::InvalidInput(
            "page_number starts at 1 (page_number=1 is the first page)".to_string(),
        ));
    }

    let listing = api
        .request(
            HttpMethod::Get,
            &Endpoint::pages(book_id, chapter_id),
            None,
            credential,
        )
        .await?;

    let pages = listing.as_array().map(Vec::as_slice).unwrap_or_default();
    let index = position as usize - 1;

    let entry = pages.get(index).ok_or(LeoError::PageOutOfRange {
        requested: position,
        count: pages.len(),
    })?;

    let page = entry.as_object().cloned().ok_or_else(|| {
        LeoError::UnexpectedResponse(format!("page {} in listing is not an object", position))
    })?;
    let page_id = page.get("id").and_then(Value::as_u64).ok_or_else(|| {
        LeoError::UnexpectedResponse(format!("page {} in listing has no numeric id", position))
    })?;

    debug!("Page number {} corresponds to page ID {}", position, page_id);

    Ok(ResolvedPage {
        page_id,
        page,
        page_count: pages.len(),
    })
}
