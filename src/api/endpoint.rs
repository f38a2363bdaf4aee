//! REST paths of the content API.

/// A path on the content API, always ending in `.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint(String);

impl Endpoint {
    pub fn books() -> Self {
        Self("/books.json".to_string())
    }

    pub fn book(book_id: u64) -> Self {
        Self(format!("/books/{}.json", book_id))
    }

    pub fn chapters(book_id: u64) -> Self {
        Self(format!("/books/{}/chapters.json", book_id))
    }

    pub fn chapter(book_id: u64, chapter_id: u64) -> Self {
        Self(format!("/books/{}/chapters/{}.json", book_id, chapter_id))
    }

    pub fn pages(book_id: u64, chapter_id: u64) -> Self {
        Self(format!("/books/{}/chapters/{}/pages.json", book_id, chapter_id))
    }

    pub fn page(book_id: u64, chapter_id: u64, page_id: u64) -> Self {
        Self(format!(
            "/books/{}/chapters/{}/pages/{}.json",
            book_id, chapter_id, page_id
        ))
    }

    /// Server-side image generation for a page.
    pub fn generate_image(book_id: u64, chapter_id: u64, page_id: u64) -> Self {
        Self(format!(
            "/books/{}/chapters/{}/pages/{}/generate_image.json",
            book_id, chapter_id, page_id
        ))
    }

    /// The path, starting with `/`.
    pub fn path(&self) -> &str {
        &self.0
    }

    /// Path segments without the `.json` suffix.
    pub fn segments(&self) -> Vec<&str> {
        self.0
            .trim_start_matches('/')
            .trim_end_matches(".json")
            .split('/')
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::books().path(), "/books.json");
        assert_eq!(Endpoint::chapter(7, 3).path(), "/books/7/chapters/3.json");
        assert_eq!(
            Endpoint::generate_image(1, 2, 3).path(),
            "/books/1/chapters/2/pages/3/generate_image.json"
        );
    }

    #[test]
    fn test_segments() {
        assert_eq!(Endpoint::books().segments(), vec!["books"]);
        assert_eq!(
            Endpoint::pages(1, 2).segments(),
            vec!["books", "1", "chapters", "2", "pages"]
        );
    }
}
