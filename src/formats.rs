use serde::Serialize;

/// One parsed entry of a search response.
///
/// Constructed only by the fetch pipeline; fields are read through accessors so a record
/// never changes after it has been built.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BookRecord {
    title: String,
    authors: Vec<String>,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    thumbnail: Option<Thumbnail>,
    preview_url: String,
}

impl BookRecord {
    /// Returns `None` when `title` or `preview_url` is empty.
    pub fn new(
        title: String,
        authors: Vec<String>,
        description: String,
        thumbnail: Option<Thumbnail>,
        preview_url: String,
    ) -> Option<Self> {
        if title.is_empty() || preview_url.is_empty() {
            return None;
        }
        Some(Self {
            title,
            authors,
            description,
            thumbnail,
            preview_url,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn thumbnail(&self) -> Option<&Thumbnail> {
        self.thumbnail.as_ref()
    }

    pub fn preview_url(&self) -> &str {
        &self.preview_url
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Thumbnail {
    pub url: String,
    pub format: String,
    pub width: u32,
    pub height: u32,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Outcome of one fetch, as seen by the dispatcher.
///
/// Every request/network failure collapses into `NoData`; the cause is only logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Batch {
    Books(Vec<BookRecord>),
    NoData,
}

impl Batch {
    pub fn books(&self) -> &[BookRecord] {
        match self {
            Self::Books(books) => books,
            Self::NoData => &[],
        }
    }

    pub fn into_books(self) -> Vec<BookRecord> {
        match self {
            Self::Books(books) => books,
            Self::NoData => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.books().is_empty()
    }
}
