use std::fmt::Write as _;

use crate::app::dispatcher::SearchCompletion;
use crate::app::navigate::NavigationRequest;
use crate::formats::BookRecord;

pub const NO_RESULTS_MESSAGE: &str = "No results found.\nEnter a new keyword";

/// The list currently on screen plus the empty-state message.
///
/// Only the interactive loop writes to it, one completion at a time. Whatever completion
/// is applied last is what the user sees.
#[derive(Debug, Default)]
pub struct SearchView {
    books: Vec<BookRecord>,
    message: Option<&'static str>,
}

impl SearchView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, completion: SearchCompletion) {
        let books = completion.batch.into_books();
        tracing::debug!(
            seq = completion.ticket.seq,
            count = books.len(),
            "apply search completion"
        );
        if books.is_empty() {
            self.books.clear();
            self.message = Some(NO_RESULTS_MESSAGE);
        } else {
            self.books = books;
            self.message = None;
        }
    }

    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    pub fn message(&self) -> Option<&'static str> {
        self.message
    }

    /// `index` is zero-based. Out-of-range taps are ignored.
    pub fn tap(&self, index: usize) -> Option<NavigationRequest> {
        self.books.get(index).map(|book| NavigationRequest {
            url: book.preview_url().to_owned(),
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(message) = self.message {
            out.push_str(message);
            out.push('\n');
        }
        for (index, book) in self.books.iter().enumerate() {
            out.push_str(&render_row(index + 1, book));
        }
        out
    }
}

pub fn render_row(number: usize, book: &BookRecord) -> String {
    let mut row = String::new();
    let _ = writeln!(row, "{number}. {}", book.title());
    if !book.authors().is_empty() {
        row.push_str("   by\n");
        for author in book.authors() {
            let _ = writeln!(row, "   {author}");
        }
    }
    match book.thumbnail() {
        Some(thumbnail) => {
            let _ = writeln!(
                row,
                "   [thumbnail {}x{} {}]",
                thumbnail.width, thumbnail.height, thumbnail.format
            );
        }
        None => row.push_str("   [no image]\n"),
    }
    row
}
