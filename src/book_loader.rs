//! Book document loading.
//!
//! Stands in for the data layer: reads one book document (TOML or JSON),
//! paginates every topic from its raw content and hands back a sorted
//! [`Book`]. Topics that ship pre-built pages and no raw content keep them.

use anyhow::{Context, Result};
use flipbook_core::book::{Book, BookStatus, PageUnit, Topic};
use flipbook_core::pagination::PaginationBudget;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct BookDocument {
    #[serde(default)]
    id: Option<String>,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: BookStatus,
    #[serde(default)]
    topics: Vec<TopicDocument>,
}

#[derive(Debug, Deserialize)]
struct TopicDocument {
    #[serde(default)]
    id: Option<String>,
    title: String,
    #[serde(default)]
    order: i32,
    #[serde(default)]
    content: String,
    #[serde(default)]
    pages: Vec<PageUnit>,
}

/// Load and paginate the book document at `path`.
pub fn load_book(path: &Path, budget: PaginationBudget) -> Result<Book> {
    info!(path = %path.display(), "Loading book document");
    let data =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let document = parse_document(path, &data)?;
    let book = build_book(path, document, budget);
    info!(
        title = %book.title,
        status = %book.status,
        topics = book.topics.len(),
        pages = book.total_pages(),
        "Finished loading book"
    );
    Ok(book)
}

fn parse_document(path: &Path, data: &str) -> Result<BookDocument> {
    if is_json(path) {
        serde_json::from_str(data)
            .with_context(|| format!("Invalid book JSON in {}", path.display()))
    } else {
        toml::from_str(data).with_context(|| format!("Invalid book TOML in {}", path.display()))
    }
}

fn build_book(path: &Path, document: BookDocument, budget: PaginationBudget) -> Book {
    let id = document.id.unwrap_or_else(|| {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("book")
            .to_string()
    });
    let topics = document
        .topics
        .into_iter()
        .enumerate()
        .map(|(idx, topic)| {
            let topic_id = topic.id.unwrap_or_else(|| format!("topic-{}", idx + 1));
            if topic.content.is_empty() && !topic.pages.is_empty() {
                debug!(topic = %topic_id, pages = topic.pages.len(), "Keeping stored pages");
                Topic {
                    id: topic_id,
                    title: topic.title,
                    order: topic.order,
                    content: String::new(),
                    pages: topic.pages,
                }
            } else {
                Topic::new(topic_id, topic.title, topic.order, topic.content, budget)
            }
        })
        .collect();

    Book {
        id,
        title: document.title,
        description: document.description.filter(|text| !text.trim().is_empty()),
        status: document.status,
        topics,
    }
    .sorted()
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
