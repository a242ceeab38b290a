//! Book / topic / page tree as handed over by the data layer.

use crate::pagination::{self, PaginationBudget};
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

/// One paginated chunk of a topic's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PageUnit {
    pub page_number: u32,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum BookStatus {
    #[default]
    Draft,
    Published,
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookStatus::Draft => "draft",
            BookStatus::Published => "published",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub pages: Vec<PageUnit>,
}

impl Topic {
    /// Build a topic and generate its pages from `content`.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        order: i32,
        content: impl Into<String>,
        budget: PaginationBudget,
    ) -> Self {
        let mut topic = Topic {
            id: id.into(),
            title: title.into(),
            order,
            content: content.into(),
            pages: Vec::new(),
        };
        topic.repaginate(budget);
        topic
    }

    /// Replace the raw content. Pages are regenerated as a whole only when the
    /// text actually changed; returns whether that happened.
    pub fn set_content(&mut self, content: impl Into<String>, budget: PaginationBudget) -> bool {
        let content = content.into();
        if content == self.content {
            return false;
        }
        self.content = content;
        self.repaginate(budget);
        true
    }

    /// Drop every page and regenerate the full set from the raw content.
    pub fn repaginate(&mut self, budget: PaginationBudget) {
        self.pages = pagination::paginate_units(&self.content, budget);
        debug!(
            topic = %self.id,
            pages = self.pages.len(),
            "Regenerated topic pages"
        );
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: BookStatus,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

impl Book {
    pub fn is_published(&self) -> bool {
        self.status == BookStatus::Published
    }

    /// Only published books may be opened by the navigator.
    pub fn ensure_eligible(&self) -> Result<()> {
        if self.is_published() {
            Ok(())
        } else {
            Err(anyhow!(
                "book '{}' is {} and cannot be opened for reading",
                self.title,
                self.status
            ))
        }
    }

    /// Topics by ascending `order` (stable for ties) and pages by ascending
    /// `page_number`.
    pub fn sorted(mut self) -> Self {
        self.topics.sort_by_key(|topic| topic.order);
        for topic in &mut self.topics {
            topic.pages.sort_by_key(|page| page.page_number);
        }
        self
    }

    pub fn topic(&self, topic_id: &str) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.id == topic_id)
    }

    pub fn total_pages(&self) -> usize {
        self.topics.iter().map(Topic::page_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book_with_orders(orders: &[(&str, i32)]) -> Book {
        Book {
            id: "b1".to_string(),
            title: "Sample".to_string(),
            description: None,
            status: BookStatus::Published,
            topics: orders
                .iter()
                .map(|(id, order)| Topic::new(*id, *id, *order, "one two", PaginationBudget::default()))
                .collect(),
        }
    }

    #[test]
    fn new_topic_is_paginated() {
        let words = vec!["w"; 100].join(" ");
        let topic = Topic::new("t", "T", 0, words, PaginationBudget::default());
        assert_eq!(topic.page_count(), 2);
        assert_eq!(topic.pages[1].page_number, 2);
        assert_eq!(topic.pages[1].content.lines().count(), 2);
    }

    #[test]
    fn set_content_regenerates_only_on_change() {
        let budget = PaginationBudget::default();
        let mut topic = Topic::new("t", "T", 0, "short text", budget);
        assert!(!topic.set_content("short text", budget));

        let long = vec!["w"; 200].join(" ");
        assert!(topic.set_content(long, budget));
        let numbers: Vec<u32> = topic.pages.iter().map(|page| page.page_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);

        assert!(topic.set_content("tiny", budget));
        assert_eq!(topic.page_count(), 1);
        assert_eq!(topic.pages[0].content, "tiny");
    }

    #[test]
    fn sorted_is_stable_for_equal_orders() {
        let book = book_with_orders(&[("c", 2), ("a", 1), ("b", 1), ("z", -1)]).sorted();
        let ids: Vec<&str> = book.topics.iter().map(|topic| topic.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "b", "c"]);
    }

    #[test]
    fn sorted_orders_pages_by_number() {
        let mut book = book_with_orders(&[("a", 0)]);
        book.topics[0].pages = vec![
            PageUnit { page_number: 2, content: "second".to_string() },
            PageUnit { page_number: 1, content: "first".to_string() },
        ];
        let book = book.sorted();
        assert_eq!(book.topics[0].pages[0].content, "first");
    }

    #[test]
    fn draft_books_are_not_eligible() {
        let mut book = book_with_orders(&[("a", 0)]);
        assert!(book.ensure_eligible().is_ok());
        book.status = BookStatus::Draft;
        let err = book.ensure_eligible().unwrap_err();
        assert!(err.to_string().contains("draft"));
    }

    #[test]
    fn status_deserializes_lowercase() {
        let book: Book = serde_json::from_str(r#"{"title":"T","status":"published"}"#).unwrap();
        assert!(book.is_published());
        assert!(book.topics.is_empty());
    }
}
