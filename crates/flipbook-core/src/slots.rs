//! Flattening of the book tree into an addressable slot sequence.
//!
//! Layout of the sequence: cover, blank, table of contents, blank, then every
//! page of every topic in document order. In spread mode a trailing blank is
//! appended when needed so that slots always pair up as left/right pages.

use crate::book::Book;
use crate::navigation::LayoutMode;
use serde::Serialize;
use ts_rs::TS;

pub const COVER_INDEX: usize = 0;
pub const CONTENTS_INDEX: usize = 2;
/// Cover, blank, contents, blank.
pub const FRONT_MATTER_LEN: usize = 4;

/// One table-of-contents row; `slot_index` is `None` for topics without pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct TocEntry {
    pub topic_id: String,
    pub title: String,
    pub order: i32,
    pub page_count: usize,
    pub slot_index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum Slot {
    Cover {
        title: String,
        description: Option<String>,
    },
    Blank,
    TableOfContents {
        entries: Vec<TocEntry>,
    },
    Content {
        topic_id: String,
        topic_title: String,
        page_number: u32,
        content: String,
    },
}

impl Slot {
    pub fn is_blank(&self) -> bool {
        matches!(self, Slot::Blank)
    }

    pub fn topic_id(&self) -> Option<&str> {
        match self {
            Slot::Content { topic_id, .. } => Some(topic_id),
            _ => None,
        }
    }
}

/// Contents rows with the flat index each topic starts at.
pub fn table_of_contents(book: &Book) -> Vec<TocEntry> {
    let mut next_index = FRONT_MATTER_LEN;
    book.topics
        .iter()
        .map(|topic| {
            let slot_index = (!topic.pages.is_empty()).then_some(next_index);
            next_index += topic.pages.len();
            TocEntry {
                topic_id: topic.id.clone(),
                title: topic.title.clone(),
                order: topic.order,
                page_count: topic.pages.len(),
                slot_index,
            }
        })
        .collect()
}

/// Build the flat sequence for `book`. Pure and idempotent; expects topics and
/// pages to be sorted already (see [`Book::sorted`]).
pub fn build_slots(book: &Book, layout: LayoutMode) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(FRONT_MATTER_LEN + book.total_pages() + 1);
    slots.push(Slot::Cover {
        title: book.title.clone(),
        description: book.description.clone(),
    });
    slots.push(Slot::Blank);
    slots.push(Slot::TableOfContents {
        entries: table_of_contents(book),
    });
    slots.push(Slot::Blank);

    for topic in &book.topics {
        for page in &topic.pages {
            slots.push(Slot::Content {
                topic_id: topic.id.clone(),
                topic_title: topic.title.clone(),
                page_number: page.page_number,
                content: page.content.clone(),
            });
        }
    }

    if layout == LayoutMode::Spread && slots.len() % 2 != 0 {
        slots.push(Slot::Blank);
    }
    slots
}

/// Flat index of the first content slot belonging to `topic_id`.
pub fn first_content_index(slots: &[Slot], topic_id: &str) -> Option<usize> {
    slots.iter().position(|slot| slot.topic_id() == Some(topic_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::{BookStatus, Topic};
    use crate::pagination::PaginationBudget;

    fn book(topic_words: &[(&str, usize)]) -> Book {
        Book {
            id: "b".to_string(),
            title: "Diwan".to_string(),
            description: Some("Collected verse".to_string()),
            status: BookStatus::Published,
            topics: topic_words
                .iter()
                .enumerate()
                .map(|(idx, (id, count))| {
                    let text = vec!["w"; *count].join(" ");
                    let mut topic =
                        Topic::new(*id, id.to_uppercase(), idx as i32, text, PaginationBudget::default());
                    // blank text still paginates to one page; model a topic with none
                    if *count == 0 {
                        topic.pages.clear();
                    }
                    topic
                })
                .collect(),
        }
    }

    #[test]
    fn front_matter_then_content_in_document_order() {
        let book = book(&[("a", 100), ("b", 10)]);
        let slots = build_slots(&book, LayoutMode::Single);
        assert_eq!(slots.len(), 7);
        assert!(matches!(slots[0], Slot::Cover { ref title, .. } if title == "Diwan"));
        assert!(slots[1].is_blank());
        assert!(matches!(slots[2], Slot::TableOfContents { .. }));
        assert!(slots[3].is_blank());
        let pages: Vec<(Option<&str>, u32)> = slots[4..]
            .iter()
            .map(|slot| match slot {
                Slot::Content { topic_id, page_number, .. } => (Some(topic_id.as_str()), *page_number),
                _ => (None, 0),
            })
            .collect();
        assert_eq!(pages, vec![(Some("a"), 1), (Some("a"), 2), (Some("b"), 1)]);
    }

    #[test]
    fn spread_pads_odd_sequences_with_blank() {
        let odd = book(&[("a", 100), ("b", 10)]);
        let slots = build_slots(&odd, LayoutMode::Spread);
        assert_eq!(slots.len(), 8);
        assert!(slots[7].is_blank());

        let even = book(&[("a", 100)]);
        assert_eq!(build_slots(&even, LayoutMode::Spread).len(), 6);
        assert_eq!(build_slots(&even, LayoutMode::Single).len(), 6);
    }

    #[test]
    fn contents_indices_skip_empty_topics() {
        let book = book(&[("a", 100), ("empty", 0), ("c", 5)]);
        let entries = table_of_contents(&book);
        let indices: Vec<Option<usize>> = entries.iter().map(|entry| entry.slot_index).collect();
        assert_eq!(indices, vec![Some(4), None, Some(6)]);
        assert_eq!(entries[1].page_count, 0);

        let slots = build_slots(&book, LayoutMode::Spread);
        assert_eq!(first_content_index(&slots, "c"), Some(6));
        assert_eq!(first_content_index(&slots, "empty"), None);
    }

    #[test]
    fn book_without_topics_is_front_matter_only() {
        let book = book(&[]);
        assert_eq!(build_slots(&book, LayoutMode::Spread).len(), FRONT_MATTER_LEN);
    }

    #[test]
    fn builder_is_idempotent() {
        let book = book(&[("a", 300), ("b", 1)]);
        assert_eq!(
            build_slots(&book, LayoutMode::Spread),
            build_slots(&book, LayoutMode::Spread)
        );
    }

    #[test]
    fn slot_serializes_with_kind_tag() {
        let json = serde_json::to_value(Slot::Blank).unwrap();
        assert_eq!(json["kind"], "blank");
    }
}
