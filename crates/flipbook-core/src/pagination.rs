//! Pagination utilities.
//!
//! The strategy is deliberately mechanical: words are packed into lines of a
//! fixed word budget, and lines into pages of a fixed line budget. Nothing is
//! measured, so a page is only an approximation of what fits on screen, but
//! the same text always produces the same pages.

use crate::book::PageUnit;
use serde::{Deserialize, Serialize};

/// Words packed onto one line before it is sealed.
pub const DEFAULT_WORDS_PER_LINE: usize = 8;
/// Lines packed onto one page before it is sealed.
pub const DEFAULT_LINES_PER_PAGE: usize = 11;
/// Words per page assumed by [`estimate_page_count`].
pub const DEFAULT_WORDS_PER_PAGE_ESTIMATE: usize = 90;

/// Budgets driving pagination. Changing either of the first two requires
/// regenerating the pages of every affected topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationBudget {
    pub words_per_line: usize,
    pub lines_per_page: usize,
    pub words_per_page_estimate: usize,
}

impl Default for PaginationBudget {
    fn default() -> Self {
        PaginationBudget {
            words_per_line: DEFAULT_WORDS_PER_LINE,
            lines_per_page: DEFAULT_LINES_PER_PAGE,
            words_per_page_estimate: DEFAULT_WORDS_PER_PAGE_ESTIMATE,
        }
    }
}

impl PaginationBudget {
    /// A zero budget would never seal a line or page; treat it as one.
    pub fn normalized(self) -> Self {
        PaginationBudget {
            words_per_line: self.words_per_line.max(1),
            lines_per_page: self.lines_per_page.max(1),
            words_per_page_estimate: self.words_per_page_estimate.max(1),
        }
    }
}

/// Split text into pages using the default budgets.
pub fn paginate(text: &str) -> Vec<String> {
    paginate_with(text, PaginationBudget::default())
}

/// Split text into pages; lines inside a page are joined with `'\n'`.
///
/// Text without any words yields a single page holding the input verbatim.
pub fn paginate_with(text: &str, budget: PaginationBudget) -> Vec<String> {
    let budget = budget.normalized();
    let mut pages = Vec::new();
    let mut page_lines: Vec<String> = Vec::with_capacity(budget.lines_per_page);
    let mut line_words: Vec<&str> = Vec::with_capacity(budget.words_per_line);

    for word in text.split_whitespace() {
        line_words.push(word);
        if line_words.len() < budget.words_per_line {
            continue;
        }
        page_lines.push(line_words.join(" "));
        line_words.clear();

        if page_lines.len() >= budget.lines_per_page {
            pages.push(page_lines.join("\n"));
            page_lines.clear();
        }
    }

    if !line_words.is_empty() {
        page_lines.push(line_words.join(" "));
    }
    if !page_lines.is_empty() {
        pages.push(page_lines.join("\n"));
    }
    if pages.is_empty() {
        pages.push(text.to_string());
    }

    pages
}

/// Paginate and number the pages from 1, ready to be stored on a topic.
pub fn paginate_units(text: &str, budget: PaginationBudget) -> Vec<PageUnit> {
    paginate_with(text, budget)
        .into_iter()
        .enumerate()
        .map(|(idx, content)| PageUnit {
            page_number: idx as u32 + 1,
            content,
        })
        .collect()
}

/// Cheap page-count hint for UI use. Only looks at the word count, so it may
/// disagree with what [`paginate_with`] actually produces.
pub fn estimate_page_count(text: &str, budget: PaginationBudget) -> usize {
    let budget = budget.normalized();
    let words = text.split_whitespace().count();
    words.div_ceil(budget.words_per_page_estimate).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(count: usize) -> String {
        (1..=count)
            .map(|n| format!("w{n}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn line_sizes(page: &str) -> Vec<usize> {
        page.lines()
            .map(|line| line.split_whitespace().count())
            .collect()
    }

    #[test]
    fn empty_and_blank_input_yield_single_verbatim_page() {
        assert_eq!(paginate(""), vec![String::new()]);
        assert_eq!(paginate("   "), vec!["   ".to_string()]);
        assert_eq!(paginate("\n\t "), vec!["\n\t ".to_string()]);
    }

    #[test]
    fn twenty_two_words_fit_on_one_page() {
        let pages = paginate(&words(22));
        assert_eq!(pages.len(), 1);
        assert_eq!(line_sizes(&pages[0]), vec![8, 8, 6]);
    }

    #[test]
    fn exact_page_budget_does_not_emit_trailing_empty_page() {
        let pages = paginate(&words(8 * 11));
        assert_eq!(pages.len(), 1);
        assert_eq!(line_sizes(&pages[0]), vec![8; 11]);
    }

    #[test]
    fn overflow_starts_a_new_page() {
        let pages = paginate(&words(8 * 11 + 3));
        assert_eq!(pages.len(), 2);
        assert_eq!(line_sizes(&pages[1]), vec![3]);
    }

    #[test]
    fn collapses_whitespace_runs_and_newlines() {
        let pages = paginate("  alpha\n\nbeta\t gamma   ");
        assert_eq!(pages, vec!["alpha beta gamma".to_string()]);
    }

    #[test]
    fn preserves_word_sequence_and_budgets() {
        let text = (0..437)
            .map(|n| if n % 7 == 0 { format!("word{n}\n") } else { format!("w{n}  ") })
            .collect::<String>();
        let pages = paginate(&text);

        let rejoined: Vec<&str> = pages.iter().flat_map(|page| page.split_whitespace()).collect();
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined, original);

        let all_lines: Vec<usize> = pages.iter().flat_map(|page| line_sizes(page)).collect();
        for page in &pages {
            assert!(page.lines().count() <= DEFAULT_LINES_PER_PAGE);
        }
        let (last, rest) = all_lines.split_last().expect("at least one line");
        assert!(rest.iter().all(|&size| size == DEFAULT_WORDS_PER_LINE));
        assert!(*last <= DEFAULT_WORDS_PER_LINE);
    }

    #[test]
    fn is_deterministic() {
        let text = words(500);
        assert_eq!(paginate(&text), paginate(&text));
    }

    #[test]
    fn custom_budget_is_honored_and_zero_is_clamped() {
        let budget = PaginationBudget {
            words_per_line: 2,
            lines_per_page: 2,
            words_per_page_estimate: 4,
        };
        let pages = paginate_with("a b c d e", budget);
        assert_eq!(pages, vec!["a b\nc d".to_string(), "e".to_string()]);

        let zero = PaginationBudget {
            words_per_line: 0,
            lines_per_page: 0,
            words_per_page_estimate: 0,
        };
        assert_eq!(paginate_with("a b", zero), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn units_are_numbered_from_one() {
        let units = paginate_units(&words(200), PaginationBudget::default());
        let numbers: Vec<u32> = units.iter().map(|unit| unit.page_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn estimate_rounds_up_and_never_returns_zero() {
        let budget = PaginationBudget::default();
        assert_eq!(estimate_page_count("", budget), 1);
        assert_eq!(estimate_page_count(&words(90), budget), 1);
        assert_eq!(estimate_page_count(&words(91), budget), 2);
    }
}
