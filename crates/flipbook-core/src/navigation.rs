//! Page-flip navigation over the flat slot sequence.
//!
//! Every move is a two-step affair: the move is accepted and a transition
//! direction becomes visible to the renderer, then once the transition delay
//! has elapsed the index is committed. The clock is injected (`now_ms`), so
//! hosts drive completion with [`Navigator::tick`] or skip the animation with
//! [`Navigator::finish_transition`]. While a transition is pending every new
//! request is ignored.
//!
//! In spread mode the visible pair is `slots[current_index]` (left) and
//! `slots[current_index + 1]` (right), and `current_index` is always even.

use crate::book::Book;
use crate::slots::{self, Slot};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LayoutMode {
    Single,
    #[default]
    Spread,
}

impl LayoutMode {
    /// Narrow viewports get one page at a time.
    pub fn for_viewport(viewport_width: u32, narrow_viewport_width: u32) -> Self {
        if viewport_width < narrow_viewport_width {
            LayoutMode::Single
        } else {
            LayoutMode::Spread
        }
    }

    pub fn step(self) -> usize {
        match self {
            LayoutMode::Single => 1,
            LayoutMode::Spread => 2,
        }
    }

    /// Spread positions are rounded down to the even (left-hand) slot.
    pub fn align(self, index: usize) -> usize {
        match self {
            LayoutMode::Single => index,
            LayoutMode::Spread => index - index % 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TransitionDirection {
    #[default]
    None,
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct NavigationState {
    pub current_index: usize,
    pub layout_mode: LayoutMode,
    pub transition_direction: TransitionDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigatorSettings {
    pub narrow_viewport_width: u32,
    pub single_transition_ms: u64,
    pub spread_transition_ms: u64,
}

impl Default for NavigatorSettings {
    fn default() -> Self {
        crate::config::AppConfig::default().navigator_settings()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingTransition {
    target: usize,
    due_ms: u64,
}

/// What a renderer needs to draw the current spread and its controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct NavigatorView {
    pub current_index: usize,
    pub total_slots: usize,
    pub layout_mode: LayoutMode,
    pub transition_direction: TransitionDirection,
    pub visible: Vec<Slot>,
    /// 1-based spread number; single mode still counts in spreads.
    pub position: usize,
    pub total: usize,
    pub can_advance: bool,
    pub can_retreat: bool,
    pub active_topic_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    book: Book,
    slots: Vec<Slot>,
    state: NavigationState,
    pending: Option<PendingTransition>,
    settings: NavigatorSettings,
}

impl Navigator {
    /// Open a published book at the cover.
    pub fn open(book: Book, viewport_width: u32, settings: NavigatorSettings) -> Result<Self> {
        book.ensure_eligible()?;
        let layout_mode = LayoutMode::for_viewport(viewport_width, settings.narrow_viewport_width);
        let slots = slots::build_slots(&book, layout_mode);
        info!(
            book = %book.title,
            topics = book.topics.len(),
            slots = slots.len(),
            layout = ?layout_mode,
            "Opened book for reading"
        );
        Ok(Navigator {
            book,
            slots,
            state: NavigationState {
                current_index: 0,
                layout_mode,
                transition_direction: TransitionDirection::None,
            },
            pending: None,
            settings,
        })
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether `advance` would be accepted right now.
    pub fn can_advance(&self) -> bool {
        !self.is_transitioning()
            && self.state.current_index + self.state.layout_mode.step() < self.slots.len()
    }

    /// Whether `retreat` would be accepted right now.
    pub fn can_retreat(&self) -> bool {
        !self.is_transitioning() && self.state.current_index >= self.state.layout_mode.step()
    }

    pub fn transition_ms(&self) -> u64 {
        match self.state.layout_mode {
            LayoutMode::Single => self.settings.single_transition_ms,
            LayoutMode::Spread => self.settings.spread_transition_ms,
        }
    }

    /// Move one page (single) or one spread forward. Returns whether a
    /// transition started.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        if !self.can_advance() {
            debug!(index = self.state.current_index, "Ignoring advance");
            return false;
        }
        let target = self.state.current_index + self.state.layout_mode.step();
        self.begin(target, TransitionDirection::Forward, now_ms);
        true
    }

    pub fn retreat(&mut self, now_ms: u64) -> bool {
        if !self.can_retreat() {
            debug!(index = self.state.current_index, "Ignoring retreat");
            return false;
        }
        let target = self.state.current_index - self.state.layout_mode.step();
        self.begin(target, TransitionDirection::Backward, now_ms);
        true
    }

    /// Jump to an arbitrary slot; spread mode lands on the spread holding it.
    pub fn jump_to(&mut self, target_index: usize, now_ms: u64) -> bool {
        if self.is_transitioning() || target_index >= self.slots.len() {
            debug!(requested = target_index, len = self.slots.len(), "Ignoring jump");
            return false;
        }
        let target = self.state.layout_mode.align(target_index);
        let direction = match target.cmp(&self.state.current_index) {
            std::cmp::Ordering::Greater => TransitionDirection::Forward,
            std::cmp::Ordering::Less => TransitionDirection::Backward,
            std::cmp::Ordering::Equal => {
                debug!(index = target, "Jump target already visible");
                return false;
            }
        };
        self.begin(target, direction, now_ms);
        true
    }

    /// Jump to the first page of a topic. Unknown or page-less topics are
    /// ignored.
    pub fn jump_to_topic(&mut self, topic_id: &str, now_ms: u64) -> bool {
        let has_pages = self
            .book
            .topic(topic_id)
            .is_some_and(|topic| topic.page_count() > 0);
        if !has_pages {
            debug!(topic = topic_id, "Ignoring jump to topic without pages");
            return false;
        }
        match slots::first_content_index(&self.slots, topic_id) {
            Some(index) => self.jump_to(index, now_ms),
            None => false,
        }
    }

    pub fn open_contents(&mut self, now_ms: u64) -> bool {
        self.jump_to(slots::CONTENTS_INDEX, now_ms)
    }

    /// Commit the pending move once its delay has elapsed. Returns whether a
    /// transition completed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.pending {
            Some(pending) if now_ms >= pending.due_ms => self.finish_transition(),
            _ => false,
        }
    }

    /// Commit the pending move immediately.
    pub fn finish_transition(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        self.state.current_index = pending.target;
        self.state.transition_direction = TransitionDirection::None;
        info!(index = pending.target, "Turned to slot");
        true
    }

    /// Recompute the layout for a new viewport width. The position survives;
    /// switching into spread mode rounds it (and any pending target) down to
    /// even.
    pub fn resize(&mut self, viewport_width: u32) {
        let layout_mode =
            LayoutMode::for_viewport(viewport_width, self.settings.narrow_viewport_width);
        if layout_mode == self.state.layout_mode {
            return;
        }
        self.state.layout_mode = layout_mode;
        self.state.current_index = layout_mode.align(self.state.current_index);
        if let Some(pending) = self.pending.as_mut() {
            pending.target = layout_mode.align(pending.target);
        }
        self.slots = slots::build_slots(&self.book, layout_mode);
        info!(
            viewport_width,
            layout = ?layout_mode,
            index = self.state.current_index,
            "Layout changed"
        );
    }

    /// Place the reader at `index` without animation, e.g. when resuming
    /// from a bookmark. Out-of-range indices are clamped to the last slot.
    pub fn restore(&mut self, index: usize) {
        if self.is_transitioning() || self.slots.is_empty() {
            return;
        }
        let clamped = index.min(self.slots.len() - 1);
        self.state.current_index = self.state.layout_mode.align(clamped);
        debug!(index = self.state.current_index, "Restored reading position");
    }

    /// One slot in single mode, the left/right pair in spread mode.
    pub fn visible_slots(&self) -> &[Slot] {
        let start = self.state.current_index.min(self.slots.len());
        let end = (start + self.state.layout_mode.step()).min(self.slots.len());
        &self.slots[start..end]
    }

    pub fn view(&self) -> NavigatorView {
        let visible = self.visible_slots().to_vec();
        let active_topic_id = visible
            .iter()
            .find_map(|slot| slot.topic_id().map(str::to_string));
        NavigatorView {
            current_index: self.state.current_index,
            total_slots: self.slots.len(),
            layout_mode: self.state.layout_mode,
            transition_direction: self.state.transition_direction,
            visible,
            position: self.state.current_index / 2 + 1,
            total: self.slots.len().div_ceil(2),
            can_advance: self.can_advance(),
            can_retreat: self.can_retreat(),
            active_topic_id,
        }
    }

    fn begin(&mut self, target: usize, direction: TransitionDirection, now_ms: u64) {
        let due_ms = now_ms.saturating_add(self.transition_ms());
        self.state.transition_direction = direction;
        self.pending = Some(PendingTransition { target, due_ms });
        debug!(
            from = self.state.current_index,
            to = target,
            ?direction,
            due_ms,
            "Started page transition"
        );
    }
}
