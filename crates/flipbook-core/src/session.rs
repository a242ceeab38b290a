use crate::book::Book;
use crate::config::{AppConfig, TextDirection};
use crate::gesture::{KeyBindings, NavIntent, SwipeTracker};
use crate::navigation::{Navigator, NavigatorView};
use crate::slots::{self, TocEntry};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};
use ts_rs::TS;

/// Last reading position of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Bookmark {
    pub slot_index: usize,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct ReaderSnapshot {
    pub source_path: String,
    pub book_id: String,
    pub book_title: String,
    pub text_direction: TextDirection,
    pub navigation: NavigatorView,
    pub contents: Vec<TocEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    GetSnapshot,
    Advance,
    Retreat,
    JumpTo { index: usize },
    JumpToTopic { topic_id: String },
    OpenContents,
    Swipe { start_x: f32, end_x: f32 },
    TouchStart { x: f32 },
    TouchEnd { x: f32 },
    Key { key: String },
    Resize { viewport_width: u32 },
    Tick,
    FinishTransition,
}

impl SessionCommand {
    pub fn action(&self) -> &'static str {
        match self {
            Self::GetSnapshot => "reader_get_snapshot",
            Self::Advance => "reader_advance",
            Self::Retreat => "reader_retreat",
            Self::JumpTo { .. } => "reader_jump_to",
            Self::JumpToTopic { .. } => "reader_jump_to_topic",
            Self::OpenContents => "reader_open_contents",
            Self::Swipe { .. } => "reader_swipe",
            Self::TouchStart { .. } => "reader_touch_start",
            Self::TouchEnd { .. } => "reader_touch_end",
            Self::Key { .. } => "reader_key",
            Self::Resize { .. } => "reader_resize",
            Self::Tick => "reader_tick",
            Self::FinishTransition => "reader_finish_transition",
        }
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct SessionEvent {
    pub action: String,
    pub snapshot: ReaderSnapshot,
}

/// One open book: the navigator plus the input plumbing around it. Dropping
/// the session discards any pending transition.
#[derive(Debug, Clone)]
pub struct ReaderSession {
    pub source_path: PathBuf,
    pub config: AppConfig,
    navigator: Navigator,
    keys: KeyBindings,
    swipe: SwipeTracker,
}

impl ReaderSession {
    pub fn open(
        source_path: PathBuf,
        book: Book,
        config: AppConfig,
        viewport_width: u32,
        bookmark: Option<Bookmark>,
    ) -> Result<Self> {
        let mut navigator = Navigator::open(book, viewport_width, config.navigator_settings())?;
        if let Some(bookmark) = bookmark {
            navigator.restore(bookmark.slot_index);
            info!(
                slot = navigator.state().current_index,
                "Resuming from bookmark"
            );
        }
        let keys = KeyBindings::from_config(&config);
        Ok(Self {
            source_path,
            config,
            navigator,
            keys,
            swipe: SwipeTracker::default(),
        })
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn source_path_str(&self) -> String {
        self.source_path.to_string_lossy().to_string()
    }

    pub fn snapshot(&self) -> ReaderSnapshot {
        let book = self.navigator.book();
        ReaderSnapshot {
            source_path: self.source_path_str(),
            book_id: book.id.clone(),
            book_title: book.title.clone(),
            text_direction: self.config.text_direction,
            navigation: self.navigator.view(),
            contents: slots::table_of_contents(book),
        }
    }

    pub fn apply_command(&mut self, command: SessionCommand, now_ms: u64) -> SessionEvent {
        let action = command.action();
        match command {
            SessionCommand::GetSnapshot => {}
            SessionCommand::Advance => {
                self.navigator.advance(now_ms);
            }
            SessionCommand::Retreat => {
                self.navigator.retreat(now_ms);
            }
            SessionCommand::JumpTo { index } => {
                self.navigator.jump_to(index, now_ms);
            }
            SessionCommand::JumpToTopic { topic_id } => {
                self.navigator.jump_to_topic(&topic_id, now_ms);
            }
            SessionCommand::OpenContents => {
                self.navigator.open_contents(now_ms);
            }
            SessionCommand::Swipe { start_x, end_x } => {
                let intent =
                    crate::gesture::interpret_swipe(start_x, end_x, self.config.swipe_threshold);
                self.apply_intent(intent, now_ms);
            }
            SessionCommand::TouchStart { x } => self.swipe.touch_start(x),
            SessionCommand::TouchEnd { x } => {
                let intent = self.swipe.touch_end(x, self.config.swipe_threshold);
                self.apply_intent(intent, now_ms);
            }
            SessionCommand::Key { key } => {
                let intent = self.keys.intent_for_key(&key);
                if intent.is_none() {
                    debug!(%key, "No navigation bound to key");
                }
                self.apply_intent(intent, now_ms);
            }
            SessionCommand::Resize { viewport_width } => self.navigator.resize(viewport_width),
            SessionCommand::Tick => {
                self.navigator.tick(now_ms);
            }
            SessionCommand::FinishTransition => {
                self.navigator.finish_transition();
            }
        }
        SessionEvent {
            action: action.to_string(),
            snapshot: self.snapshot(),
        }
    }

    /// Let time pass without a command; commits a due transition.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.navigator.tick(now_ms)
    }

    pub fn to_bookmark(&self) -> Bookmark {
        Bookmark {
            slot_index: self.navigator.state().current_index,
        }
    }

    fn apply_intent(&mut self, intent: Option<NavIntent>, now_ms: u64) {
        match intent {
            Some(NavIntent::Advance) => {
                self.navigator.advance(now_ms);
            }
            Some(NavIntent::Retreat) => {
                self.navigator.retreat(now_ms);
            }
            Some(NavIntent::OpenContents) => {
                self.navigator.open_contents(now_ms);
            }
            None => {}
        }
    }
}
