//! Core of the flipbook reader.
//!
//! - `pagination` turns raw topic text into fixed-budget pages.
//! - `book` holds the book/topic/page tree handed over by the data layer.
//! - `slots` flattens that tree into an addressable slot sequence.
//! - `navigation` is the page-flip state machine over the sequence.
//! - `gesture` reduces swipes and key presses to navigation intents.
//! - `session` wires everything behind a command/snapshot surface.

pub mod book;
pub mod config;
pub mod gesture;
pub mod navigation;
pub mod pagination;
pub mod session;
pub mod slots;

pub use book::{Book, BookStatus, PageUnit, Topic};
pub use navigation::{LayoutMode, NavigationState, Navigator, NavigatorView, TransitionDirection};
pub use session::{Bookmark, ReaderSession, ReaderSnapshot, SessionCommand, SessionEvent};
pub use slots::{Slot, TocEntry, build_slots};

use std::fs;
use std::path::Path;
use ts_rs::TS;

fn export_single_type<T: TS + 'static>(out_dir: &Path) -> Result<(), String> {
    T::export_all_to(out_dir).map_err(|err| err.to_string())
}

/// Write TypeScript definitions of everything a renderer receives.
pub fn export_ts_bindings(out_dir: &Path) -> Result<(), String> {
    fs::create_dir_all(out_dir)
        .map_err(|err| format!("Failed to create {}: {err}", out_dir.display()))?;

    for entry in fs::read_dir(out_dir)
        .map_err(|err| format!("Failed to list {}: {err}", out_dir.display()))?
    {
        let entry = entry.map_err(|err| format!("Failed to read entry: {err}"))?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("ts") {
            fs::remove_file(&path)
                .map_err(|err| format!("Failed to remove {}: {err}", path.display()))?;
        }
    }

    export_single_type::<SessionEvent>(out_dir)?;
    export_single_type::<ReaderSnapshot>(out_dir)?;
    export_single_type::<NavigatorView>(out_dir)?;
    export_single_type::<Slot>(out_dir)?;
    export_single_type::<TocEntry>(out_dir)?;
    export_single_type::<PageUnit>(out_dir)?;
    export_single_type::<BookStatus>(out_dir)?;
    Ok(())
}
