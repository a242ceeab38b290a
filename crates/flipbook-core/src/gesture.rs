//! Reduction of raw input (swipes, key presses) to navigation intents.
//!
//! Nothing here touches navigation state; callers feed the resulting
//! [`NavIntent`] to the navigator.

use crate::config::{AppConfig, TextDirection};

/// Horizontal travel a swipe must exceed to count as a page turn.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    Advance,
    Retreat,
    OpenContents,
}

/// `start_x - end_x` beyond the threshold: positive (finger moved left)
/// advances, negative retreats. Shorter swipes are discarded.
pub fn interpret_swipe(start_x: f32, end_x: f32, threshold: f32) -> Option<NavIntent> {
    let delta = start_x - end_x;
    if delta.abs() <= threshold {
        return None;
    }
    if delta > 0.0 {
        Some(NavIntent::Advance)
    } else {
        Some(NavIntent::Retreat)
    }
}

/// Pairs touch-start and touch-end positions into swipes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTracker {
    start_x: Option<f32>,
}

impl SwipeTracker {
    pub fn touch_start(&mut self, x: f32) {
        self.start_x = Some(x);
    }

    /// A touch end without a matching start is ignored.
    pub fn touch_end(&mut self, x: f32, threshold: f32) -> Option<NavIntent> {
        let start_x = self.start_x.take()?;
        interpret_swipe(start_x, x, threshold)
    }
}

/// Configured shortcuts plus the arrow keys, which follow reading direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    next: String,
    prev: String,
    contents: String,
    direction: TextDirection,
}

impl KeyBindings {
    pub fn from_config(config: &AppConfig) -> Self {
        KeyBindings {
            next: normalize_shortcut(&config.key_next),
            prev: normalize_shortcut(&config.key_prev),
            contents: normalize_shortcut(&config.key_contents),
            direction: config.text_direction,
        }
    }

    pub fn intent_for_key(&self, key: &str) -> Option<NavIntent> {
        let pressed = normalize_shortcut(key);
        if pressed.is_empty() {
            return None;
        }
        if pressed == self.next {
            return Some(NavIntent::Advance);
        }
        if pressed == self.prev {
            return Some(NavIntent::Retreat);
        }
        if pressed == self.contents {
            return Some(NavIntent::OpenContents);
        }
        match (pressed.as_str(), self.direction) {
            ("right", TextDirection::Ltr) | ("left", TextDirection::Rtl) => Some(NavIntent::Advance),
            ("left", TextDirection::Ltr) | ("right", TextDirection::Rtl) => Some(NavIntent::Retreat),
            _ => None,
        }
    }
}

/// Canonical `mod+mod+key` form: lowercase, aliases folded, modifiers in a
/// fixed order.
pub fn normalize_shortcut(raw: &str) -> String {
    let mut ctrl = false;
    let mut alt = false;
    let mut logo = false;
    let mut shift = false;
    let mut key: Option<String> = None;

    for token in raw
        .split('+')
        .map(|token| token.trim().to_ascii_lowercase())
        .filter(|token| !token.is_empty())
    {
        match token.as_str() {
            "ctrl" | "control" => ctrl = true,
            "alt" | "option" => alt = true,
            "logo" | "meta" | "super" | "cmd" | "command" => logo = true,
            "shift" => shift = true,
            "arrowright" => key = Some("right".to_string()),
            "arrowleft" => key = Some("left".to_string()),
            "spacebar" => key = Some("space".to_string()),
            "pgdn" => key = Some("pagedown".to_string()),
            "pgup" => key = Some("pageup".to_string()),
            _ => key = Some(token),
        }
    }

    let Some(key) = key else {
        return String::new();
    };
    let mut parts: Vec<&str> = Vec::with_capacity(5);
    if ctrl {
        parts.push("ctrl");
    }
    if alt {
        parts.push("alt");
    }
    if logo {
        parts.push("logo");
    }
    if shift {
        parts.push("shift");
    }
    parts.push(&key);
    parts.join("+")
}
