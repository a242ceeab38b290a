use crate::navigation::NavigatorSettings;
use crate::pagination::PaginationBudget;
use serde::Deserialize;
use ts_rs::TS;

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize, serde::Serialize)]
pub struct AppConfig {
    #[serde(default = "crate::config::defaults::default_words_per_line")]
    pub words_per_line: usize,
    #[serde(default = "crate::config::defaults::default_lines_per_page")]
    pub lines_per_page: usize,
    #[serde(default = "crate::config::defaults::default_words_per_page_estimate")]
    pub words_per_page_estimate: usize,
    #[serde(default = "crate::config::defaults::default_narrow_viewport_width")]
    pub narrow_viewport_width: u32,
    #[serde(default = "crate::config::defaults::default_single_transition_ms")]
    pub single_transition_ms: u64,
    #[serde(default = "crate::config::defaults::default_spread_transition_ms")]
    pub spread_transition_ms: u64,
    #[serde(default = "crate::config::defaults::default_swipe_threshold")]
    pub swipe_threshold: f32,
    #[serde(default)]
    pub text_direction: TextDirection,
    #[serde(default = "crate::config::defaults::default_key_next")]
    pub key_next: String,
    #[serde(default = "crate::config::defaults::default_key_prev")]
    pub key_prev: String,
    #[serde(default = "crate::config::defaults::default_key_contents")]
    pub key_contents: String,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_cache_dir")]
    pub cache_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        use crate::config::defaults::*;
        AppConfig {
            words_per_line: default_words_per_line(),
            lines_per_page: default_lines_per_page(),
            words_per_page_estimate: default_words_per_page_estimate(),
            narrow_viewport_width: default_narrow_viewport_width(),
            single_transition_ms: default_single_transition_ms(),
            spread_transition_ms: default_spread_transition_ms(),
            swipe_threshold: default_swipe_threshold(),
            text_direction: TextDirection::default(),
            key_next: default_key_next(),
            key_prev: default_key_prev(),
            key_contents: default_key_contents(),
            log_level: default_log_level(),
            cache_dir: default_cache_dir(),
        }
    }
}

impl AppConfig {
    pub fn pagination_budget(&self) -> PaginationBudget {
        PaginationBudget {
            words_per_line: self.words_per_line,
            lines_per_page: self.lines_per_page,
            words_per_page_estimate: self.words_per_page_estimate,
        }
        .normalized()
    }

    pub fn navigator_settings(&self) -> NavigatorSettings {
        NavigatorSettings {
            narrow_viewport_width: self.narrow_viewport_width,
            single_transition_ms: self.single_transition_ms,
            spread_transition_ms: self.spread_transition_ms,
        }
    }
}

/// Reading direction of the book text. Arrow keys follow it.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl std::fmt::Display for TextDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Debug
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
