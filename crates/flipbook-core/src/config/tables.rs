use super::defaults;
use super::models::{AppConfig, LogLevel, TextDirection};
use serde::Deserialize;

/// On-disk layout of `config.toml`: one table per concern.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    pagination: PaginationConfig,
    #[serde(default)]
    navigation: NavigationConfig,
    #[serde(default)]
    input: InputConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    cache: CacheConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            words_per_line: tables.pagination.words_per_line,
            lines_per_page: tables.pagination.lines_per_page,
            words_per_page_estimate: tables.pagination.words_per_page_estimate,
            narrow_viewport_width: tables.navigation.narrow_viewport_width,
            single_transition_ms: tables.navigation.single_transition_ms,
            spread_transition_ms: tables.navigation.spread_transition_ms,
            swipe_threshold: tables.navigation.swipe_threshold,
            text_direction: tables.input.text_direction,
            key_next: tables.input.key_next,
            key_prev: tables.input.key_prev,
            key_contents: tables.input.key_contents,
            log_level: tables.logging.log_level,
            cache_dir: tables.cache.cache_dir,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            pagination: PaginationConfig {
                words_per_line: config.words_per_line,
                lines_per_page: config.lines_per_page,
                words_per_page_estimate: config.words_per_page_estimate,
            },
            navigation: NavigationConfig {
                narrow_viewport_width: config.narrow_viewport_width,
                single_transition_ms: config.single_transition_ms,
                spread_transition_ms: config.spread_transition_ms,
                swipe_threshold: config.swipe_threshold,
            },
            input: InputConfig {
                text_direction: config.text_direction,
                key_next: config.key_next.clone(),
                key_prev: config.key_prev.clone(),
                key_contents: config.key_contents.clone(),
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            cache: CacheConfig {
                cache_dir: config.cache_dir.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct PaginationConfig {
    #[serde(default = "defaults::default_words_per_line")]
    words_per_line: usize,
    #[serde(default = "defaults::default_lines_per_page")]
    lines_per_page: usize,
    #[serde(default = "defaults::default_words_per_page_estimate")]
    words_per_page_estimate: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        PaginationConfig {
            words_per_line: defaults::default_words_per_line(),
            lines_per_page: defaults::default_lines_per_page(),
            words_per_page_estimate: defaults::default_words_per_page_estimate(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct NavigationConfig {
    #[serde(default = "defaults::default_narrow_viewport_width")]
    narrow_viewport_width: u32,
    #[serde(default = "defaults::default_single_transition_ms")]
    single_transition_ms: u64,
    #[serde(default = "defaults::default_spread_transition_ms")]
    spread_transition_ms: u64,
    #[serde(default = "defaults::default_swipe_threshold")]
    swipe_threshold: f32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        NavigationConfig {
            narrow_viewport_width: defaults::default_narrow_viewport_width(),
            single_transition_ms: defaults::default_single_transition_ms(),
            spread_transition_ms: defaults::default_spread_transition_ms(),
            swipe_threshold: defaults::default_swipe_threshold(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct InputConfig {
    #[serde(default)]
    text_direction: TextDirection,
    #[serde(default = "defaults::default_key_next")]
    key_next: String,
    #[serde(default = "defaults::default_key_prev")]
    key_prev: String,
    #[serde(default = "defaults::default_key_contents")]
    key_contents: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            text_direction: TextDirection::default(),
            key_next: defaults::default_key_next(),
            key_prev: defaults::default_key_prev(),
            key_contents: defaults::default_key_contents(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct CacheConfig {
    #[serde(default = "defaults::default_cache_dir")]
    cache_dir: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            cache_dir: defaults::default_cache_dir(),
        }
    }
}
