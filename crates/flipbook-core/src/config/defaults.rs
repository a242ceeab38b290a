use crate::pagination;

pub(crate) fn default_words_per_line() -> usize {
    pagination::DEFAULT_WORDS_PER_LINE
}

pub(crate) fn default_lines_per_page() -> usize {
    pagination::DEFAULT_LINES_PER_PAGE
}

pub(crate) fn default_words_per_page_estimate() -> usize {
    pagination::DEFAULT_WORDS_PER_PAGE_ESTIMATE
}

pub(crate) fn default_narrow_viewport_width() -> u32 {
    768
}

pub(crate) fn default_single_transition_ms() -> u64 {
    300
}

pub(crate) fn default_spread_transition_ms() -> u64 {
    600
}

pub(crate) fn default_swipe_threshold() -> f32 {
    crate::gesture::DEFAULT_SWIPE_THRESHOLD
}

pub(crate) fn default_key_next() -> String {
    "pagedown".to_string()
}

pub(crate) fn default_key_prev() -> String {
    "pageup".to_string()
}

pub(crate) fn default_key_contents() -> String {
    "ctrl+t".to_string()
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Debug
}

pub(crate) fn default_cache_dir() -> String {
    ".cache".to_string()
}
