//! Runtime settings resolution. Everything lives for one invocation; nothing
//! is persisted to disk.

use crate::catalog::{Query, SortMode, ALL_CATEGORIES, API_BASE_ENV, DEFAULT_API_BASE};
use crate::ui::theme::Theme;

/// Environment variable selecting the initial palette ("light" or "dark").
pub const THEME_ENV: &str = "SHOPFRONT_THEME";

/// Raw CLI overrides as parsed by clap; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub theme: Option<String>,
}

/// Fully resolved settings the rest of the program runs on.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub search: String,
    pub category: String,
    pub sort: SortMode,
    pub theme: Theme,
}

impl Settings {
    pub fn initial_query(&self) -> Query {
        Query::new(self.search.clone(), self.category.clone())
    }
}

/// Resolve settings with precedence: CLI flag, then environment, then
/// default.
pub fn resolve(overrides: &Overrides) -> Settings {
    resolve_from(overrides, |key| std::env::var(key).ok())
}

fn resolve_from(overrides: &Overrides, env: impl Fn(&str) -> Option<String>) -> Settings {
    let base_url = overrides
        .base_url
        .clone()
        .or_else(|| env(API_BASE_ENV))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

    let theme = overrides
        .theme
        .clone()
        .or_else(|| env(THEME_ENV))
        .and_then(|value| Theme::parse(&value))
        .unwrap_or(Theme::Dark);

    Settings {
        base_url,
        search: overrides.search.clone().unwrap_or_default(),
        category: overrides
            .category
            .clone()
            .unwrap_or_else(|| ALL_CATEGORIES.to_string()),
        sort: overrides
            .sort
            .as_deref()
            .map(SortMode::parse)
            .unwrap_or(SortMode::Featured),
        theme,
    }
}
