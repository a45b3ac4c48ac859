/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// The active search/category pair. A [`Query`] decides which remote endpoint
/// is hit and when accumulated results become invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub search: String,
    pub category: String,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl Query {
    pub fn new(search: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            category: category.into(),
        }
    }

    /// True when a concrete category is selected. A selected category takes
    /// precedence over the search term; the two are never combined.
    pub fn has_category(&self) -> bool {
        !self.category.is_empty() && self.category != ALL_CATEGORIES
    }

    /// The term as sent to the search endpoint: trimmed, original case.
    pub fn search_param(&self) -> &str {
        self.search.trim()
    }

    /// Trimmed, lowercased term. Used for change detection and for
    /// client-side refinement, never on the wire.
    pub fn normalized_search(&self) -> String {
        self.search.trim().to_lowercase()
    }

    /// Comparison key deciding whether two queries address the same result
    /// set. Case and surrounding whitespace of the term do not count as a
    /// change.
    pub fn key(&self) -> (String, String) {
        (self.normalized_search(), self.category.clone())
    }
}

/// Display ordering applied by the view reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Insertion order, no reordering.
    Featured,
    PriceAsc,
    PriceDesc,
    RatingAsc,
    RatingDesc,
}

impl SortMode {
    /// Parse a user-supplied mode string. Unrecognized values fall back to
    /// rating-desc.
    pub fn parse(value: &str) -> Self {
        match value {
            "none" | "featured" => Self::Featured,
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            "rating-asc" => Self::RatingAsc,
            _ => Self::RatingDesc,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceAsc => "price ↑",
            Self::PriceDesc => "price ↓",
            Self::RatingAsc => "rating ↑",
            Self::RatingDesc => "rating ↓",
        }
    }

    /// Next mode in the cycle used by the sort hotkey.
    pub fn next(self) -> Self {
        match self {
            Self::Featured => Self::PriceAsc,
            Self::PriceAsc => Self::PriceDesc,
            Self::PriceDesc => Self::RatingAsc,
            Self::RatingAsc => Self::RatingDesc,
            Self::RatingDesc => Self::Featured,
        }
    }
}
