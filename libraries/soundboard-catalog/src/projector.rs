//! View projection
//!
//! Derives the ordered display list from catalog state and the current
//! filter/search/sort criteria. Pure: nothing is mutated, and the same inputs
//! always produce the same sequence.

use crate::registry::CategoryRegistry;
use serde::{Deserialize, Serialize};
use soundboard_core::{CategoryId, Sound};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Which categories to show
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    /// Every category
    #[default]
    All,

    /// A single category
    Only(CategoryId),
}

impl CategoryFilter {
    /// Whether a sound passes this filter
    pub fn matches(&self, sound: &Sound) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => sound.category_id() == id,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    /// `all` selects everything, anything else is a category id
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(CategoryId::new(s)))
        }
    }
}

/// Display order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortMode {
    /// Catalog order
    #[default]
    #[serde(rename = "insertion")]
    Insertion,

    /// Name, A to Z
    #[serde(rename = "name-asc")]
    NameAscending,

    /// Name, Z to A
    #[serde(rename = "name-desc")]
    NameDescending,

    /// Category name, then sound name, both ascending
    #[serde(rename = "category")]
    CategoryThenName,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Insertion => "insertion",
            SortMode::NameAscending => "name-asc",
            SortMode::NameDescending => "name-desc",
            SortMode::CategoryThenName => "category",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "insertion" | "default" => Ok(SortMode::Insertion),
            "name-asc" | "name" => Ok(SortMode::NameAscending),
            "name-desc" => Ok(SortMode::NameDescending),
            "category" => Ok(SortMode::CategoryThenName),
            other => Err(format!("Unknown sort mode: {}", other)),
        }
    }
}

/// Current filter/search/sort selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewCriteria {
    #[serde(default)]
    pub filter: CategoryFilter,

    /// Case-insensitive substring matched against sound names
    #[serde(default)]
    pub search: String,

    #[serde(default)]
    pub sort: SortMode,
}

impl ViewCriteria {
    pub fn with_filter(mut self, filter: CategoryFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }
}

/// Compute the display list
///
/// 1. keep catalog order
/// 2. apply the category filter
/// 3. keep names containing the search term (case-insensitive)
/// 4. sort (stable, so ties keep catalog order)
pub fn project<'a>(
    sounds: &'a [Sound],
    categories: &CategoryRegistry,
    criteria: &ViewCriteria,
) -> Vec<&'a Sound> {
    let term = criteria.search.to_lowercase();

    let mut result: Vec<&Sound> = sounds
        .iter()
        .filter(|sound| criteria.filter.matches(sound))
        .filter(|sound| term.is_empty() || sound.name().to_lowercase().contains(&term))
        .collect();

    match criteria.sort {
        SortMode::Insertion => {}
        SortMode::NameAscending => result.sort_by(|a, b| compare_names(a.name(), b.name())),
        SortMode::NameDescending => result.sort_by(|a, b| compare_names(b.name(), a.name())),
        SortMode::CategoryThenName => result.sort_by(|a, b| {
            compare_names(
                categories.name_of(a.category_id()),
                categories.name_of(b.category_id()),
            )
            .then_with(|| compare_names(a.name(), b.name()))
        }),
    }

    result
}

/// Case-insensitive order with a byte-wise tie-break, so the order is total
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
