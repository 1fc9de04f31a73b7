use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "score")]
    Score,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "checkinCount")]
    CheckinCount,
}

impl SortKey {
    /// Field name understood by the catalog's `sortBy` parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            SortKey::Score => "score",
            SortKey::Name => "name",
            SortKey::CheckinCount => "checkinCount",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "score" => Ok(SortKey::Score),
            "name" => Ok(SortKey::Name),
            "checkincount" | "checkins" => Ok(SortKey::CheckinCount),
            _ => Err(format!("Unknown sort key: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_param(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(format!("Unknown sort direction: {s}")),
        }
    }
}

/// Which backend call a listing fetch turns into. Derived from
/// [`QueryParameters`] at request time and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RetrievalMode {
    SortedBrowse { sort: SortKey, direction: SortDirection },
    TagFilter { tag: String },
    KeywordSearch { keyword: String },
}

/// Listing state owned by the catalog controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryParameters {
    pub page: u32,
    pub page_size: u32,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub free_text_term: Option<String>,
    pub flavor_tag_filter: Option<String>,
}

impl QueryParameters {
    pub const DEFAULT_PAGE_SIZE: u32 = 20;

    pub fn with_page_size(page_size: u32) -> Result<Self, String> {
        if page_size == 0 {
            return Err("Page size must be positive".into());
        }
        Ok(Self {
            page_size,
            ..Self::default()
        })
    }

    /// Precedence: tag filter, then keyword, then sorted browse. Blank
    /// strings count as unset.
    pub fn retrieval_mode(&self) -> RetrievalMode {
        if let Some(tag) = non_blank(&self.flavor_tag_filter) {
            return RetrievalMode::TagFilter { tag: tag.to_string() };
        }
        if let Some(keyword) = non_blank(&self.free_text_term) {
            return RetrievalMode::KeywordSearch {
                keyword: keyword.to_string(),
            };
        }
        RetrievalMode::SortedBrowse {
            sort: self.sort_key,
            direction: self.sort_direction,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: Self::DEFAULT_PAGE_SIZE,
            sort_key: SortKey::Score,
            sort_direction: SortDirection::Desc,
            free_text_term: None,
            flavor_tag_filter: None,
        }
    }
}
