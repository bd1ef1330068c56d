//! Sort options and the evaluation input snapshot.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::search::FilterState;
use serde::{Deserialize, Serialize};

/// Sort options for the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOption {
    /// Sort by price, high to low.
    #[default]
    #[serde(rename = "Highest Price")]
    HighestPrice,
    /// Sort by price, low to high.
    #[serde(rename = "Lowest Price")]
    LowestPrice,
    /// Sort by rating, best first.
    #[serde(rename = "Rating")]
    Rating,
    /// Sort by review count, most first.
    #[serde(rename = "Reviews")]
    Reviews,
}

impl SortOption {
    /// Every option, in menu order.
    pub const ALL: [SortOption; 4] = [
        SortOption::HighestPrice,
        SortOption::LowestPrice,
        SortOption::Rating,
        SortOption::Reviews,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::HighestPrice => "Highest Price",
            SortOption::LowestPrice => "Lowest Price",
            SortOption::Rating => "Rating",
            SortOption::Reviews => "Reviews",
        }
    }

    /// Compare two products under this option.
    ///
    /// Equal keys compare `Equal`, so a stable sort keeps their input order.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::HighestPrice => b.price.total_cmp(&a.price),
            SortOption::LowestPrice => a.price.total_cmp(&b.price),
            SortOption::Rating => b.rating.total_cmp(&a.rating),
            SortOption::Reviews => b.review_count.cmp(&a.review_count),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for SortOption {
    type Err = CommerceError;

    /// Accepts display names plus the short forms `price_desc`, `price_asc`,
    /// `rating` and `reviews`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "highestprice" | "pricedesc" | "highest" => Ok(SortOption::HighestPrice),
            "lowestprice" | "priceasc" | "lowest" => Ok(SortOption::LowestPrice),
            "rating" => Ok(SortOption::Rating),
            "reviews" => Ok(SortOption::Reviews),
            _ => Err(CommerceError::UnknownSortOption(s.to_string())),
        }
    }
}

/// One evaluation input: the settled search text and a filter snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free text; empty matches everything.
    #[serde(default)]
    pub text: String,
    /// Filter and sort selection.
    #[serde(default)]
    pub filter: FilterState,
}

impl SearchQuery {
    /// Create a query with default filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Replace the filter state.
    pub fn with_filter(mut self, filter: FilterState) -> Self {
        self.filter = filter;
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.filter.sort = sort;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_parse() {
        assert_eq!("Highest Price".parse::<SortOption>().unwrap(), SortOption::HighestPrice);
        assert_eq!("price_asc".parse::<SortOption>().unwrap(), SortOption::LowestPrice);
        assert_eq!("REVIEWS".parse::<SortOption>().unwrap(), SortOption::Reviews);
        assert!("newest".parse::<SortOption>().is_err());
    }

    #[test]
    fn test_default_sort_is_highest_price() {
        assert_eq!(SortOption::default(), SortOption::HighestPrice);
        assert_eq!(SearchQuery::new().filter.sort, SortOption::HighestPrice);
    }

    #[test]
    fn test_query_builder() {
        let query = SearchQuery::new()
            .with_text("iphone")
            .with_sort(SortOption::Rating);
        assert_eq!(query.text, "iphone");
        assert_eq!(query.filter.sort, SortOption::Rating);
    }
}
