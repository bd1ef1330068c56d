//! Search module.
//!
//! Contains the filter state, sort options, the filter/sort engine and
//! the result and facet types.

mod engine;
mod filter;
mod query;
mod results;

pub use engine::FilterEngine;
pub use filter::{FilterState, FilterTag, PriceRange};
pub use query::{SearchQuery, SortOption};
pub use results::{Facet, FacetValue, SearchResults};
