//! The filter/sort pipeline.

use crate::catalog::{CatalogStore, Product};
use crate::search::{FilterState, SearchQuery, SearchResults};

/// Evaluates a [`SearchQuery`] against a catalog.
///
/// Stages run in a fixed order: text, location, brand, condition, price,
/// then a stable sort. Inputs are never mutated.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterEngine;

impl FilterEngine {
    pub fn new() -> Self {
        Self
    }

    /// Run the full pipeline and return a fresh result list.
    pub fn evaluate(&self, catalog: &CatalogStore, query: &SearchQuery) -> SearchResults {
        let needle = query.text.to_lowercase();
        let filter = &query.filter;

        let mut items: Vec<Product> = catalog
            .products()
            .iter()
            .filter(|p| needle.is_empty() || p.matches_text(&needle))
            .filter(|p| Self::passes_selections(p, filter))
            .filter(|p| filter.price.contains(p.price))
            .cloned()
            .collect();

        // `sort_by` is stable: equal keys keep catalog order.
        items.sort_by(|a, b| filter.sort.compare(a, b));

        SearchResults::new(items)
    }

    fn passes_selections(product: &Product, filter: &FilterState) -> bool {
        (filter.selected_locations.is_empty()
            || filter.selected_locations.contains(&product.location))
            && (filter.selected_brands.is_empty()
                || filter.selected_brands.contains(&product.brand))
            && (filter.selected_conditions.is_empty()
                || filter.selected_conditions.contains(&product.condition))
    }
}
