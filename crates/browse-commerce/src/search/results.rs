//! Search results and facets.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::ids::ProductCode;

/// The filtered and sorted product list for one evaluation.
///
/// Every evaluation builds a fresh vector; results never alias a previous
/// evaluation's storage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchResults {
    /// Matching products, in display order.
    pub items: Vec<Product>,
    /// Number of matching products.
    pub count: usize,
}

impl SearchResults {
    pub fn new(items: Vec<Product>) -> Self {
        let count = items.len();
        Self { items, count }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    /// Product codes in display order.
    pub fn codes(&self) -> Vec<&str> {
        self.items.iter().map(|p| p.code.as_str()).collect()
    }

    pub fn find(&self, code: &ProductCode) -> Option<&Product> {
        self.items.iter().find(|p| &p.code == code)
    }
}

/// One filter section (location, brand or condition) with its choices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Facet {
    /// Section title shown to the user.
    pub name: String,
    /// Product field the choices filter on.
    pub field: String,
    /// Choices in display order.
    pub values: Vec<FacetValue>,
}

impl Facet {
    pub fn terms(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            values: Vec::new(),
        }
    }

    /// Append a choice.
    pub fn add_value(&mut self, value: impl Into<String>, count: usize, selected: bool) {
        self.values.push(FacetValue {
            value: value.into(),
            count,
            selected,
        });
    }

    /// Values currently selected.
    pub fn selected(&self) -> impl Iterator<Item = &FacetValue> {
        self.values.iter().filter(|v| v.selected)
    }
}

/// A selectable choice and how many catalog products carry it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacetValue {
    pub value: String,
    /// Counted over the whole catalog, never the filtered subset.
    pub count: usize,
    pub selected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_products;

    #[test]
    fn test_search_results() {
        let results = SearchResults::new(sample_products().into_iter().take(3).collect());
        assert_eq!(results.len(), 3);
        assert_eq!(results.count, 3);
        assert!(!results.is_empty());
        assert_eq!(results.codes(), vec!["6916323", "8369263", "1094719"]);
        assert!(results.find(&ProductCode::new("1094719")).is_some());
    }

    #[test]
    fn test_empty_results() {
        let results = SearchResults::empty();
        assert!(results.is_empty());
        assert_eq!(results.len(), 0);
    }

    #[test]
    fn test_facet_selected() {
        let mut facet = Facet::terms("Brand", "brand");
        facet.add_value("Apple", 4, true);
        facet.add_value("Google", 1, false);
        let selected: Vec<_> = facet.selected().map(|v| v.value.as_str()).collect();
        assert_eq!(selected, vec!["Apple"]);
    }
}
