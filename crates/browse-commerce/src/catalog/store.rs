//! Catalog store: the immutable product dataset for a session.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::catalog::{sample_products, Product, ProductCondition};
use crate::error::CommerceError;
use crate::ids::ProductCode;
use crate::search::{Facet, FilterState};

/// Owns the product sequence and derives filter choices from it.
///
/// Cloning shares the underlying dataset.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    products: Arc<[Product]>,
}

impl CatalogStore {
    /// Create a store over an explicit product list.
    pub fn from_products(products: Vec<Product>) -> Self {
        Self {
            products: products.into(),
        }
    }

    /// Create a store over the bundled sample dataset.
    pub fn sample() -> Self {
        Self::from_products(sample_products())
    }

    /// Load a store from a JSON array of products.
    ///
    /// Product codes must be unique.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        let mut seen = HashSet::with_capacity(products.len());
        if let Some(dup) = products.iter().find(|p| !seen.insert(&p.code)) {
            return Err(CommerceError::DuplicateProduct(dup.code.to_string()));
        }
        Ok(Self::from_products(products))
    }

    /// All products, in load order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Sorted, duplicate-free locations.
    pub fn available_locations(&self) -> Vec<String> {
        self.distinct(|p| &p.location)
    }

    /// Sorted, duplicate-free brands.
    pub fn available_brands(&self) -> Vec<String> {
        self.distinct(|p| &p.brand)
    }

    fn distinct<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&Product) -> &String,
    {
        self.products
            .iter()
            .map(field)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Number of products satisfying `predicate`, over the whole dataset.
    pub fn count_matching<P>(&self, predicate: P) -> usize
    where
        P: Fn(&Product) -> bool,
    {
        self.products.iter().filter(|p| predicate(p)).count()
    }

    pub fn location_count(&self, location: &str) -> usize {
        self.count_matching(|p| p.location == location)
    }

    pub fn brand_count(&self, brand: &str) -> usize {
        self.count_matching(|p| p.brand == brand)
    }

    pub fn condition_count(&self, condition: ProductCondition) -> usize {
        self.count_matching(|p| p.condition == condition)
    }

    /// Filter choices with their counts, marked against `filter`.
    ///
    /// Counts always cover the full dataset; they do not narrow as other
    /// filters are applied.
    pub fn facets(&self, filter: &FilterState) -> Vec<Facet> {
        let mut locations = Facet::terms("Location", "location");
        for location in self.available_locations() {
            let count = self.location_count(&location);
            let selected = filter.selected_locations.contains(&location);
            locations.add_value(location, count, selected);
        }

        let mut brands = Facet::terms("Brand", "brand");
        for brand in self.available_brands() {
            let count = self.brand_count(&brand);
            let selected = filter.selected_brands.contains(&brand);
            brands.add_value(brand, count, selected);
        }

        let mut conditions = Facet::terms("Condition", "condition");
        for condition in ProductCondition::ALL {
            conditions.add_value(
                condition.display_name(),
                self.condition_count(condition),
                filter.selected_conditions.contains(&condition),
            );
        }

        vec![locations, brands, conditions]
    }

    /// Look up a product by code.
    pub fn find(&self, code: &ProductCode) -> Option<&Product> {
        self.products.iter().find(|p| &p.code == code)
    }

    /// Look up a product by code, failing when absent.
    pub fn get(&self, code: &ProductCode) -> Result<&Product, CommerceError> {
        self.find(code)
            .ok_or_else(|| CommerceError::ProductNotFound(code.to_string()))
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_locations_sorted_unique() {
        let store = CatalogStore::sample();
        assert_eq!(
            store.available_locations(),
            vec!["Edinburgh", "London", "Manchester"]
        );
    }

    #[test]
    fn test_available_brands_sorted_unique() {
        let store = CatalogStore::sample();
        assert_eq!(
            store.available_brands(),
            vec!["Apple", "Google", "Huawei", "Nothing", "OnePlus", "Samsung", "Xiaomi"]
        );
    }

    #[test]
    fn test_choice_counts() {
        let store = CatalogStore::sample();
        assert_eq!(store.location_count("London"), 4);
        assert_eq!(store.location_count("Manchester"), 3);
        assert_eq!(store.location_count("Edinburgh"), 3);
        assert_eq!(store.brand_count("Apple"), 4);
        assert_eq!(store.condition_count(ProductCondition::New), 7);
        assert_eq!(store.condition_count(ProductCondition::LikeNew), 2);
        assert_eq!(store.condition_count(ProductCondition::Good), 1);
        assert_eq!(store.condition_count(ProductCondition::Fair), 0);
    }

    #[test]
    fn test_facet_counts_ignore_other_filters() {
        let store = CatalogStore::sample();
        let mut filter = FilterState::default();
        filter.toggle_brand("Huawei");

        let facets = store.facets(&filter);
        let locations = &facets[0];
        let london = locations.values.iter().find(|v| v.value == "London").unwrap();
        assert_eq!(london.count, 4);
        assert!(!london.selected);

        let brands = &facets[1];
        let huawei = brands.values.iter().find(|v| v.value == "Huawei").unwrap();
        assert!(huawei.selected);
    }

    #[test]
    fn test_get_missing_product() {
        let store = CatalogStore::sample();
        assert!(store.get(&ProductCode::new("5678901")).is_ok());
        assert!(matches!(
            store.get(&ProductCode::new("nope")),
            Err(CommerceError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r##"[{
            "code": "1", "name": "Phone", "price": 10.0, "rating": 4.0,
            "reviewCount": 3, "brand": "B", "category": "C",
            "location": "L", "condition": "Like New",
            "colors": [{"name": "Red", "colorHex": "#F00"}]
        }]"##;
        let store = CatalogStore::from_json(json).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.products()[0].condition, ProductCondition::LikeNew);
        assert_eq!(store.products()[0].colors[0].hex, "#F00");
        assert!(CatalogStore::from_json("not json").is_err());
    }

    #[test]
    fn test_from_json_rejects_duplicate_codes() {
        let entry = r##"{
            "code": "42", "name": "Phone", "price": 10.0, "rating": 4.0,
            "reviewCount": 3, "brand": "B", "category": "C",
            "location": "L", "condition": "New", "colors": []
        }"##;
        let json = format!("[{entry}, {entry}]");
        match CatalogStore::from_json(&json) {
            Err(CommerceError::DuplicateProduct(code)) => assert_eq!(code, "42"),
            other => panic!("expected duplicate error, got {:?}", other),
        }
    }
}
