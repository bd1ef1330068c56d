//! Filter selection state.

use std::collections::BTreeSet;
use std::fmt;

use crate::catalog::{format_price, ProductCondition};
use crate::search::SortOption;
use serde::{Deserialize, Serialize};

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub const DEFAULT_MIN: f64 = 0.0;
    pub const DEFAULT_MAX: f64 = 2000.0;

    /// Quick-select ranges offered next to the sliders.
    pub const PRESETS: [PriceRange; 3] = [
        PriceRange { min: 112.0, max: 200.0 },
        PriceRange { min: 920.0, max: 1200.0 },
        PriceRange { min: 1860.0, max: 2000.0 },
    ];

    /// Build a range, clamping misuse instead of rejecting it.
    ///
    /// NaN falls back to the default bound, negatives become zero, and a
    /// `min` above `max` is lowered to `max`.
    pub fn new(min: f64, max: f64) -> Self {
        let min = if min.is_nan() { Self::DEFAULT_MIN } else { min.max(0.0) };
        let max = if max.is_nan() { Self::DEFAULT_MAX } else { max.max(0.0) };
        Self {
            min: min.min(max),
            max,
        }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Chip label, e.g. `600$ - 700$`.
    pub fn label(&self) -> String {
        format!("{} - {}", format_price(self.min), format_price(self.max))
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

/// One removable chip describing an active filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterTag {
    Location(String),
    Brand(String),
    Condition(ProductCondition),
    Price(PriceRange),
}

impl FilterTag {
    pub fn label(&self) -> String {
        match self {
            FilterTag::Location(value) | FilterTag::Brand(value) => value.clone(),
            FilterTag::Condition(condition) => condition.display_name().to_string(),
            FilterTag::Price(range) => range.label(),
        }
    }
}

impl fmt::Display for FilterTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// The combined filter and sort selection.
///
/// Empty selection sets mean "no constraint". Structural equality is what
/// the live query deduplicates on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub selected_locations: BTreeSet<String>,
    #[serde(default)]
    pub selected_brands: BTreeSet<String>,
    #[serde(default)]
    pub selected_conditions: BTreeSet<ProductCondition>,
    #[serde(default)]
    pub price: PriceRange,
    #[serde(default)]
    pub sort: SortOption,
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if set.contains(&value) {
        set.remove(&value);
    } else {
        set.insert(value);
    }
}

impl FilterState {
    pub fn toggle_location(&mut self, location: impl Into<String>) {
        toggle(&mut self.selected_locations, location.into());
    }

    pub fn toggle_brand(&mut self, brand: impl Into<String>) {
        toggle(&mut self.selected_brands, brand.into());
    }

    pub fn toggle_condition(&mut self, condition: ProductCondition) {
        toggle(&mut self.selected_conditions, condition);
    }

    /// Replace both bounds; see [`PriceRange::new`] for clamping.
    pub fn set_price_range(&mut self, min: f64, max: f64) {
        self.price = PriceRange::new(min, max);
    }

    pub fn set_sort_option(&mut self, sort: SortOption) {
        self.sort = sort;
    }

    /// Back to defaults, sort option included.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether any selection narrows the dataset.
    pub fn has_active_filters(&self) -> bool {
        !self.selected_locations.is_empty()
            || !self.selected_brands.is_empty()
            || !self.selected_conditions.is_empty()
            || !self.price.is_default()
    }

    /// Chips in display order: locations, brands, conditions, price.
    pub fn active_tags(&self) -> Vec<FilterTag> {
        let mut tags: Vec<FilterTag> = self
            .selected_locations
            .iter()
            .cloned()
            .map(FilterTag::Location)
            .collect();
        tags.extend(self.selected_brands.iter().cloned().map(FilterTag::Brand));
        tags.extend(
            self.selected_conditions
                .iter()
                .copied()
                .map(FilterTag::Condition),
        );
        if !self.price.is_default() {
            tags.push(FilterTag::Price(self.price));
        }
        tags
    }

    /// Undo exactly the filter a chip describes.
    pub fn remove_tag(&mut self, tag: &FilterTag) {
        match tag {
            FilterTag::Location(value) => {
                self.selected_locations.remove(value);
            }
            FilterTag::Brand(value) => {
                self.selected_brands.remove(value);
            }
            FilterTag::Condition(condition) => {
                self.selected_conditions.remove(condition);
            }
            FilterTag::Price(_) => self.price = PriceRange::default(),
        }
    }
}
