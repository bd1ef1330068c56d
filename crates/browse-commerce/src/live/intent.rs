//! User gestures the live query reacts to.

use serde::{Deserialize, Serialize};

use crate::catalog::ProductCondition;
use crate::ids::ProductCode;
use crate::search::SortOption;

/// A single user gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Intent {
    /// The search field now reads `text`.
    Type { text: String },
    ToggleLocation { value: String },
    ToggleBrand { value: String },
    ToggleCondition { value: ProductCondition },
    SetPriceRange { min: f64, max: f64 },
    SetSort { value: SortOption },
    /// Reset every filter and empty the search field.
    ClearFilters,
    /// Open the detail view for a product.
    SelectProduct { code: ProductCode },
    ClearSelection,
}

impl Intent {
    /// Whether this gesture edits the search text stream.
    pub fn is_keystroke(&self) -> bool {
        matches!(self, Intent::Type { .. })
    }
}
