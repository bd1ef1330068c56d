//! Product browsing core: catalog, filter/sort engine and live state.
//!
//! - **Catalog**: products, conditions, color variants, the catalog store
//! - **Search**: filter selection, sort options, the filter/sort engine
//! - **Live**: debounced text, deduplicated filters, async sessions, scripts
//!
//! # Example
//!
//! ```rust
//! use browse_commerce::prelude::*;
//!
//! let catalog = CatalogStore::sample();
//! let query = SearchQuery::new().with_text("iPhone");
//! let results = FilterEngine::new().evaluate(&catalog, &query);
//!
//! assert_eq!(results.count, 4);
//! assert_eq!(results.items[0].code.as_str(), "8369263");
//! ```

pub mod error;
pub mod ids;

pub mod catalog;
pub mod live;
pub mod search;

pub use error::CommerceError;
pub use ids::ProductCode;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductCode;

    // Catalog
    pub use crate::catalog::{
        format_price, CatalogStore, ColorVariant, Product, ProductCondition, Rgba,
    };

    // Search
    pub use crate::search::{
        Facet, FacetValue, FilterEngine, FilterState, FilterTag, PriceRange, SearchQuery,
        SearchResults, SortOption,
    };

    // Live
    pub use crate::live::{
        BrowseSession, Emission, Intent, InteractionScript, LiveConfig, LiveQuery, LiveStats,
    };
}
