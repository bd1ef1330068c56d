//! Product catalog module.
//!
//! Contains the product model, the bundled sample dataset and the
//! catalog store that owns it for a session.

mod product;
mod sample;
mod store;

pub use product::{format_price, ColorVariant, Product, ProductCondition, Rgba};
pub use sample::sample_products;
pub use store::CatalogStore;
