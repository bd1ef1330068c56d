//! Bundled sample dataset.

use crate::catalog::{ColorVariant, Product, ProductCondition};
use crate::ids::ProductCode;

struct Listing<'a> {
    code: &'a str,
    name: &'a str,
    price: f64,
    original_price: Option<f64>,
    discount: Option<&'a str>,
    rating: f64,
    review_count: u32,
    colors: &'a [(&'a str, &'a str)],
    image_name: &'a str,
    brand: &'a str,
    location: &'a str,
    condition: ProductCondition,
    storage: &'a str,
}

impl Listing<'_> {
    fn build(&self) -> Product {
        Product {
            code: ProductCode::new(self.code),
            name: self.name.to_string(),
            price: self.price,
            original_price: self.original_price,
            discount: self.discount.map(str::to_string),
            rating: self.rating,
            review_count: self.review_count,
            colors: self
                .colors
                .iter()
                .map(|(name, hex)| ColorVariant::new(*name, *hex))
                .collect(),
            image_name: self.image_name.to_string(),
            brand: self.brand.to_string(),
            category: "Smartphone".to_string(),
            location: self.location.to_string(),
            condition: self.condition,
            storage: Some(self.storage.to_string()),
        }
    }
}

const LISTINGS: &[Listing<'static>] = &[
    Listing {
        code: "6916323",
        name: "iPhone 14 Pro Max 256GB (Deep Purple)",
        price: 666.0,
        original_price: Some(720.0),
        discount: Some("-5%"),
        rating: 4.5,
        review_count: 20,
        colors: &[
            ("Deep Purple", "#4A4A4A"),
            ("Purple", "#8E5EBF"),
            ("Gold", "#F9E79F"),
            ("Silver", "#C0C0C0"),
        ],
        image_name: "iphone14promax",
        brand: "Apple",
        location: "London",
        condition: ProductCondition::New,
        storage: "256GB",
    },
    Listing {
        code: "8369263",
        name: "APPLE iPhone 15 Plus 256GB (Green)",
        price: 759.0,
        original_price: Some(799.0),
        discount: Some("-5%"),
        rating: 4.7,
        review_count: 48,
        colors: &[
            ("Black", "#000000"),
            ("Blue", "#4A90E2"),
            ("Green", "#7ED321"),
            ("Yellow", "#F5A623"),
            ("Pink", "#E91E63"),
        ],
        image_name: "iphone15plus",
        brand: "Apple",
        location: "London",
        condition: ProductCondition::New,
        storage: "256GB",
    },
    Listing {
        code: "1094719",
        name: "APPLE iPhone 11 128GB (Black)",
        price: 529.0,
        original_price: None,
        discount: None,
        rating: 4.3,
        review_count: 463,
        colors: &[
            ("Black", "#000000"),
            ("Red", "#FF0000"),
            ("Purple", "#8E5EBF"),
        ],
        image_name: "iphone11",
        brand: "Apple",
        location: "Manchester",
        condition: ProductCondition::LikeNew,
        storage: "128GB",
    },
    Listing {
        code: "5892582",
        name: "APPLE iPhone 13 256GB (Midnight)",
        price: 569.0,
        original_price: Some(599.0),
        discount: Some("-5%"),
        rating: 4.6,
        review_count: 252,
        colors: &[
            ("Space Gray", "#4A4A4A"),
            ("Silver", "#C0C0C0"),
            ("Gold", "#F9E79F"),
        ],
        image_name: "iphone13",
        brand: "Apple",
        location: "Edinburgh",
        condition: ProductCondition::New,
        storage: "256GB",
    },
    Listing {
        code: "7891234",
        name: "Samsung Galaxy S22 Ultra 512GB (Phantom Black)",
        price: 899.0,
        original_price: Some(1099.0),
        discount: Some("-18%"),
        rating: 4.4,
        review_count: 186,
        colors: &[
            ("Phantom Black", "#000000"),
            ("Phantom White", "#FFFFFF"),
            ("Burgundy", "#800020"),
        ],
        image_name: "galaxys22",
        brand: "Samsung",
        location: "London",
        condition: ProductCondition::New,
        storage: "512GB",
    },
    Listing {
        code: "2345678",
        name: "Google Pixel 7 Pro 256GB (Snow)",
        price: 649.0,
        original_price: Some(749.0),
        discount: Some("-13%"),
        rating: 4.2,
        review_count: 94,
        colors: &[
            ("Snow", "#FFFFFF"),
            ("Obsidian", "#000000"),
            ("Hazel", "#8B7355"),
        ],
        image_name: "pixel7",
        brand: "Google",
        location: "Manchester",
        condition: ProductCondition::LikeNew,
        storage: "256GB",
    },
    Listing {
        code: "3456789",
        name: "OnePlus 11 5G 256GB (Titan Black)",
        price: 599.0,
        original_price: Some(699.0),
        discount: Some("-14%"),
        rating: 4.1,
        review_count: 73,
        colors: &[("Titan Black", "#2C2C2C"), ("Eternal Green", "#355E3B")],
        image_name: "oneplus11",
        brand: "OnePlus",
        location: "Edinburgh",
        condition: ProductCondition::New,
        storage: "256GB",
    },
    Listing {
        code: "4567890",
        name: "Xiaomi 13 Pro 512GB (Ceramic White)",
        price: 749.0,
        original_price: Some(899.0),
        discount: Some("-17%"),
        rating: 4.0,
        review_count: 128,
        colors: &[
            ("Ceramic White", "#FFFFFF"),
            ("Ceramic Black", "#000000"),
            ("Flora Green", "#228B22"),
        ],
        image_name: "xiaomi13pro",
        brand: "Xiaomi",
        location: "London",
        condition: ProductCondition::New,
        storage: "512GB",
    },
    Listing {
        code: "5678901",
        name: "Huawei P50 Pro 256GB (Golden Black)",
        price: 459.0,
        original_price: Some(599.0),
        discount: Some("-23%"),
        rating: 3.9,
        review_count: 67,
        colors: &[
            ("Golden Black", "#2F2F2F"),
            ("Pearl White", "#F8F8FF"),
            ("Cocoa Gold", "#B8860B"),
        ],
        image_name: "huaweip50",
        brand: "Huawei",
        location: "Manchester",
        condition: ProductCondition::Good,
        storage: "256GB",
    },
    Listing {
        code: "6789012",
        name: "Nothing Phone (2) 512GB (White)",
        price: 579.0,
        original_price: Some(649.0),
        discount: Some("-11%"),
        rating: 4.3,
        review_count: 89,
        colors: &[("White", "#FFFFFF"), ("Dark Gray", "#2F2F2F")],
        image_name: "nothingphone2",
        brand: "Nothing",
        location: "Edinburgh",
        condition: ProductCondition::New,
        storage: "512GB",
    },
];

/// The ten bundled sample products, in load order.
pub fn sample_products() -> Vec<Product> {
    LISTINGS.iter().map(Listing::build).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_size_and_order() {
        let products = sample_products();
        assert_eq!(products.len(), 10);
        assert_eq!(products[0].code.as_str(), "6916323");
        assert_eq!(products[9].code.as_str(), "6789012");
    }

    #[test]
    fn test_only_iphone_11_is_undiscounted() {
        let undiscounted: Vec<_> = sample_products()
            .into_iter()
            .filter(|p| !p.has_discount())
            .map(|p| p.code.into_inner())
            .collect();
        assert_eq!(undiscounted, vec!["1094719".to_string()]);
    }

    #[test]
    fn test_every_swatch_decodes() {
        for product in sample_products() {
            for color in &product.colors {
                assert!(color.rgba().is_some(), "{} {}", product.code, color.hex);
            }
        }
    }
}
