//! Product, color variant and condition types.

use crate::error::CommerceError;
use crate::ids::ProductCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical condition of a listed product.
///
/// Declaration order is the display order of the filter choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProductCondition {
    #[serde(rename = "New")]
    New,
    #[serde(rename = "Like New")]
    LikeNew,
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Fair")]
    Fair,
}

impl ProductCondition {
    /// Every condition, in display order.
    pub const ALL: [ProductCondition; 4] = [
        ProductCondition::New,
        ProductCondition::LikeNew,
        ProductCondition::Good,
        ProductCondition::Fair,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ProductCondition::New => "New",
            ProductCondition::LikeNew => "Like New",
            ProductCondition::Good => "Good",
            ProductCondition::Fair => "Fair",
        }
    }
}

impl fmt::Display for ProductCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ProductCondition {
    type Err = CommerceError;

    /// Accepts display names ("Like New") as well as "like-new" / "like_new".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "new" => Ok(ProductCondition::New),
            "likenew" => Ok(ProductCondition::LikeNew),
            "good" => Ok(ProductCondition::Good),
            "fair" => Ok(ProductCondition::Fair),
            _ => Err(CommerceError::UnknownCondition(s.to_string())),
        }
    }
}

/// An RGBA color decoded from a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Format as `rgba(r, g, b, a)` with alpha in 0.0-1.0.
    pub fn css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {:.2})",
            self.r,
            self.g,
            self.b,
            self.a as f64 / 255.0
        )
    }
}

/// A named color option of a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorVariant {
    /// Display name (e.g., "Deep Purple").
    pub name: String,
    /// Hex value: `#RGB`, `#RRGGBB` or `#AARRGGBB`.
    #[serde(alias = "colorHex")]
    pub hex: String,
}

impl ColorVariant {
    pub fn new(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
        }
    }

    /// Decode the hex value.
    ///
    /// Three digits expand each nibble (x17), six digits are opaque RGB,
    /// eight digits are ARGB. Anything else is `None`.
    pub fn rgba(&self) -> Option<Rgba> {
        let digits: String = self
            .hex
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        let value = u32::from_str_radix(&digits, 16).ok()?;
        let byte = |shift: u32| ((value >> shift) & 0xFF) as u8;

        match digits.len() {
            3 => {
                let nibble = |shift: u32| (((value >> shift) & 0xF) * 17) as u8;
                Some(Rgba {
                    r: nibble(8),
                    g: nibble(4),
                    b: nibble(0),
                    a: 255,
                })
            }
            6 => Some(Rgba {
                r: byte(16),
                g: byte(8),
                b: byte(0),
                a: 255,
            }),
            8 => Some(Rgba {
                a: byte(24),
                r: byte(16),
                g: byte(8),
                b: byte(0),
            }),
            _ => None,
        }
    }
}

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Human-facing SKU; identity of the product.
    pub code: ProductCode,
    /// Display name.
    pub name: String,
    /// Current selling price.
    pub price: f64,
    /// Pre-discount price, present only when a discount applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    /// Discount badge text (e.g., "-5%").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    /// Average rating, 0.0 to 5.0.
    pub rating: f64,
    /// Number of reviews.
    pub review_count: u32,
    /// Color options, in display order.
    #[serde(default)]
    pub colors: Vec<ColorVariant>,
    /// Asset key for the product image.
    #[serde(default)]
    pub image_name: String,
    pub brand: String,
    pub category: String,
    pub location: String,
    pub condition: ProductCondition,
    /// Storage capacity label (e.g., "256GB").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
}

impl Product {
    /// Whether both the reference price and the discount badge are present.
    pub fn has_discount(&self) -> bool {
        self.original_price.is_some() && self.discount.is_some()
    }

    /// The price shown as current.
    pub fn current_price(&self) -> f64 {
        self.price
    }

    /// The struck-through reference price, when a discount applies.
    pub fn reference_price(&self) -> Option<f64> {
        if self.has_discount() {
            self.original_price
        } else {
            None
        }
    }

    /// Legacy accessor: returns the *pre-discount* price when one is set.
    ///
    /// The name does not match the value. Use [`Product::current_price`] and
    /// [`Product::reference_price`] for display.
    pub fn discounted_price(&self) -> f64 {
        self.original_price.unwrap_or(self.price)
    }

    /// The first `limit` color swatches.
    pub fn visible_colors(&self, limit: usize) -> &[ColorVariant] {
        &self.colors[..self.colors.len().min(limit)]
    }

    /// Number of swatches collapsed into the "+N" badge.
    pub fn hidden_color_count(&self, limit: usize) -> usize {
        self.colors.len().saturating_sub(limit)
    }

    /// Case-insensitive substring match on name, brand or code.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.brand.to_lowercase().contains(needle)
            || self.code.as_str().to_lowercase().contains(needle)
    }
}

/// Whole-unit price label, e.g. `666$`.
pub fn format_price(price: f64) -> String {
    format!("{}$", price.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone() -> Product {
        Product {
            code: ProductCode::new("0000001"),
            name: "Test Phone 128GB (Blue)".to_string(),
            price: 500.0,
            original_price: Some(550.0),
            discount: Some("-9%".to_string()),
            rating: 4.2,
            review_count: 10,
            colors: vec![
                ColorVariant::new("Blue", "#4A90E2"),
                ColorVariant::new("Black", "#000000"),
                ColorVariant::new("White", "#FFFFFF"),
                ColorVariant::new("Red", "#FF0000"),
                ColorVariant::new("Green", "#7ED321"),
                ColorVariant::new("Pink", "#E91E63"),
            ],
            image_name: "testphone".to_string(),
            brand: "Acme".to_string(),
            category: "Smartphone".to_string(),
            location: "London".to_string(),
            condition: ProductCondition::New,
            storage: Some("128GB".to_string()),
        }
    }

    #[test]
    fn test_has_discount_requires_both_fields() {
        let mut p = phone();
        assert!(p.has_discount());
        assert_eq!(p.reference_price(), Some(550.0));
        assert_eq!(p.current_price(), 500.0);

        p.discount = None;
        assert!(!p.has_discount());
        assert_eq!(p.reference_price(), None);
    }

    #[test]
    fn test_discounted_price_keeps_legacy_value() {
        let mut p = phone();
        assert_eq!(p.discounted_price(), 550.0);
        p.original_price = None;
        assert_eq!(p.discounted_price(), 500.0);
    }

    #[test]
    fn test_swatch_overflow() {
        let p = phone();
        assert_eq!(p.visible_colors(4).len(), 4);
        assert_eq!(p.hidden_color_count(4), 2);
        assert_eq!(p.visible_colors(10).len(), 6);
        assert_eq!(p.hidden_color_count(10), 0);
    }

    #[test]
    fn test_matches_text() {
        let p = phone();
        assert!(p.matches_text("test phone"));
        assert!(p.matches_text("acme"));
        assert!(p.matches_text("0001"));
        assert!(!p.matches_text("iphone"));
    }

    #[test]
    fn test_rgba_six_digits() {
        let c = ColorVariant::new("Purple", "#8E5EBF");
        assert_eq!(
            c.rgba(),
            Some(Rgba {
                r: 0x8E,
                g: 0x5E,
                b: 0xBF,
                a: 255
            })
        );
    }

    #[test]
    fn test_rgba_three_and_eight_digits() {
        let short = ColorVariant::new("Red", "#F00");
        assert_eq!(
            short.rgba(),
            Some(Rgba {
                r: 255,
                g: 0,
                b: 0,
                a: 255
            })
        );

        let argb = ColorVariant::new("Glass", "#80FFFFFF");
        assert_eq!(argb.rgba().map(|c| c.a), Some(0x80));
    }

    #[test]
    fn test_rgba_rejects_bad_input() {
        assert_eq!(ColorVariant::new("x", "#12345").rgba(), None);
        assert_eq!(ColorVariant::new("x", "#GGGGGG").rgba(), None);
        assert_eq!(ColorVariant::new("x", "").rgba(), None);
    }

    #[test]
    fn test_condition_parse() {
        assert_eq!("Like New".parse::<ProductCondition>().unwrap(), ProductCondition::LikeNew);
        assert_eq!("like-new".parse::<ProductCondition>().unwrap(), ProductCondition::LikeNew);
        assert_eq!("GOOD".parse::<ProductCondition>().unwrap(), ProductCondition::Good);
        assert!("mint".parse::<ProductCondition>().is_err());
    }

    #[test]
    fn test_condition_serde_uses_display_names() {
        let json = serde_json::to_string(&ProductCondition::LikeNew).unwrap();
        assert_eq!(json, "\"Like New\"");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(666.0), "666$");
        assert_eq!(format_price(1099.99), "1099$");
    }
}
