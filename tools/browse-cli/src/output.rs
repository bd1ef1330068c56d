//! Output formatting for the CLI.

use browse_commerce::catalog::{format_price, Product, ProductCondition};
use console::{style, StyledObject};

/// Human-readable messages go to stdout, diagnostics to stderr. In JSON
/// mode only [`Output::json`] and errors are printed.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    fn line(&self, marker: StyledObject<&str>, msg: &str) {
        if !self.json {
            println!("{} {}", marker, msg);
        }
    }

    pub fn info(&self, msg: &str) {
        self.line(style("ℹ").blue(), msg);
    }

    pub fn success(&self, msg: &str) {
        self.line(style("✓").green(), msg);
    }

    pub fn list_item(&self, item: &str) {
        self.line(style("  •").dim(), item);
    }

    pub fn warn(&self, msg: &str) {
        if !self.json {
            eprintln!("{} {}", style("⚠").yellow(), msg);
        }
    }

    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Verbose-only diagnostics.
    pub fn debug(&self, msg: &str) {
        if self.verbose && !self.json {
            eprintln!("{} {}", style("→").dim(), style(msg).dim());
        }
    }

    pub fn header(&self, msg: &str) {
        if !self.json {
            println!("\n{}", style(msg).bold().underlined());
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    /// Pretty-printed JSON, printed in every mode.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Products as a fixed-width table.
    pub fn product_table(&self, products: &[Product], swatch_limit: usize) {
        if self.json {
            return;
        }
        const HEADINGS: [&str; 7] = ["CODE", "NAME", "PRICE", "LOCATION", "CONDITION", "RATING", "COLORS"];
        const WIDTHS: [usize; 7] = [8, 28, 16, 10, 10, 10, 24];

        println!("  {}", style(pad_row(&HEADINGS.map(String::from), &WIDTHS)).bold());
        for p in products {
            let row = [
                p.code.to_string(),
                p.name.clone(),
                price_cell(p),
                p.location.clone(),
                p.condition.display_name().to_string(),
                format_rating(p.rating, p.review_count),
                swatch_summary(p, swatch_limit),
            ];
            println!("  {}", pad_row(&row, &WIDTHS));
        }
    }
}

fn pad_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Condition badge for product states.
pub fn condition_badge(condition: ProductCondition) -> String {
    let name = condition.display_name();
    match condition {
        ProductCondition::New => style(name).green().to_string(),
        ProductCondition::LikeNew => style(name).cyan().to_string(),
        ProductCondition::Good => style(name).yellow().to_string(),
        ProductCondition::Fair => style(name).dim().to_string(),
    }
}

/// Current price, with the reference price when discounted.
pub fn price_cell(product: &Product) -> String {
    match product.reference_price() {
        Some(reference) => format!(
            "{} (was {})",
            format_price(product.current_price()),
            format_price(reference)
        ),
        None => format_price(product.current_price()),
    }
}

/// Rating with its review count, e.g. `4.5 (128)`.
pub fn format_rating(rating: f64, reviews: u32) -> String {
    format!("{:.1} ({})", rating, reviews)
}

/// Visible color names followed by `+N` for the overflow.
pub fn swatch_summary(product: &Product, limit: usize) -> String {
    let mut names: Vec<String> = product
        .visible_colors(limit)
        .iter()
        .map(|c| c.name.clone())
        .collect();
    let overflow = product.hidden_color_count(limit);
    if overflow > 0 {
        names.push(format!("+{}", overflow));
    }
    names.join(", ")
}

#[cfg(test)]
mod tests {
    use browse_commerce::catalog::CatalogStore;
    use browse_commerce::ProductCode;

    use super::*;

    fn product(code: &str) -> Product {
        CatalogStore::sample()
            .get(&ProductCode::from(code))
            .unwrap()
            .clone()
    }

    #[test]
    fn test_pad_row() {
        let row = ["a".to_string(), "bb".to_string()];
        assert_eq!(pad_row(&row, &[3, 4]), "a    bb");
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(4.5, 128), "4.5 (128)");
        assert_eq!(format_rating(5.0, 0), "5.0 (0)");
    }

    #[test]
    fn test_price_cell_shows_reference_only_when_discounted() {
        let mut p = product("6916323");
        p.original_price = Some(890.0);
        p.discount = Some("-25%".to_string());
        p.price = 666.0;
        assert_eq!(price_cell(&p), "666$ (was 890$)");

        p.discount = None;
        assert_eq!(price_cell(&p), "666$");
    }

    #[test]
    fn test_swatch_summary_overflow() {
        let mut p = product("6916323");
        p.colors = ["Black", "White", "Blue", "Red", "Green", "Gold"]
            .iter()
            .map(|name| browse_commerce::catalog::ColorVariant::new(*name, "#000000"))
            .collect();
        assert_eq!(swatch_summary(&p, 4), "Black, White, Blue, Red, +2");
        assert_eq!(swatch_summary(&p, 6), "Black, White, Blue, Red, Green, Gold");
    }
}
