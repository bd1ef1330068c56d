//! Product detail.

use anyhow::Result;
use browse_commerce::catalog::{format_price, ColorVariant, Product, Rgba};
use browse_commerce::ProductCode;
use serde::Serialize;

use super::ShowArgs;
use crate::context::Context;
use crate::output::{condition_badge, format_rating};

#[derive(Serialize)]
struct Swatch<'a> {
    #[serde(flatten)]
    color: &'a ColorVariant,
    rgba: Option<Rgba>,
}

#[derive(Serialize)]
struct ProductDetail<'a> {
    #[serde(flatten)]
    product: &'a Product,
    swatches: Vec<Swatch<'a>>,
}

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let product = catalog.get(&ProductCode::new(args.code))?;

    if ctx.output.is_json() {
        ctx.output.json(&ProductDetail {
            product,
            swatches: product
                .colors
                .iter()
                .map(|color| Swatch {
                    color,
                    rgba: color.rgba(),
                })
                .collect(),
        });
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("Code", product.code.as_str());
    ctx.output.kv("Brand", &product.brand);
    ctx.output.kv("Category", &product.category);
    if let Some(ref storage) = product.storage {
        ctx.output.kv("Storage", storage);
    }
    ctx.output.kv("Location", &product.location);
    ctx.output.kv("Condition", &condition_badge(product.condition));
    ctx.output
        .kv("Rating", &format_rating(product.rating, product.review_count));

    ctx.output.kv("Price", &format_price(product.current_price()));
    if let (Some(reference), Some(discount)) = (product.reference_price(), &product.discount) {
        ctx.output
            .kv("Was", &format!("{} ({})", format_price(reference), discount));
    }

    if !product.colors.is_empty() {
        ctx.output.header("Colors");
        for color in &product.colors {
            let decoded = color
                .rgba()
                .map(|rgba| rgba.css())
                .unwrap_or_else(|| "unparsed".to_string());
            ctx.output
                .list_item(&format!("{} {} {}", color.name, color.hex, decoded));
        }
    }

    Ok(())
}
