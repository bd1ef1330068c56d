//! Filter choices with catalog-wide counts.

use anyhow::Result;
use browse_commerce::search::PriceRange;

use super::FacetsArgs;
use crate::context::Context;

/// Run the facets command.
pub async fn run(args: FacetsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let query = args.filter.to_query()?;
    let facets = catalog.facets(&query.filter);

    if ctx.output.is_json() {
        ctx.output.json(&facets);
        return Ok(());
    }

    for facet in &facets {
        ctx.output.header(&facet.name);
        for value in &facet.values {
            let mark = if value.selected { "[x]" } else { "[ ]" };
            ctx.output
                .list_item(&format!("{} {} ({})", mark, value.value, value.count));
        }
    }

    ctx.output.header("Price");
    ctx.output.kv("Range", &query.filter.price.label());
    let presets: Vec<String> = PriceRange::PRESETS.iter().map(|p| p.label()).collect();
    ctx.output.kv("Presets", &presets.join(", "));

    Ok(())
}
