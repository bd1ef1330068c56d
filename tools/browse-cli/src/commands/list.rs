//! One-shot query evaluation.

use anyhow::Result;
use browse_commerce::search::FilterEngine;
use serde::Serialize;

use super::ListArgs;
use crate::context::Context;

#[derive(Serialize)]
struct ListReport<'a> {
    query: &'a browse_commerce::search::SearchQuery,
    count: usize,
    items: &'a [browse_commerce::catalog::Product],
}

/// Run the list command.
pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let query = args.filter.to_query()?;
    let results = FilterEngine::new().evaluate(&catalog, &query);

    let shown = match args.limit {
        Some(limit) => &results.items[..results.len().min(limit)],
        None => &results.items[..],
    };

    if ctx.output.is_json() {
        ctx.output.json(&ListReport {
            query: &query,
            count: results.count,
            items: shown,
        });
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} of {} products",
        results.count,
        catalog.len()
    ));

    let tags = query.filter.active_tags();
    if !query.text.is_empty() || !tags.is_empty() {
        let mut labels: Vec<String> = tags.iter().map(|t| t.label()).collect();
        if !query.text.is_empty() {
            labels.insert(0, format!("\"{}\"", query.text));
        }
        ctx.output.kv("Filters", &labels.join(", "));
    }
    ctx.output.kv("Sort", query.filter.sort.display_name());

    if results.is_empty() {
        ctx.output.info("No products match");
        return Ok(());
    }

    println!();
    ctx.output
        .product_table(shown, ctx.config.display.swatch_limit);

    if shown.len() < results.count {
        ctx.output
            .info(&format!("... {} more", results.count - shown.len()));
    }

    Ok(())
}
