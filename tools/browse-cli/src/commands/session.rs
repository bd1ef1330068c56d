//! Interactive live session.
//!
//! Each stdin line replaces the search text, unless it starts with `:`.
//! Results print whenever the session emits, so typed text shows up only
//! after the debounce settles.

use std::time::Instant;

use anyhow::{anyhow, bail, Context as _, Result};
use browse_commerce::catalog::ProductCondition;
use browse_commerce::live::{BrowseSession, Intent};
use browse_commerce::search::{SearchResults, SortOption};
use browse_commerce::ProductCode;
use browse_observability::MetricsCollector;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{live_config, suppressed_counts, SessionArgs};
use crate::context::Context;

/// One parsed input line.
#[derive(Debug, PartialEq)]
enum SessionLine {
    Intent(Intent),
    Help,
    Quit,
}

const HELP: &[(&str, &str)] = &[
    ("<text>", "search for text (debounced)"),
    (":loc <name>", "toggle a location"),
    (":brand <name>", "toggle a brand"),
    (":cond <condition>", "toggle a condition"),
    (":price <min> <max>", "set the price range"),
    (":sort <option>", "highest-price, lowest-price, rating, reviews"),
    (":clear", "reset filters and search text"),
    (":show <code>", "select a product"),
    (":back", "clear the selection"),
    (":quit", "end the session"),
];

fn parse_line(line: &str) -> Result<SessionLine> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.strip_prefix(':') else {
        return Ok(SessionLine::Intent(Intent::Type {
            text: line.to_string(),
        }));
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };
    let required = |what: &str| -> Result<String> {
        if rest.is_empty() {
            bail!(":{} needs a {}", name, what);
        }
        Ok(rest.to_string())
    };

    let intent = match name {
        "loc" | "location" => Intent::ToggleLocation {
            value: required("location")?,
        },
        "brand" => Intent::ToggleBrand {
            value: required("brand")?,
        },
        "cond" | "condition" => Intent::ToggleCondition {
            value: required("condition")?.parse::<ProductCondition>()?,
        },
        "price" => {
            let bounds: Vec<f64> = rest
                .split_whitespace()
                .map(|b| b.trim_end_matches('$').parse::<f64>())
                .collect::<Result<_, _>>()
                .context(":price bounds must be numbers")?;
            match bounds.as_slice() {
                [min, max] => Intent::SetPriceRange {
                    min: *min,
                    max: *max,
                },
                _ => bail!(":price needs a min and a max"),
            }
        }
        "sort" => Intent::SetSort {
            value: required("sort option")?.parse::<SortOption>()?,
        },
        "clear" => Intent::ClearFilters,
        "show" => Intent::SelectProduct {
            code: ProductCode::new(required("product code")?),
        },
        "back" => Intent::ClearSelection,
        "help" | "h" => return Ok(SessionLine::Help),
        "quit" | "q" | "exit" => return Ok(SessionLine::Quit),
        other => return Err(anyhow!("Unknown command :{} (try :help)", other)),
    };
    Ok(SessionLine::Intent(intent))
}

/// Run the session command.
pub async fn run(args: SessionArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let config = live_config(ctx.config.search, args.debounce_ms);

    let logger = ctx.logger("session");
    let mut metrics = MetricsCollector::new(logger.session_id().clone());
    metrics.set_component("session");
    logger
        .info("session started")
        .field("products", catalog.len() as u64)
        .field("debounce_ms", config.debounce.as_millis() as u64)
        .emit();

    let mut session = BrowseSession::spawn(catalog.clone(), config);
    let started = Instant::now();
    let mut emitted = 0u64;

    if !ctx.output.is_json() {
        ctx.output.info("Type to search, :help for commands, :quit to leave");
    }
    print_results(ctx, emitted, &session.results(), args.limit);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                match parse_line(&line) {
                    Ok(SessionLine::Quit) => break,
                    Ok(SessionLine::Help) => {
                        for (usage, what) in HELP {
                            ctx.output.kv(usage, what);
                        }
                    }
                    Ok(SessionLine::Intent(intent)) => {
                        if let Intent::SelectProduct { ref code } = intent {
                            match catalog.find(code) {
                                Some(product) => {
                                    ctx.output.header(&product.name);
                                    ctx.output.kv("Code", product.code.as_str());
                                    ctx.output.kv("Price", &crate::output::price_cell(product));
                                    ctx.output.kv("Location", &product.location);
                                }
                                None => ctx.output.warn(&format!("No product {}", code)),
                            }
                        }
                        session.send(intent)?;
                    }
                    Err(e) => ctx.output.warn(&format!("{:#}", e)),
                }
            }
            results = session.changed() => {
                let Some(results) = results else {
                    break;
                };
                emitted += 1;
                let at_ms = started.elapsed().as_millis() as u64;
                metrics.record_recompute(emitted, at_ms, results.count, None);
                logger
                    .debug("emitted")
                    .field("generation", emitted)
                    .field("count", results.count as u64)
                    .emit();
                print_results(ctx, emitted, &results, args.limit);
            }
        }
    }

    let stats = session.shutdown().await?;
    metrics.record_suppressed(suppressed_counts(stats));
    let metrics = metrics.finalize();
    logger
        .info("session closed")
        .field("recomputations", stats.recomputations)
        .micros("elapsed", started.elapsed())
        .emit();

    if ctx.output.is_json() {
        ctx.output.json(&metrics);
    } else {
        ctx.output.header("Metrics");
        println!("{}", metrics.to_summary());
    }

    Ok(())
}

fn print_results(ctx: &Context, generation: u64, results: &SearchResults, limit: usize) {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "generation": generation,
            "count": results.count,
            "codes": results.codes(),
        }));
        return;
    }

    ctx.output.header(&format!("{} products", results.count));
    let shown = &results.items[..results.len().min(limit)];
    ctx.output
        .product_table(shown, ctx.config.display.swatch_limit);
    if shown.len() < results.count {
        ctx.output
            .info(&format!("... {} more", results.count - shown.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(line: &str) -> Intent {
        match parse_line(line).unwrap() {
            SessionLine::Intent(intent) => intent,
            other => panic!("expected intent, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_line_is_search_text() {
        assert_eq!(
            intent("iPhone 15\n"),
            Intent::Type {
                text: "iPhone 15".to_string()
            }
        );
        assert_eq!(intent(""), Intent::Type { text: String::new() });
    }

    #[test]
    fn test_filter_commands() {
        assert_eq!(
            intent(":loc London"),
            Intent::ToggleLocation {
                value: "London".to_string()
            }
        );
        assert_eq!(
            intent(":cond like new"),
            Intent::ToggleCondition {
                value: ProductCondition::LikeNew
            }
        );
        assert_eq!(
            intent(":price 600$ 700"),
            Intent::SetPriceRange {
                min: 600.0,
                max: 700.0
            }
        );
        assert_eq!(
            intent(":sort lowest-price"),
            Intent::SetSort {
                value: SortOption::LowestPrice
            }
        );
        assert_eq!(intent(":clear"), Intent::ClearFilters);
        assert_eq!(
            intent(":show 5678901"),
            Intent::SelectProduct {
                code: ProductCode::from("5678901")
            }
        );
    }

    #[test]
    fn test_control_commands() {
        assert_eq!(parse_line(":quit").unwrap(), SessionLine::Quit);
        assert_eq!(parse_line(":help").unwrap(), SessionLine::Help);
    }

    #[test]
    fn test_bad_commands() {
        assert!(parse_line(":price 600").is_err());
        assert!(parse_line(":price cheap expensive").is_err());
        assert!(parse_line(":brand").is_err());
        assert!(parse_line(":cond mint").is_err());
        assert!(parse_line(":teleport").is_err());
    }
}
