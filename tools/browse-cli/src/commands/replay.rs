//! Interaction script replay.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context as _, Result};
use browse_commerce::live::{Emission, InteractionScript, LiveQuery};
use browse_observability::{MetricsCollector, SessionMetrics};
use chrono::Utc;
use serde::Serialize;

use super::{live_config, suppressed_counts, ReplayArgs};
use crate::context::Context;

#[derive(Serialize)]
struct ReplayReport {
    script: String,
    replayed_at: String,
    emissions: Vec<Emission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<SessionMetrics>,
}

/// Run the replay command.
pub async fn run(args: ReplayArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.script);
    let script = load_script(&path)?;
    let catalog = ctx.catalog()?;
    let config = live_config(ctx.config.search, args.debounce_ms);

    let logger = ctx.logger("replay");
    let mut metrics = MetricsCollector::new(logger.session_id().clone());
    metrics.set_component("replay");

    logger
        .info("replaying script")
        .field("script", path.display().to_string())
        .field("steps", script.steps.len() as u64)
        .field("debounce_ms", config.debounce.as_millis() as u64)
        .emit();

    let mut live = LiveQuery::new(catalog, config);
    let emissions = script.replay(&mut live);

    for emission in &emissions {
        metrics.record_recompute(
            emission.generation,
            emission.at_ms,
            emission.results.count,
            Some(Duration::from_micros(emission.eval_us)),
        );
        logger
            .debug("emitted")
            .field("at_ms", emission.at_ms)
            .field("generation", emission.generation)
            .field("count", emission.results.count as u64)
            .emit();
    }
    metrics.record_suppressed(suppressed_counts(live.stats()));
    let metrics = metrics.finalize();

    let name = script
        .name
        .clone()
        .unwrap_or_else(|| path.display().to_string());

    if ctx.output.is_json() {
        ctx.output.json(&ReplayReport {
            script: name,
            replayed_at: Utc::now().to_rfc3339(),
            emissions,
            metrics: (!args.no_metrics).then_some(metrics),
        });
        return Ok(());
    }

    ctx.output.header(&format!("Replay: {}", name));
    ctx.output.kv("Steps", &script.steps.len().to_string());
    ctx.output
        .kv("Duration", &format!("{}ms", script.duration_ms()));

    if emissions.is_empty() {
        ctx.output.info("No emissions");
    }

    for emission in &emissions {
        let text = if emission.query.text.is_empty() {
            String::new()
        } else {
            format!(" \"{}\"", emission.query.text)
        };
        ctx.output.list_item(&format!(
            "{:>6}ms  gen {:<3} {:>2} products{}  [{}]",
            emission.at_ms,
            emission.generation,
            emission.results.count,
            text,
            emission.results.codes().join(" ")
        ));
    }

    if let Some(last) = emissions.last() {
        println!();
        ctx.output
            .product_table(&last.results.items, ctx.config.display.swatch_limit);
    }

    if !args.no_metrics {
        ctx.output.header("Metrics");
        println!("{}", metrics.to_summary());
    }

    Ok(())
}

fn load_script(path: &Path) -> Result<InteractionScript> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script: {}", path.display()))?;
    InteractionScript::parse(path, &source)
        .with_context(|| format!("Failed to parse script: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_script_reports_path() {
        let err = load_script(Path::new("/nonexistent/hunt.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/hunt.toml"));
    }

    #[test]
    fn test_bundled_demo_script_replays() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/iphone-hunt.toml");
        let script = load_script(&path).unwrap();

        let mut live = LiveQuery::sample();
        let emissions = script.replay(&mut live);
        let last = emissions.last().unwrap();
        assert_eq!(last.results.codes(), vec!["1094719"]);
        assert!(live.stats().superseded_keystrokes > 0);
    }
}
