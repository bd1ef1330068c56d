//! Recomputation metrics for a browse session.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::SessionId;

/// Metrics for one browse session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMetrics {
    /// Session ID for correlation.
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Every evaluation of the filter engine, in order.
    pub recomputations: Vec<RecomputeMetrics>,
    /// Work the debounce and dedup gates avoided.
    pub suppressed: SuppressedCounts,
    /// Wall time from collector creation to finalize (microseconds).
    pub total_duration_us: u64,
}

/// One evaluation of the filter engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecomputeMetrics {
    pub generation: u64,
    /// Session time of the emission (milliseconds).
    pub at_ms: u64,
    pub result_count: usize,
    /// Evaluation duration (microseconds), when the emitter measured it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_us: Option<u64>,
}

/// Inputs that did not lead to an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SuppressedCounts {
    /// Search field edits received.
    pub keystrokes: u64,
    /// Edits replaced inside the quiet period.
    pub superseded_keystrokes: u64,
    /// Settled texts equal to the previous one.
    pub duplicate_texts: u64,
    /// Filter edits that changed nothing.
    pub duplicate_filters: u64,
}

impl SuppressedCounts {
    pub fn total(&self) -> u64 {
        self.superseded_keystrokes + self.duplicate_texts + self.duplicate_filters
    }
}

/// Collector for session metrics.
#[derive(Debug)]
pub struct MetricsCollector {
    session_id: SessionId,
    component: Option<String>,
    start: Instant,
    recomputations: Vec<RecomputeMetrics>,
    suppressed: SuppressedCounts,
}

impl MetricsCollector {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            component: None,
            start: Instant::now(),
            recomputations: Vec::new(),
            suppressed: SuppressedCounts::default(),
        }
    }

    pub fn set_component(&mut self, component: impl Into<String>) {
        self.component = Some(component.into());
    }

    /// Record an engine evaluation.
    pub fn record_recompute(
        &mut self,
        generation: u64,
        at_ms: u64,
        result_count: usize,
        eval: Option<Duration>,
    ) {
        self.recomputations.push(RecomputeMetrics {
            generation,
            at_ms,
            result_count,
            eval_us: eval.map(|d| d.as_micros() as u64),
        });
    }

    /// Replace the suppression counters with the session's latest totals.
    pub fn record_suppressed(&mut self, counts: SuppressedCounts) {
        self.suppressed = counts;
    }

    pub fn recompute_count(&self) -> usize {
        self.recomputations.len()
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Finalize and return the metrics.
    pub fn finalize(self) -> SessionMetrics {
        SessionMetrics {
            session_id: self.session_id.to_string(),
            component: self.component,
            recomputations: self.recomputations,
            suppressed: self.suppressed,
            total_duration_us: self.start.elapsed().as_micros() as u64,
        }
    }
}

impl SessionMetrics {
    /// Sum of evaluation durations (microseconds).
    pub fn total_eval_us(&self) -> u64 {
        self.recomputations.iter().filter_map(|r| r.eval_us).sum()
    }

    pub fn max_eval_us(&self) -> Option<u64> {
        self.recomputations.iter().filter_map(|r| r.eval_us).max()
    }

    /// Mean result count across evaluations.
    pub fn average_result_count(&self) -> Option<f64> {
        if self.recomputations.is_empty() {
            return None;
        }
        let total: usize = self.recomputations.iter().map(|r| r.result_count).sum();
        Some(total as f64 / self.recomputations.len() as f64)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Format as human-readable summary.
    pub fn to_summary(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Session: {}", self.session_id));
        lines.push(format!("  Recomputations: {}", self.recomputations.len()));

        let total_eval = self.total_eval_us();
        lines.push(format!(
            "  Evaluation time: {}us ({:.2}ms)",
            total_eval,
            total_eval as f64 / 1000.0
        ));

        if let Some(avg) = self.average_result_count() {
            lines.push(format!("  Average results: {:.1}", avg));
        }

        let s = &self.suppressed;
        lines.push(format!(
            "  Keystrokes: {} ({} superseded)",
            s.keystrokes, s.superseded_keystrokes
        ));
        lines.push(format!(
            "  Duplicates suppressed: {} text, {} filter",
            s.duplicate_texts, s.duplicate_filters
        ));

        lines.join("\n")
    }
}
