//! Recorded interaction scripts, replayed on a virtual clock.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CommerceError;
use crate::live::{Intent, LiveQuery};
use crate::search::{SearchQuery, SearchResults};

/// One timed gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Milliseconds since the script started.
    pub at_ms: u64,
    #[serde(flatten)]
    pub intent: Intent,
}

/// A recorded sequence of gestures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionScript {
    /// Script format version.
    #[serde(default = "current_version")]
    pub version: u32,
    /// Optional human label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

fn current_version() -> u32 {
    InteractionScript::VERSION
}

/// A result list emitted during replay.
#[derive(Debug, Clone, Serialize)]
pub struct Emission {
    /// Virtual time of the emission.
    pub at_ms: u64,
    pub generation: u64,
    /// Wall time of the engine evaluation, in microseconds.
    pub eval_us: u64,
    /// The text and filter pair that produced it.
    pub query: SearchQuery,
    pub results: Arc<SearchResults>,
}

impl InteractionScript {
    /// Current script format version.
    pub const VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::VERSION,
            name: None,
            steps: Vec::new(),
        }
    }

    /// Append a step.
    pub fn at(mut self, at_ms: u64, intent: Intent) -> Self {
        self.steps.push(ScriptStep { at_ms, intent });
        self
    }

    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        serde_json::from_str(json).map_err(|e| CommerceError::Script(e.to_string()))
    }

    pub fn from_toml(source: &str) -> Result<Self, CommerceError> {
        Ok(toml::from_str(source)?)
    }

    /// Parse by extension: `.json` is JSON, anything else TOML.
    pub fn parse(path: &Path, source: &str) -> Result<Self, CommerceError> {
        let script = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(source)?,
            _ => Self::from_toml(source)?,
        };
        if script.version > Self::VERSION {
            return Err(CommerceError::Script(format!(
                "unsupported script version {}",
                script.version
            )));
        }
        Ok(script)
    }

    /// Virtual time of the last step.
    pub fn duration_ms(&self) -> u64 {
        self.steps.iter().map(|s| s.at_ms).max().unwrap_or(0)
    }

    /// Drive `live` through the script and collect every emission.
    ///
    /// Steps run in `at_ms` order (stable for equal times). Pending text is
    /// settled at its own deadline, so emissions carry the time they would
    /// have appeared on screen. After the last step the clock runs until no
    /// keystroke is pending.
    pub fn replay(&self, live: &mut LiveQuery) -> Vec<Emission> {
        let origin = Instant::now();
        let mut steps: Vec<&ScriptStep> = self.steps.iter().collect();
        steps.sort_by_key(|s| s.at_ms);

        let mut emissions = Vec::new();
        let mut collect = |live: &mut LiveQuery, now: Instant| {
            if let Some(results) = live.poll(now) {
                emissions.push(Emission {
                    at_ms: millis_since(origin, now),
                    generation: live.generation(),
                    eval_us: live.last_eval_duration().as_micros() as u64,
                    query: live.evaluated_query().clone(),
                    results,
                });
            }
        };

        for step in steps {
            let now = origin + Duration::from_millis(step.at_ms);
            // Settle text whose quiet period ended before this step.
            if let Some(deadline) = live.next_deadline() {
                if deadline <= now {
                    collect(live, deadline);
                }
            }
            if let Err(err) = live.apply(step.intent.clone(), now) {
                warn!(%err, at_ms = step.at_ms, "script step ignored");
            }
            collect(live, now);
        }

        if let Some(deadline) = live.next_deadline() {
            collect(live, deadline);
        }

        emissions
    }
}

impl Default for InteractionScript {
    fn default() -> Self {
        Self::new()
    }
}

fn millis_since(origin: Instant, now: Instant) -> u64 {
    now.saturating_duration_since(origin).as_millis() as u64
}
