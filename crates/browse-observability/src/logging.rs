//! Per-session structured log lines.
//!
//! ```
//! use browse_observability::{LogFormat, SessionId, StructuredLogger};
//!
//! let log = StructuredLogger::new(SessionId::from_string("s-1")).with_format(LogFormat::Json);
//! let line = log.info("emitted").field("count", 4).render().unwrap();
//! assert!(line.contains(r#""count":4"#));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::SessionId;

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Output format for session logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    Json,
    #[default]
    Human,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "human" | "text" => Ok(Self::Human),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Human => "human",
        })
    }
}

/// One rendered-to-be line.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub session_id: String,
    /// Emitting component, e.g. `replay` or `session`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    pub message: String,
    /// Milliseconds since the logger was created.
    pub elapsed_ms: u64,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl LogEntry {
    pub fn render(&self, format: LogFormat) -> String {
        match format {
            LogFormat::Json => {
                serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
            }
            LogFormat::Human => {
                let mut line = format!("[{:<5}] ", self.level);
                if let Some(ref component) = self.component {
                    line.push_str(component);
                    line.push_str(": ");
                }
                line.push_str(&self.message);
                for (i, (key, value)) in self.fields.iter().enumerate() {
                    line.push_str(if i == 0 { " | " } else { " " });
                    line.push_str(&format!("{key}={value}"));
                }
                line
            }
        }
    }
}

/// Writes structured lines for one session to stderr.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    session_id: SessionId,
    component: Option<String>,
    created: Instant,
    min_level: LogLevel,
    format: LogFormat,
}

impl StructuredLogger {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            component: None,
            created: Instant::now(),
            min_level: LogLevel::Info,
            format: LogFormat::default(),
        }
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Start a line at `level`; nothing is written until [`LogBuilder::emit`].
    pub fn entry(&self, level: LogLevel, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder {
            logger: self,
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn debug(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.entry(LogLevel::Debug, message)
    }

    pub fn info(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.entry(LogLevel::Info, message)
    }

    pub fn warn(&self, message: impl Into<String>) -> LogBuilder<'_> {
        self.entry(LogLevel::Warn, message)
    }
}

/// A line under construction.
#[must_use = "log lines are only written by `emit`"]
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    fields: BTreeMap<String, Value>,
}

impl LogBuilder<'_> {
    /// Attach a field; anything convertible to a JSON value.
    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Attach a duration in microseconds.
    pub fn micros(self, key: &str, duration: Duration) -> Self {
        self.field(key, duration.as_micros() as u64)
    }

    /// The finished line, or `None` below the logger's minimum level.
    pub fn render(self) -> Option<String> {
        if !self.logger.enabled(self.level) {
            return None;
        }
        let entry = LogEntry {
            level: self.level,
            session_id: self.logger.session_id.to_string(),
            component: self.logger.component.clone(),
            message: self.message,
            elapsed_ms: self.logger.created.elapsed().as_millis() as u64,
            fields: self.fields,
        };
        Some(entry.render(self.logger.format))
    }

    pub fn emit(self) {
        if let Some(line) = self.render() {
            // stdout carries results
            eprintln!("{line}");
        }
    }
}
