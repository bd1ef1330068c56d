//! Observability for browse sessions.
//!
//! This crate provides:
//! - `SessionId` - Unique identifier for one browse session
//! - `StructuredLogger` - Structured logging with session context
//! - `MetricsCollector` - Recomputation counts and timings

mod logging;
mod metrics;
mod session;

pub use logging::*;
pub use metrics::*;
pub use session::*;
