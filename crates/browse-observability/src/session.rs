//! Session identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

static NEXT: AtomicU32 = AtomicU32::new(0);

/// Correlates every log line and metric of one browse session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// `sess-<unix millis, hex>-<pid>-<sequence>`; unique within a host.
    pub fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let seq = NEXT.fetch_add(1, Ordering::Relaxed);
        Self(format!("sess-{millis:x}-{}-{seq}", std::process::id()))
    }

    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_differ() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("sess-"));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = SessionId::from_string("replay-1");
        assert_eq!(id.to_string(), "replay-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""replay-1""#);
    }
}
