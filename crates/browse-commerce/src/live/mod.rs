//! Live browse state.
//!
//! Search text is debounced, filter edits are deduplicated, and the two
//! streams are combined so every fresh value from either recomputes the
//! result list with the latest value of the other.

mod debounce;
mod intent;
mod query;
mod script;
mod session;

pub use debounce::{Debouncer, Dedup};
pub use intent::Intent;
pub use query::{LiveConfig, LiveQuery, LiveStats};
pub use script::{Emission, InteractionScript, ScriptStep};
pub use session::BrowseSession;
