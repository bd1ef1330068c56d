//! Async browse session: a [`LiveQuery`] confined to one tokio task.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::catalog::{CatalogStore, Product, ProductCondition};
use crate::error::CommerceError;
use crate::ids::ProductCode;
use crate::live::{Intent, LiveConfig, LiveQuery, LiveStats};
use crate::search::{FilterState, SearchResults, SortOption};

/// Handle to a running browse session.
///
/// Gestures are queued to the driver task; results, the working filter
/// selection and the selected product are observed through watch channels.
/// Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct BrowseSession {
    intents: mpsc::UnboundedSender<Intent>,
    results: watch::Receiver<Arc<SearchResults>>,
    filter: watch::Receiver<FilterState>,
    selection: watch::Receiver<Option<Product>>,
    task: JoinHandle<LiveStats>,
}

impl BrowseSession {
    /// Spawn the driver task over `catalog`.
    pub fn spawn(catalog: CatalogStore, config: LiveConfig) -> Self {
        let live = LiveQuery::new(catalog, config);
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let (results_tx, results_rx) = watch::channel(live.results());
        let (filter_tx, filter_rx) = watch::channel(live.filter_state().clone());
        let (selection_tx, selection_rx) = watch::channel(None);

        let outputs = Outputs {
            results: results_tx,
            filter: filter_tx,
            selection: selection_tx,
        };
        let task = tokio::spawn(drive(live, intent_rx, outputs));

        Self {
            intents: intent_tx,
            results: results_rx,
            filter: filter_rx,
            selection: selection_rx,
            task,
        }
    }

    /// Queue a gesture.
    pub fn send(&self, intent: Intent) -> Result<(), CommerceError> {
        self.intents
            .send(intent)
            .map_err(|_| CommerceError::SessionClosed)
    }

    pub fn set_search_text(&self, text: impl Into<String>) -> Result<(), CommerceError> {
        self.send(Intent::Type { text: text.into() })
    }

    pub fn toggle_location(&self, location: impl Into<String>) -> Result<(), CommerceError> {
        self.send(Intent::ToggleLocation {
            value: location.into(),
        })
    }

    pub fn toggle_brand(&self, brand: impl Into<String>) -> Result<(), CommerceError> {
        self.send(Intent::ToggleBrand { value: brand.into() })
    }

    pub fn toggle_condition(&self, condition: ProductCondition) -> Result<(), CommerceError> {
        self.send(Intent::ToggleCondition { value: condition })
    }

    pub fn set_price_range(&self, min: f64, max: f64) -> Result<(), CommerceError> {
        self.send(Intent::SetPriceRange { min, max })
    }

    pub fn set_sort_option(&self, sort: SortOption) -> Result<(), CommerceError> {
        self.send(Intent::SetSort { value: sort })
    }

    pub fn clear_filters(&self) -> Result<(), CommerceError> {
        self.send(Intent::ClearFilters)
    }

    pub fn select_product(&self, code: impl Into<ProductCode>) -> Result<(), CommerceError> {
        self.send(Intent::SelectProduct { code: code.into() })
    }

    /// The latest emitted results.
    ///
    /// Marks them as seen, so a following [`changed`](Self::changed) waits
    /// for a newer emission.
    pub fn results(&mut self) -> Arc<SearchResults> {
        self.results.borrow_and_update().clone()
    }

    /// Wait for an emission newer than the last one read through this handle.
    ///
    /// Returns `None` once the driver task has stopped.
    pub async fn changed(&mut self) -> Option<Arc<SearchResults>> {
        self.results.changed().await.ok()?;
        Some(self.results.borrow_and_update().clone())
    }

    /// A receiver of every future emission.
    pub fn subscribe(&self) -> watch::Receiver<Arc<SearchResults>> {
        self.results.clone()
    }

    /// The working filter selection as last seen by the driver.
    pub fn filter_state(&self) -> FilterState {
        self.filter.borrow().clone()
    }

    pub fn selected_product(&self) -> Option<Product> {
        self.selection.borrow().clone()
    }

    /// Stop accepting gestures and wait for the driver to finish.
    pub async fn shutdown(self) -> Result<LiveStats, CommerceError> {
        drop(self.intents);
        self.task
            .await
            .map_err(|e| CommerceError::Session(e.to_string()))
    }
}

struct Outputs {
    results: watch::Sender<Arc<SearchResults>>,
    filter: watch::Sender<FilterState>,
    selection: watch::Sender<Option<Product>>,
}

impl Outputs {
    fn publish(&self, live: &LiveQuery) {
        self.filter.send_if_modified(|current| {
            if *current != *live.filter_state() {
                *current = live.filter_state().clone();
                true
            } else {
                false
            }
        });

        let selected = live.selected_product();
        self.selection.send_if_modified(|current| {
            if current.as_ref() != selected {
                *current = selected.cloned();
                true
            } else {
                false
            }
        });
    }
}

async fn sleep_until(deadline: Option<std::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

fn apply(live: &mut LiveQuery, intent: Intent) {
    if let Err(err) = live.apply(intent, Instant::now().into_std()) {
        warn!(%err, "ignored browse intent");
    }
}

async fn drive(
    mut live: LiveQuery,
    mut intents: mpsc::UnboundedReceiver<Intent>,
    outputs: Outputs,
) -> LiveStats {
    loop {
        tokio::select! {
            intent = intents.recv() => match intent {
                Some(intent) => {
                    apply(&mut live, intent);
                    // A burst of queued gestures is evaluated once.
                    while let Ok(intent) = intents.try_recv() {
                        apply(&mut live, intent);
                    }
                }
                None => break,
            },
            _ = sleep_until(live.next_deadline()) => {}
        }

        if let Some(results) = live.poll(Instant::now().into_std()) {
            outputs.results.send_replace(results);
        }
        outputs.publish(&live);
    }

    debug!(stats = ?live.stats(), "browse session closed");
    live.stats()
}
