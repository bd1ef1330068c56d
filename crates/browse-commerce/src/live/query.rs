//! The pull-based live query: the browse screen's state container.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::catalog::{CatalogStore, Product, ProductCondition};
use crate::error::CommerceError;
use crate::ids::ProductCode;
use crate::live::{Debouncer, Dedup, Intent};
use crate::search::{Facet, FilterEngine, FilterState, FilterTag, SearchQuery, SearchResults, SortOption};

/// Tuning for the live query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveConfig {
    /// Quiet period before typed text is treated as stable.
    #[serde(rename = "debounce_ms", with = "duration_ms", default = "default_debounce")]
    pub debounce: Duration,
}

fn default_debounce() -> Duration {
    LiveConfig::DEFAULT_DEBOUNCE
}

impl LiveConfig {
    pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            debounce: Self::DEFAULT_DEBOUNCE,
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

/// Counters describing how much work the gates saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LiveStats {
    /// Search field edits received.
    pub keystrokes: u64,
    /// Edits replaced by a later edit inside the quiet period.
    pub superseded_keystrokes: u64,
    /// Settled texts equal to the last evaluated text.
    pub duplicate_texts: u64,
    /// Filter edits that left the selection structurally unchanged.
    pub duplicate_filters: u64,
    /// Evaluations of the filter engine.
    pub recomputations: u64,
}

/// Combines the debounced search text and the deduplicated filter state.
///
/// The caller owns the clock: mutators record input, [`LiveQuery::poll`]
/// recomputes when either stream produced a fresh value, pairing it with
/// the latest value of the other.
#[derive(Debug)]
pub struct LiveQuery {
    catalog: CatalogStore,
    engine: FilterEngine,
    config: LiveConfig,
    search_text: String,
    filter: FilterState,
    filter_dirty: bool,
    forced_text: Option<String>,
    text_gate: Debouncer<String>,
    settled_text: Dedup<String>,
    filter_gate: Dedup<FilterState>,
    evaluated: SearchQuery,
    results: Arc<SearchResults>,
    generation: u64,
    last_eval: Duration,
    stats: LiveStats,
    selected: Option<ProductCode>,
}

impl LiveQuery {
    /// Create a live query and evaluate the initial, unfiltered snapshot.
    pub fn new(catalog: CatalogStore, config: LiveConfig) -> Self {
        let engine = FilterEngine::new();
        let evaluated = SearchQuery::default();
        let started = Instant::now();
        let results = Arc::new(engine.evaluate(&catalog, &evaluated));
        let last_eval = started.elapsed();

        Self {
            catalog,
            engine,
            config,
            search_text: String::new(),
            filter: FilterState::default(),
            filter_dirty: false,
            forced_text: None,
            text_gate: Debouncer::new(config.debounce),
            settled_text: Dedup::seeded(String::new()),
            filter_gate: Dedup::seeded(FilterState::default()),
            evaluated,
            results,
            generation: 0,
            last_eval,
            stats: LiveStats::default(),
            selected: None,
        }
    }

    /// A live query over the bundled sample dataset.
    pub fn sample() -> Self {
        Self::new(CatalogStore::sample(), LiveConfig::default())
    }

    // -- input side -------------------------------------------------------

    /// Record the search field's new content. Debounced.
    pub fn set_search_text(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        self.stats.keystrokes += 1;
        if self.text_gate.push(text.clone(), now) {
            self.stats.superseded_keystrokes += 1;
        }
        self.search_text = text;
    }

    pub fn toggle_location(&mut self, location: impl Into<String>) {
        self.filter.toggle_location(location);
        self.filter_dirty = true;
    }

    pub fn toggle_brand(&mut self, brand: impl Into<String>) {
        self.filter.toggle_brand(brand);
        self.filter_dirty = true;
    }

    pub fn toggle_condition(&mut self, condition: ProductCondition) {
        self.filter.toggle_condition(condition);
        self.filter_dirty = true;
    }

    pub fn set_price_range(&mut self, min: f64, max: f64) {
        self.filter.set_price_range(min, max);
        self.filter_dirty = true;
    }

    pub fn set_sort_option(&mut self, sort: SortOption) {
        self.filter.set_sort_option(sort);
        self.filter_dirty = true;
    }

    pub fn remove_filter_tag(&mut self, tag: &FilterTag) {
        self.filter.remove_tag(tag);
        self.filter_dirty = true;
    }

    /// Reset every filter and empty the search field.
    ///
    /// The emptied text skips the quiet period and discards any pending
    /// keystroke.
    pub fn clear_filters(&mut self) {
        self.filter.reset();
        self.filter_dirty = true;
        self.search_text.clear();
        self.text_gate.cancel();
        self.forced_text = Some(String::new());
    }

    /// Open the detail view for `code`.
    pub fn select_product(&mut self, code: &ProductCode) -> Result<&Product, CommerceError> {
        let product = self.catalog.get(code)?;
        self.selected = Some(product.code.clone());
        Ok(product)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Dispatch a gesture to the matching mutator.
    pub fn apply(&mut self, intent: Intent, now: Instant) -> Result<(), CommerceError> {
        match intent {
            Intent::Type { text } => self.set_search_text(text, now),
            Intent::ToggleLocation { value } => self.toggle_location(value),
            Intent::ToggleBrand { value } => self.toggle_brand(value),
            Intent::ToggleCondition { value } => self.toggle_condition(value),
            Intent::SetPriceRange { min, max } => self.set_price_range(min, max),
            Intent::SetSort { value } => self.set_sort_option(value),
            Intent::ClearFilters => self.clear_filters(),
            Intent::SelectProduct { code } => {
                self.select_product(&code)?;
            }
            Intent::ClearSelection => self.clear_selection(),
        }
        Ok(())
    }

    // -- evaluation -------------------------------------------------------

    /// When pending text will settle, if a keystroke is waiting.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.text_gate.deadline()
    }

    /// Recompute if either input stream produced a fresh value.
    ///
    /// Returns the new results, or `None` when nothing changed.
    pub fn poll(&mut self, now: Instant) -> Option<Arc<SearchResults>> {
        let mut fresh = false;

        let settled = self
            .forced_text
            .take()
            .or_else(|| self.text_gate.poll(now));
        if let Some(text) = settled {
            match self.settled_text.offer(text) {
                Some(text) => {
                    self.evaluated.text = text;
                    fresh = true;
                }
                None => {
                    self.stats.duplicate_texts += 1;
                    trace!("settled search text unchanged");
                }
            }
        }

        if std::mem::take(&mut self.filter_dirty) {
            match self.filter_gate.offer(self.filter.clone()) {
                Some(filter) => {
                    self.evaluated.filter = filter;
                    fresh = true;
                }
                None => {
                    self.stats.duplicate_filters += 1;
                    trace!("filter state unchanged");
                }
            }
        }

        if !fresh {
            return None;
        }

        let started = Instant::now();
        let results = Arc::new(self.engine.evaluate(&self.catalog, &self.evaluated));
        self.last_eval = started.elapsed();
        self.generation += 1;
        self.stats.recomputations += 1;
        debug!(
            generation = self.generation,
            count = results.count,
            text = %self.evaluated.text,
            sort = %self.evaluated.filter.sort,
            eval_us = self.last_eval.as_micros() as u64,
            "recomputed browse results"
        );
        self.results = Arc::clone(&results);
        Some(results)
    }

    // -- read side --------------------------------------------------------

    /// The latest evaluated results.
    pub fn results(&self) -> Arc<SearchResults> {
        Arc::clone(&self.results)
    }

    pub fn product_count(&self) -> usize {
        self.results.count
    }

    /// Wall time spent in the most recent engine evaluation.
    pub fn last_eval_duration(&self) -> Duration {
        self.last_eval
    }

    /// Number of evaluations since construction; the initial one is 0.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stats(&self) -> LiveStats {
        self.stats
    }

    pub fn config(&self) -> LiveConfig {
        self.config
    }

    /// Raw search field content, settled or not.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Working filter selection, including edits not yet evaluated.
    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    /// The text and filter pair behind [`LiveQuery::results`].
    pub fn evaluated_query(&self) -> &SearchQuery {
        &self.evaluated
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn available_locations(&self) -> Vec<String> {
        self.catalog.available_locations()
    }

    pub fn available_brands(&self) -> Vec<String> {
        self.catalog.available_brands()
    }

    /// Filter choices with full-catalog counts, marked against the working selection.
    pub fn facets(&self) -> Vec<Facet> {
        self.catalog.facets(&self.filter)
    }

    /// Whether any filter or search text is active.
    pub fn has_active_filters(&self) -> bool {
        self.filter.has_active_filters() || !self.search_text.is_empty()
    }

    pub fn active_filter_tags(&self) -> Vec<FilterTag> {
        self.filter.active_tags()
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.selected.as_ref().and_then(|code| self.catalog.find(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_initial_snapshot_is_full_catalog() {
        let live = LiveQuery::sample();
        assert_eq!(live.product_count(), 10);
        assert_eq!(live.generation(), 0);
        assert!(!live.has_active_filters());
    }

    #[test]
    fn test_text_waits_for_quiet_period() {
        let start = Instant::now();
        let mut live = LiveQuery::sample();

        live.set_search_text("iPhone", start);
        assert!(live.poll(start + ms(999)).is_none());
        assert_eq!(live.product_count(), 10);

        let results = live.poll(start + ms(1000)).unwrap();
        assert_eq!(results.count, 4);
        assert_eq!(live.generation(), 1);
    }

    #[test]
    fn test_keystrokes_inside_window_collapse() {
        let start = Instant::now();
        let mut live = LiveQuery::sample();

        live.set_search_text("S", start);
        live.set_search_text("Sa", start + ms(300));
        live.set_search_text("Sam", start + ms(600));
        assert!(live.poll(start + ms(1500)).is_none());

        let results = live.poll(start + ms(1600)).unwrap();
        assert_eq!(results.codes(), vec!["7891234"]);
        assert_eq!(live.stats().superseded_keystrokes, 2);
        assert_eq!(live.stats().recomputations, 1);
    }

    #[test]
    fn test_filters_apply_immediately() {
        let start = Instant::now();
        let mut live = LiveQuery::sample();

        live.toggle_condition(ProductCondition::Good);
        let results = live.poll(start).unwrap();
        assert_eq!(results.codes(), vec!["5678901"]);
    }

    #[test]
    fn test_equal_filter_state_does_not_recompute() {
        let start = Instant::now();
        let mut live = LiveQuery::sample();

        live.toggle_brand("Apple");
        live.toggle_brand("Apple");
        assert!(live.poll(start).is_none());

        live.set_price_range(0.0, 2000.0);
        assert!(live.poll(start).is_none());
        assert_eq!(live.stats().duplicate_filters, 2);
        assert_eq!(live.generation(), 0);
    }

    #[test]
    fn test_retyping_same_text_is_suppressed() {
        let start = Instant::now();
        let mut live = LiveQuery::sample();

        live.set_search_text("pro", start);
        assert!(live.poll(start + ms(1000)).is_some());
        live.set_search_text("pr", start + ms(1100));
        live.set_search_text("pro", start + ms(1200));
        assert!(live.poll(start + ms(2200)).is_none());
        assert_eq!(live.stats().duplicate_texts, 1);
    }

    #[test]
    fn test_combines_with_latest_of_other_stream() {
        let start = Instant::now();
        let mut live = LiveQuery::sample();

        live.set_search_text("iPhone", start);
        live.poll(start + ms(1000));

        live.toggle_location("London");
        let results = live.poll(start + ms(1100)).unwrap();
        assert_eq!(results.codes(), vec!["8369263", "6916323"]);
        assert_eq!(live.evaluated_query().text, "iPhone");
    }

    #[test]
    fn test_filter_applies_while_text_pending() {
        let start = Instant::now();
        let mut live = LiveQuery::sample();

        live.set_search_text("iPhone", start);
        live.set_sort_option(SortOption::LowestPrice);
        let results = live.poll(start + ms(10)).unwrap();
        assert_eq!(results.count, 10);
        assert_eq!(live.evaluated_query().text, "");

        let results = live.poll(start + ms(1000)).unwrap();
        assert_eq!(results.codes(), vec!["1094719", "5892582", "6916323", "8369263"]);
    }

    #[test]
    fn test_clear_filters_restores_default_result() {
        let start = Instant::now();
        let mut live = LiveQuery::sample();
        let initial = live.results();

        live.set_search_text("Apple", start);
        live.toggle_location("London");
        live.set_sort_option(SortOption::Reviews);
        live.poll(start + ms(1000));
        assert_ne!(*live.results(), *initial);

        live.set_search_text("Apples", start + ms(1100));
        live.clear_filters();
        let results = live.poll(start + ms(1100)).unwrap();
        assert_eq!(*results, *initial);
        assert_eq!(live.search_text(), "");
        assert!(live.next_deadline().is_none());
        assert!(!live.has_active_filters());
    }

    #[test]
    fn test_results_are_fresh_allocations() {
        let start = Instant::now();
        let mut live = LiveQuery::sample();
        let before = live.results();

        live.set_sort_option(SortOption::Rating);
        live.poll(start);
        live.set_sort_option(SortOption::HighestPrice);
        let after = live.poll(start).unwrap();

        assert_eq!(*before, *after);
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_remove_filter_tag() {
        let start = Instant::now();
        let mut live = LiveQuery::sample();
        live.toggle_brand("Google");
        live.poll(start);
        assert_eq!(live.product_count(), 1);

        let tags = live.active_filter_tags();
        live.remove_filter_tag(&tags[0]);
        live.poll(start);
        assert_eq!(live.product_count(), 10);
    }

    #[test]
    fn test_select_product() {
        let mut live = LiveQuery::sample();
        let now = Instant::now();
        live.apply(
            Intent::SelectProduct {
                code: ProductCode::new("5678901"),
            },
            now,
        )
        .unwrap();
        assert_eq!(live.selected_product().unwrap().brand, "Huawei");

        assert!(live
            .apply(
                Intent::SelectProduct {
                    code: ProductCode::new("0"),
                },
                now,
            )
            .is_err());
        assert_eq!(live.selected_product().unwrap().brand, "Huawei");

        live.apply(Intent::ClearSelection, now).unwrap();
        assert!(live.selected_product().is_none());
    }

    #[test]
    fn test_config_deserializes_millis() {
        let config: LiveConfig = serde_json::from_str(r#"{"debounce_ms": 250}"#).unwrap();
        assert_eq!(config.debounce, ms(250));
        let config: LiveConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LiveConfig::default());
    }
}
