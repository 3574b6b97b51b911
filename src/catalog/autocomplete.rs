use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{CameraRecord, Catalog, ObjectSuggestion};
use crate::config::AutocompleteSettings;
use crate::util::*;

/// Something that can turn a partial query into a list of suggestions
#[async_trait]
pub trait SuggestionSource: Send + Sync + 'static {
    type Item: Clone + Send + Sync + 'static;

    async fn fetch(&self, query: &str) -> PlannerResult<Vec<Self::Item>>;
}

/// Object names from `search_objects`
pub struct ObjectNames(pub Arc<dyn Catalog>);

#[async_trait]
impl SuggestionSource for ObjectNames {
    type Item = ObjectSuggestion;

    async fn fetch(&self, query: &str) -> PlannerResult<Vec<ObjectSuggestion>> {
        self.0.search_objects(query).await
    }
}

/// Camera models from `cameras`
pub struct CameraModels(pub Arc<dyn Catalog>);

#[async_trait]
impl SuggestionSource for CameraModels {
    type Item = CameraRecord;

    async fn fetch(&self, query: &str) -> PlannerResult<Vec<CameraRecord>> {
        self.0.cameras(query).await
    }
}

/// Debounced autocomplete for one text field.
///
/// Every input gets a sequence number. A request only fires once no newer input arrived during
/// the debounce period, and its response is only applied if it is still the newest one when it
/// lands. Older responses are dropped.
pub struct Autocompleter<S: SuggestionSource> {
    source: Arc<S>,
    settings: AutocompleteSettings,
    sequence: Arc<AtomicU64>,
    suggestions: Arc<watch::Sender<Vec<S::Item>>>,
}

impl<S: SuggestionSource> Autocompleter<S> {
    pub fn new(source: S, settings: AutocompleteSettings) -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self {
            source: Arc::new(source),
            settings,
            sequence: Arc::new(AtomicU64::new(0)),
            suggestions: Arc::new(tx),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<S::Item>> {
        self.suggestions.subscribe()
    }

    /// Empties the list and drops any response still in flight
    pub fn clear(&self) {
        self.sequence.fetch_add(1, Ordering::SeqCst);
        self.suggestions.send_replace(Vec::new());
    }

    /// Handles a change of the field's text.
    ///
    /// Queries shorter than the minimum length clear the list right away and issue no request;
    /// `None` is returned for those. Otherwise the returned handle finishes once the request
    /// was either applied or discarded.
    pub fn input(&self, text: &str) -> Option<JoinHandle<()>> {
        let query = text.trim().to_string();
        if query.chars().count() < self.settings.min_query_length {
            self.clear();
            return None;
        }

        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;

        let source = Arc::clone(&self.source);
        let sequence = Arc::clone(&self.sequence);
        let suggestions = Arc::clone(&self.suggestions);
        let debounce = self.settings.debounce();

        Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if sequence.load(Ordering::SeqCst) != seq {
                return;
            }

            let result = source.fetch(&query).await;

            if sequence.load(Ordering::SeqCst) != seq {
                debug!("Discarding stale suggestions for \"{}\"", query);
                return;
            }

            match result {
                Ok(list) => {
                    debug!("{} suggestions for \"{}\"", list.len(), query);
                    suggestions.send_replace(list);
                }
                Err(e) => {
                    warn!("Suggestion lookup for \"{}\" failed: {}", query, e);
                    suggestions.send_replace(Vec::new());
                }
            }
        }))
    }
}
