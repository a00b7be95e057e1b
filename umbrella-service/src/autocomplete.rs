use crate::debounce::Debouncer;
use crate::service::{LookupSession, RainService};
use common::errors::AppError;
use common::models::{CityVerdict, Location};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::Duration;
use tracing::debug;

/// Quiet period observed between keystrokes before searching.
pub const DEFAULT_QUIET: Duration = Duration::from_millis(150);

/// Input-box state: debounced suggestion fetches and explicit submits.
pub struct Autocomplete {
    service: Arc<RainService>,
    debouncer: Debouncer,
    suggestions: Arc<watch::Sender<Vec<Location>>>,
    lookups: LookupSession,
}

impl Autocomplete {
    pub fn new(service: Arc<RainService>, quiet: Duration) -> Self {
        let (suggestions, _) = watch::channel(Vec::new());
        Self {
            service,
            debouncer: Debouncer::new(quiet),
            suggestions: Arc::new(suggestions),
            lookups: LookupSession::new(),
        }
    }

    pub fn with_default_quiet(service: Arc<RainService>) -> Self {
        Self::new(service, DEFAULT_QUIET)
    }

    /// Receiver that observes every published suggestion list.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Location>> {
        self.suggestions.subscribe()
    }

    pub fn current(&self) -> Vec<Location> {
        self.suggestions.borrow().clone()
    }

    /// React to the input text changing.
    ///
    /// Blank input clears suggestions at once; anything else schedules a
    /// search after the quiet period.
    pub async fn on_input(&self, text: &str) {
        if text.trim().is_empty() {
            self.debouncer.cancel().await;
            self.suggestions.send_replace(Vec::new());
            return;
        }

        let service = self.service.clone();
        let suggestions = self.suggestions.clone();
        let query = text.to_string();
        self.debouncer
            .schedule(async move {
                let found = service.suggest_cities(&query).await;
                debug!(query = %query, count = found.len(), "Publishing suggestions");
                suggestions.send_replace(found);
            })
            .await;
    }

    /// Explicit lookup (button or Enter).
    ///
    /// Uses the first visible suggestion when there is one, otherwise
    /// geocodes the typed text.
    pub async fn submit(&self, text: &str) -> Result<CityVerdict, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::validation("Please enter a city name"));
        }

        self.debouncer.cancel().await;
        let first = self.suggestions.send_replace(Vec::new()).into_iter().next();

        match first {
            Some(location) => Ok(self.service.check_location(&self.lookups, location).await),
            None => self.service.check_city(&self.lookups, text).await,
        }
    }

    /// Pick a suggestion by its position in the current list.
    pub async fn select(&self, index: usize) -> Option<CityVerdict> {
        let chosen = self.current().into_iter().nth(index)?;
        self.debouncer.cancel().await;
        self.suggestions.send_replace(Vec::new());
        Some(self.service.check_location(&self.lookups, chosen).await)
    }
}
