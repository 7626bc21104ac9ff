//! Client-side state for one weather lookup at a time.
//!
//! [`WeatherHook`] wraps calls to the `/api/weather` proxy and publishes a
//! [`HookState`] through a `watch` channel. Each fetch is tagged with a
//! generation number; a response that settles after a newer fetch was issued
//! is dropped instead of overwriting fresher state.
//!
//! The hook spawns onto the current tokio runtime, so `set_selector` and
//! `refetch` must be called from within one. Dropping the hook aborts any
//! fetch still in flight.

use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tokio::{sync::watch, task::JoinSet};
use tracing::{debug, warn};

use crate::model::{LocationQuery, Selector, WeatherSnapshot};

/// Shown when the proxy fails without an `error` field.
pub const FETCH_FALLBACK_ERROR: &str = "Error al cargar datos del clima";

#[derive(Debug, Error)]
pub enum FetchError {
    /// The proxy answered with an error status.
    #[error("{0}")]
    Server(String),

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Thin HTTP client for the proxy route.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    base_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub async fn fetch(&self, selector: &Selector) -> Result<WeatherSnapshot, FetchError> {
        let url = format!("{}/api/weather", self.base_url);

        let res = self.http.get(&url).query(&selector.proxy_pairs()).send().await?;
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| FETCH_FALLBACK_ERROR.to_string());
            return Err(FetchError::Server(message));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// What a presentation layer renders from.
#[derive(Debug, Clone, Default)]
pub struct HookState {
    pub phase: Phase,
    /// Latest successful snapshot. Kept when a later fetch fails.
    pub data: Option<WeatherSnapshot>,
    pub error: Option<String>,
    /// Last selector handed to the hook.
    pub selector: LocationQuery,
    /// Tag of the most recently issued fetch.
    pub generation: u64,
}

impl HookState {
    pub fn loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn data(&self) -> Option<&WeatherSnapshot> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug)]
pub struct WeatherHook {
    client: WeatherClient,
    state: Arc<watch::Sender<HookState>>,
    tasks: JoinSet<()>,
}

impl WeatherHook {
    pub fn new(client: WeatherClient) -> Self {
        let (state, _) = watch::channel(HookState::default());
        Self {
            client,
            state: Arc::new(state),
            tasks: JoinSet::new(),
        }
    }

    /// Current state, cloned.
    pub fn state(&self) -> HookState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<HookState> {
        self.state.subscribe()
    }

    /// Point the hook at a new location. Fetches only when the selector changed.
    pub fn set_selector(&mut self, query: LocationQuery) {
        let changed = self.state.send_if_modified(|s| {
            if s.selector == query {
                return false;
            }
            s.selector = query;
            true
        });

        if changed {
            self.start();
        }
    }

    /// Re-run the fetch for the last selector.
    pub fn refetch(&mut self) {
        self.start();
    }

    /// Wait until the hook is not loading and return that state.
    pub async fn settled(&self) -> HookState {
        let mut rx = self.state.subscribe();
        rx.wait_for(|s| !s.loading())
            .await
            .map(|s| s.clone())
            .unwrap_or_else(|_| self.state())
    }

    fn start(&mut self) {
        let query = self.state.borrow().selector.clone();
        if query.is_empty() {
            return;
        }

        let mut generation = 0;
        self.state.send_modify(|s| {
            s.generation += 1;
            s.phase = Phase::Loading;
            s.error = None;
            generation = s.generation;
        });

        let selector = match query.selector() {
            Ok(selector) => selector,
            Err(e) => {
                settle(&self.state, generation, Err(e.public_message()));
                return;
            }
        };

        // reap finished fetches so the set only holds live ones
        while self.tasks.try_join_next().is_some() {}

        let client = self.client.clone();
        let state = Arc::clone(&self.state);
        self.tasks.spawn(async move {
            let outcome = client.fetch(&selector).await.map_err(|e| e.to_string());
            settle(&state, generation, outcome);
        });
    }
}

/// Apply a finished fetch if it is still the latest one. Returns whether it was applied.
fn settle(
    state: &watch::Sender<HookState>,
    generation: u64,
    outcome: Result<WeatherSnapshot, String>,
) -> bool {
    state.send_if_modified(|s| {
        if s.generation != generation {
            debug!(generation, latest = s.generation, "discarding stale weather response");
            return false;
        }

        match outcome {
            Ok(data) => {
                s.phase = Phase::Success;
                s.data = Some(data);
                s.error = None;
            }
            Err(message) => {
                warn!(%message, "weather fetch failed");
                s.phase = Phase::Failed;
                s.error = Some(message);
            }
        }
        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CurrentConditions, Location, WeatherDescriptor};

    fn snapshot(name: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            location: Location { name: name.into(), country: "ES".into(), lat: 0.0, lon: 0.0 },
            current: CurrentConditions {
                temp: 20,
                feels_like: 19,
                humidity: 50,
                pressure: 1013,
                visibility: 10,
                wind_speed: 5,
                wind_deg: 90,
                weather: WeatherDescriptor::default(),
            },
            forecast: vec![],
        }
    }

    #[test]
    fn stale_generation_is_discarded() {
        let (tx, _rx) = watch::channel(HookState { generation: 2, ..Default::default() });

        assert!(!settle(&tx, 1, Ok(snapshot("Old"))));
        assert!(tx.borrow().data.is_none());

        assert!(settle(&tx, 2, Ok(snapshot("New"))));
        let state = tx.borrow();
        assert_eq!(state.phase, Phase::Success);
        assert_eq!(state.data().unwrap().location.name, "New");
    }

    #[test]
    fn failure_keeps_previous_data() {
        let (tx, _rx) = watch::channel(HookState {
            generation: 3,
            data: Some(snapshot("Madrid")),
            ..Default::default()
        });

        assert!(settle(&tx, 3, Err("city not found".into())));
        let state = tx.borrow();
        assert_eq!(state.phase, Phase::Failed);
        assert!(!state.loading());
        assert_eq!(state.error(), Some("city not found"));
        assert_eq!(state.data().unwrap().location.name, "Madrid");
    }

    #[tokio::test]
    async fn empty_selector_stays_idle() {
        let mut hook = WeatherHook::new(WeatherClient::new("http://127.0.0.1:9"));

        hook.set_selector(LocationQuery::default());
        hook.refetch();

        let state = hook.state();
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.generation, 0);
    }

    #[tokio::test]
    async fn incomplete_coordinates_fail_without_request() {
        let mut hook = WeatherHook::new(WeatherClient::new("http://127.0.0.1:9"));

        hook.set_selector(LocationQuery { lat: Some(1.0), ..Default::default() });

        let state = hook.settled().await;
        assert_eq!(state.phase, Phase::Failed);
        assert_eq!(state.error(), Some(crate::error::INCOMPLETE_COORDINATES));
    }
}
