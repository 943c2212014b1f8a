use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, warn};
use tokio::sync::Mutex;

use crate::model::SearchLocation;
use crate::provider::ForecastProvider;
use crate::view::{ResultsView, ViewState};

/// Drives a single search: show the loading state, await the provider, then
/// show results or the error. Owns the results view.
///
/// Concurrent searches are allowed; each one takes a fresh generation token
/// and a response is only rendered while its token is still the most recently
/// issued one. The last search *initiated* therefore wins the displayed
/// state, and a stale response can never overwrite a fresher one.
#[derive(Debug)]
pub struct SearchController<P> {
    provider: P,
    view: Mutex<ResultsView>,
    generation: AtomicU64,
}

impl<P: ForecastProvider> SearchController<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            view: Mutex::new(ResultsView::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// Runs one search for `location`. Never fails: every provider error ends
    /// in the error view instead.
    ///
    /// Staleness is checked while holding the view lock, for the loading
    /// render as well as the final one; a render happens only if this call's
    /// token is still the newest at that moment.
    pub async fn on_search(&self, location: &SearchLocation) {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("search requested for {}", location.title);

        {
            let mut view = self.view.lock().await;
            if self.generation.load(Ordering::SeqCst) == token {
                view.render_loading();
            }
        }

        let result = self.provider.fetch_forecast(location.lat, location.lng).await;

        let mut view = self.view.lock().await;
        if self.generation.load(Ordering::SeqCst) != token {
            debug!("discarding stale response for {}", location.title);
            return;
        }

        match result {
            Ok(forecasts) => view.render_results(location.clone(), forecasts),
            Err(err) => view.render_error(&err),
        }
    }

    /// Search for the user's current position. Not wired up yet: the
    /// geolocation and permission flow is undecided, so this is deliberately
    /// a no-op. Extension point.
    pub fn on_search_my_location(&self) {
        warn!("search by current location is not supported yet");
    }

    /// Snapshot of what the results area currently shows.
    pub async fn state(&self) -> ViewState {
        self.view.lock().await.state().clone()
    }

    /// The results area rendered as terminal text.
    pub async fn render(&self) -> String {
        self.view.lock().await.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Forecast;
    use crate::provider::WeatherError;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex as StdMutex};
    use std::time::Duration;
    use tokio::sync::Notify;

    struct Plan {
        delay: Duration,
        result: Result<Vec<Forecast>, WeatherError>,
        started: Option<Arc<Notify>>,
    }

    impl std::fmt::Debug for Plan {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Plan").field("delay", &self.delay).finish()
        }
    }

    /// Scripted provider: each coordinate pair resolves once, after its
    /// configured delay, with its configured outcome.
    #[derive(Debug, Default)]
    struct ScriptedProvider {
        plans: StdMutex<HashMap<u64, Plan>>,
    }

    impl ScriptedProvider {
        fn plan(self, lat: f64, delay: Duration, result: Result<Vec<Forecast>, WeatherError>) -> Self {
            self.plans.lock().expect("plans lock").insert(
                lat.to_bits(),
                Plan {
                    delay,
                    result,
                    started: None,
                },
            );
            self
        }

        /// Like `plan`, but notifies `started` once the fetch for this
        /// location has begun (i.e. its search token has been allocated).
        fn plan_with_start_signal(
            self,
            lat: f64,
            delay: Duration,
            result: Result<Vec<Forecast>, WeatherError>,
            started: Arc<Notify>,
        ) -> Self {
            self.plans.lock().expect("plans lock").insert(
                lat.to_bits(),
                Plan {
                    delay,
                    result,
                    started: Some(started),
                },
            );
            self
        }
    }

    #[async_trait]
    impl ForecastProvider for ScriptedProvider {
        async fn fetch_forecast(&self, lat: f64, _lng: f64) -> Result<Vec<Forecast>, WeatherError> {
            let plan = self
                .plans
                .lock()
                .expect("plans lock")
                .remove(&lat.to_bits())
                .expect("no plan for this location");
            if let Some(started) = &plan.started {
                started.notify_one();
            }
            tokio::time::sleep(plan.delay).await;
            plan.result
        }
    }

    fn location(title: &str, lat: f64) -> SearchLocation {
        SearchLocation {
            title: title.to_string(),
            lat,
            lng: 0.0,
        }
    }

    fn forecast(time: &str) -> Forecast {
        Forecast {
            time: time.to_string(),
            temperature: Some(1.0),
            precipitation: 0.0,
        }
    }

    fn http_500() -> WeatherError {
        WeatherError::HttpStatus {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        }
    }

    #[tokio::test]
    async fn successful_search_renders_results() {
        let reykjavik = location("Reykjavík", 64.1355);
        let provider = ScriptedProvider::default().plan(
            reykjavik.lat,
            Duration::ZERO,
            Ok(vec![forecast("2024-01-01T00:00")]),
        );
        let controller = SearchController::new(provider);

        controller.on_search(&reykjavik).await;

        assert_eq!(
            controller.state().await,
            ViewState::Results {
                location: reykjavik,
                forecasts: vec![forecast("2024-01-01T00:00")],
            }
        );
    }

    #[tokio::test]
    async fn failed_search_renders_error_and_never_results() {
        let reykjavik = location("Reykjavík", 64.1355);
        let provider =
            ScriptedProvider::default().plan(reykjavik.lat, Duration::ZERO, Err(http_500()));
        let controller = SearchController::new(provider);

        controller.on_search(&reykjavik).await;

        match controller.state().await {
            ViewState::Error { message } => {
                assert!(message.contains("500 Internal Server Error"), "{message}");
            }
            other => panic!("expected error state, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn last_initiated_search_wins_over_a_slower_earlier_one() {
        let reykjavik = location("Reykjavík", 64.1355);
        let akureyri = location("Akureyri", 65.6835);
        let provider = ScriptedProvider::default()
            .plan(
                reykjavik.lat,
                Duration::from_millis(100),
                Ok(vec![forecast("slow")]),
            )
            .plan(
                akureyri.lat,
                Duration::from_millis(10),
                Ok(vec![forecast("fast")]),
            );
        let controller = SearchController::new(provider);

        // Reykjavík is initiated first but resolves last; its response must
        // be discarded in favour of the Akureyri search.
        tokio::join!(
            controller.on_search(&reykjavik),
            controller.on_search(&akureyri)
        );

        assert_eq!(
            controller.state().await,
            ViewState::Results {
                location: akureyri,
                forecasts: vec![forecast("fast")],
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stale_failure_does_not_overwrite_fresh_results() {
        let reykjavik = location("Reykjavík", 64.1355);
        let akureyri = location("Akureyri", 65.6835);
        let provider = ScriptedProvider::default()
            .plan(reykjavik.lat, Duration::from_millis(100), Err(http_500()))
            .plan(
                akureyri.lat,
                Duration::from_millis(10),
                Ok(vec![forecast("fast")]),
            );
        let controller = SearchController::new(provider);

        tokio::join!(
            controller.on_search(&reykjavik),
            controller.on_search(&akureyri)
        );

        assert!(matches!(
            controller.state().await,
            ViewState::Results { .. }
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn stale_response_never_overwrites_a_fresher_one_across_threads() {
        // Both the loading and the final render are guarded by the generation
        // check under the view lock; with parallel workers the fresher search
        // must win every round, regardless of how the tasks interleave.
        for _ in 0..50 {
            let reykjavik = location("Reykjavík", 64.1355);
            let akureyri = location("Akureyri", 65.6835);
            let started = Arc::new(Notify::new());
            let provider = ScriptedProvider::default()
                .plan_with_start_signal(
                    reykjavik.lat,
                    Duration::from_millis(5),
                    Ok(vec![forecast("slow")]),
                    started.clone(),
                )
                .plan(akureyri.lat, Duration::ZERO, Ok(vec![forecast("fast")]));
            let controller = Arc::new(SearchController::new(provider));

            let first = {
                let controller = controller.clone();
                let reykjavik = reykjavik.clone();
                tokio::spawn(async move { controller.on_search(&reykjavik).await })
            };

            // Only initiate the second search once the first has its token.
            started.notified().await;

            let second = {
                let controller = controller.clone();
                let akureyri = akureyri.clone();
                tokio::spawn(async move { controller.on_search(&akureyri).await })
            };

            first.await.expect("first search task");
            second.await.expect("second search task");

            assert_eq!(
                controller.state().await,
                ViewState::Results {
                    location: akureyri,
                    forecasts: vec![forecast("fast")],
                }
            );
        }
    }

    #[tokio::test]
    async fn search_my_location_is_a_no_op() {
        let controller = SearchController::new(ScriptedProvider::default());

        controller.on_search_my_location();

        assert_eq!(controller.state().await, ViewState::Idle);
    }
}
