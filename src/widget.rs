//! Mount/unmount lifecycle: location resolution, the first fetch, and the
//! polling timer that keeps the state fresh.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::config::WidgetConfig;
use crate::error::FetchError;
use crate::geolocation::{resolve, Geolocation, Resolution};
use crate::openweather::WeatherClient;
use crate::state::{Coordinates, WidgetState};

/// Write side of the widget state. Every write checks the liveness token
/// first, so nothing lands after unmount.
#[derive(Clone)]
struct StateStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    tx: watch::Sender<WidgetState>,
    liveness: CancellationToken,
    issued: AtomicU64,
    applied: AtomicU64,
}

impl StateStore {
    fn new(liveness: CancellationToken) -> (Self, watch::Receiver<WidgetState>) {
        let (tx, rx) = watch::channel(WidgetState::default());
        let store = Self {
            inner: Arc::new(StoreInner {
                tx,
                liveness,
                issued: AtomicU64::new(0),
                applied: AtomicU64::new(0),
            }),
        };
        (store, rx)
    }

    fn is_live(&self) -> bool {
        !self.inner.liveness.is_cancelled()
    }

    fn subscribe(&self) -> watch::Receiver<WidgetState> {
        self.inner.tx.subscribe()
    }

    fn coordinates(&self) -> Option<Coordinates> {
        self.inner.tx.borrow().coordinates
    }

    /// The liveness check runs under the channel's write lock, so an
    /// unmount on another thread cannot slip in before the write.
    fn update(&self, f: impl FnOnce(&mut WidgetState)) -> bool {
        let liveness = &self.inner.liveness;
        self.inner.tx.send_if_modified(|state| {
            if liveness.is_cancelled() {
                trace!("widget unmounted; state update dropped");
                return false;
            }
            f(state);
            true
        })
    }

    /// Numbers fetches in the order they were issued.
    fn issue_ticket(&self) -> u64 {
        self.inner.issued.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Like [`Self::update`], but a completion older than the newest one
    /// already applied is discarded.
    fn update_for(&self, ticket: u64, f: impl FnOnce(&mut WidgetState)) -> bool {
        let liveness = &self.inner.liveness;
        let applied = &self.inner.applied;
        self.inner.tx.send_if_modified(|state| {
            if liveness.is_cancelled() {
                trace!(ticket, "widget unmounted; fetch result dropped");
                return false;
            }
            if ticket < applied.load(Ordering::Relaxed) {
                debug!(ticket, "stale fetch result discarded");
                return false;
            }
            applied.store(ticket, Ordering::Relaxed);
            f(state);
            true
        })
    }
}

#[derive(Clone)]
struct Fetcher {
    client: WeatherClient,
    store: StateStore,
}

impl Fetcher {
    async fn fetch(self, at: Coordinates) {
        if !self.store.is_live() {
            return;
        }
        let ticket = self.store.issue_ticket();
        match self.client.current(at).await {
            Ok(report) => {
                self.store.update_for(ticket, |state| state.apply_report(at, report));
            }
            Err(err) => {
                warn!(error = %err, lat = at.lat, lon = at.lon, "weather fetch failed");
                self.store.update_for(ticket, WidgetState::apply_fetch_failure);
            }
        }
    }

    /// Runs on its own task; unmount does not abort it.
    fn spawn(&self, at: Coordinates) {
        tokio::spawn(self.clone().fetch(at));
    }
}

/// Recurring refresh. Aborted when dropped.
struct PollTimer {
    handle: JoinHandle<()>,
}

impl PollTimer {
    fn start(period: Duration, fetcher: Fetcher, liveness: CancellationToken) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    () = liveness.cancelled() => break,
                    _ = ticks.tick() => {
                        if let Some(at) = fetcher.store.coordinates() {
                            debug!(lat = at.lat, lon = at.lon, "poll tick");
                            fetcher.spawn(at);
                        }
                    }
                }
            }
        });
        Self { handle }
    }
}

impl Drop for PollTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Current weather for the resolved location, refreshed on a timer.
///
/// Must be mounted from inside a tokio runtime. Dropping the widget unmounts it.
pub struct LocationWeatherWidget {
    fetcher: Fetcher,
    liveness: CancellationToken,
    poller: Option<PollTimer>,
}

impl LocationWeatherWidget {
    pub fn mount<G>(config: WidgetConfig, geolocation: Option<G>) -> Result<Self, FetchError>
    where
        G: Geolocation + Send + Sync + 'static,
    {
        let client = WeatherClient::new(&config)?;
        Ok(Self::mount_with_client(client, &config, geolocation))
    }

    pub fn mount_with_client<G>(
        client: WeatherClient,
        config: &WidgetConfig,
        geolocation: Option<G>,
    ) -> Self
    where
        G: Geolocation + Send + Sync + 'static,
    {
        let liveness = CancellationToken::new();
        let (store, _) = StateStore::new(liveness.clone());
        let fetcher = Fetcher { client, store };

        tokio::spawn(locate_then_fetch(
            geolocation,
            config.geolocation_timeout,
            config.fallback,
            fetcher.clone(),
        ));
        let poller = PollTimer::start(config.poll_interval, fetcher.clone(), liveness.clone());
        info!(interval_ms = config.poll_interval.as_millis() as u64, "widget mounted");

        Self {
            fetcher,
            liveness,
            poller: Some(poller),
        }
    }

    pub fn state(&self) -> WidgetState {
        self.fetcher.store.inner.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<WidgetState> {
        self.fetcher.store.subscribe()
    }

    pub fn is_mounted(&self) -> bool {
        self.fetcher.store.is_live()
    }

    /// Fetch now for the last known coordinates, if any.
    pub fn refresh(&self) -> bool {
        match self.fetcher.store.coordinates() {
            Some(at) if self.is_mounted() => {
                self.fetcher.spawn(at);
                true
            }
            _ => false,
        }
    }

    /// Stops the timer and freezes the state. In-flight requests may still
    /// finish but their results are dropped.
    pub fn unmount(&mut self) {
        if self.liveness.is_cancelled() {
            return;
        }
        self.liveness.cancel();
        drop(self.poller.take());
        info!("widget unmounted");
    }
}

impl Drop for LocationWeatherWidget {
    fn drop(&mut self) {
        self.unmount();
    }
}

async fn locate_then_fetch<G: Geolocation>(
    geolocation: Option<G>,
    timeout: Duration,
    fallback: Coordinates,
    fetcher: Fetcher,
) {
    let at = match resolve(geolocation.as_ref(), timeout).await {
        Resolution::Located(at) => {
            if !fetcher.store.update(WidgetState::apply_position_granted) {
                return;
            }
            at
        }
        Resolution::Failed(_) => {
            if !fetcher.store.update(WidgetState::apply_position_denied) {
                return;
            }
            fallback
        }
        Resolution::Unsupported => {
            if !fetcher.store.update(WidgetState::apply_geolocation_unsupported) {
                return;
            }
            fallback
        }
    };
    fetcher.fetch(at).await;
}
