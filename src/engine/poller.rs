use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use tracing::{debug, error, info, warn};

use crate::engine::error::PollError;
use crate::engine::protocol::{PollerCommand, PollerResponse};
use crate::engine::render_target::{RenderTargets, CHARACTER_TABLE_ID};
use crate::engine::table::{render_table, RosterRow};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const MAX_POLL_INTERVAL: Duration = Duration::from_secs(3600);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/* =========================
   Sources
   ========================= */

/// Anything that can hand back the current remote roster.
pub trait RosterSource: Send + Sync {
    fn fetch_rows(&self) -> Result<Vec<RosterRow>, PollError>;
}

/// GETs the roster from the sheet's web-app URL.
pub struct HttpRosterSource {
    client: Client,
    url: String,
}

impl HttpRosterSource {
    pub fn new(url: impl Into<String>) -> Result<Self, PollError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl RosterSource for HttpRosterSource {
    fn fetch_rows(&self) -> Result<Vec<RosterRow>, PollError> {
        let body = self
            .client
            .get(&self.url)
            .send()?
            .error_for_status()?
            .text()?;

        serde_json::from_str::<Vec<RosterRow>>(&body).map_err(|e| PollError::Decode(e.to_string()))
    }
}

/* =========================
   One cycle
   ========================= */

/// Fetches once and, on success, replaces the character table. A failed
/// fetch or a failed primary render leaves every target untouched.
pub fn poll_once(
    source: &dyn RosterSource,
    targets: &Mutex<RenderTargets>,
    cycle: u64,
) -> Result<Vec<RosterRow>, PollError> {
    let result = source.fetch_rows().and_then(|rows| {
        let html = render_table(&rows);
        targets
            .lock()
            .map_err(|_| std::io::Error::other("render targets poisoned"))?
            .replace_content(CHARACTER_TABLE_ID, &html)?;
        Ok(rows)
    });

    match &result {
        Ok(rows) => info!(cycle, rows = rows.len(), "rendered character table"),
        Err(e) => error!(cycle, error = %e, "Error fetching data"),
    }

    result
}

/* =========================
   Timer
   ========================= */

#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Keeps a configured interval within `[MIN_POLL_INTERVAL, MAX_POLL_INTERVAL]`.
pub fn clamp_interval(interval: Duration) -> Duration {
    interval.clamp(MIN_POLL_INTERVAL, MAX_POLL_INTERVAL)
}

/// Channels to a running poller.
pub struct PollerHandle {
    pub cmd_tx: Sender<PollerCommand>,
    pub resp_rx: Receiver<PollerResponse>,
}

pub struct Poller {
    interval: Duration,
    source: Arc<dyn RosterSource>,
    targets: Arc<Mutex<RenderTargets>>,
    resp_tx: Sender<PollerResponse>,
    on_update: Arc<dyn Fn() + Send + Sync>,
    cycles: AtomicU64,
    latest_finished: Arc<AtomicU64>,
}

impl Poller {
    /// Starts the timer thread. The first cycle runs immediately, then one
    /// every `config.interval`. Each cycle fetches on its own thread, so a
    /// slow request can finish after a newer one; whichever finishes last
    /// is what stays rendered.
    pub fn spawn(
        config: PollerConfig,
        source: Arc<dyn RosterSource>,
        targets: RenderTargets,
        on_update: Arc<dyn Fn() + Send + Sync>,
    ) -> PollerHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        let interval = clamp_interval(config.interval);
        if interval != config.interval {
            warn!(
                requested_secs = config.interval.as_secs(),
                interval_secs = interval.as_secs(),
                "poll interval out of range, clamped"
            );
        }

        let poller = Poller {
            interval,
            source,
            targets: Arc::new(Mutex::new(targets)),
            resp_tx,
            on_update,
            cycles: AtomicU64::new(0),
            latest_finished: Arc::new(AtomicU64::new(0)),
        };

        thread::spawn(move || poller.run(cmd_rx));

        PollerHandle { cmd_tx, resp_rx }
    }

    fn run(&self, cmd_rx: Receiver<PollerCommand>) {
        info!(interval_secs = self.interval.as_secs(), "roster poller started");
        let mut next_tick = Instant::now();

        loop {
            let now = Instant::now();
            if now >= next_tick {
                self.start_cycle();
                next_tick = match next_tick.checked_add(self.interval) {
                    Some(tick) if tick > now => tick,
                    _ => now + self.interval,
                };
            }

            let wait = next_tick.saturating_duration_since(Instant::now());
            match cmd_rx.recv_timeout(wait) {
                Ok(PollerCommand::RefreshNow) => self.start_cycle(),
                Ok(PollerCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }
        }

        info!("roster poller stopped");
    }

    fn start_cycle(&self) {
        let cycle = self.cycles.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(cycle, "starting poll cycle");

        let source = Arc::clone(&self.source);
        let targets = Arc::clone(&self.targets);
        let resp_tx = self.resp_tx.clone();
        let on_update = Arc::clone(&self.on_update);
        let latest_finished = Arc::clone(&self.latest_finished);

        thread::spawn(move || {
            let response = match poll_once(source.as_ref(), &targets, cycle) {
                Ok(rows) => PollerResponse::TableRendered { cycle, rows },
                Err(e) => PollerResponse::FetchFailed {
                    cycle,
                    error: e.to_string(),
                },
            };

            let previous = latest_finished.fetch_max(cycle, Ordering::SeqCst);
            if previous > cycle {
                warn!(cycle, newer = previous, "poll cycle finished after a newer one");
            }

            let _ = resp_tx.send(response);
            on_update();
        });
    }
}
