// ── Poll scheduler ──
//
// Every fetch runs as its own task and reports back through the dashboard's
// channel. Nothing here touches the registry; results are folded in by the
// single consumer of that channel, in arrival order.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use airdeck_api::{AirClient, DeviceConfig, SensorData};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Default seconds between full poll passes.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// The two sensor endpoints the dashboard depends on.
///
/// Implemented by [`AirClient`]; tests substitute an in-memory fake.
pub trait SensorApi: Clone + Send + Sync + 'static {
    type Error: Display + Send;

    fn fetch_reading(
        &self,
        ip: &str,
    ) -> impl Future<Output = Result<SensorData, Self::Error>> + Send;

    fn fetch_config(
        &self,
        ip: &str,
    ) -> impl Future<Output = Result<DeviceConfig, Self::Error>> + Send;
}

impl SensorApi for AirClient {
    type Error = airdeck_api::Error;

    fn fetch_reading(
        &self,
        ip: &str,
    ) -> impl Future<Output = Result<SensorData, Self::Error>> + Send {
        AirClient::fetch_reading(self, ip)
    }

    fn fetch_config(
        &self,
        ip: &str,
    ) -> impl Future<Output = Result<DeviceConfig, Self::Error>> + Send {
        AirClient::fetch_config(self, ip)
    }
}

/// Message produced by background poll work.
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    /// Time for a full pass over the registry.
    Tick,
    /// Outcome of one reading fetch. Errors are already rendered to text.
    Reading {
        ip: String,
        result: Result<SensorData, String>,
    },
    /// Outcome of a config fetch. Failures arrive as `None`.
    Config {
        ip: String,
        config: Option<DeviceConfig>,
    },
}

/// Spawns fetch tasks that report into a channel of `T`.
#[derive(Debug, Clone)]
pub struct Poller<C, T> {
    client: C,
    tx: mpsc::UnboundedSender<T>,
}

impl<C, T> Poller<C, T>
where
    C: SensorApi,
    T: From<PollEvent> + Send + 'static,
{
    pub fn new(client: C, tx: mpsc::UnboundedSender<T>) -> Self {
        Self { client, tx }
    }

    /// Start one reading fetch for `ip`.
    pub fn poll(&self, ip: &str) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let ip = ip.to_owned();
        tokio::spawn(async move {
            let result = client
                .fetch_reading(&ip)
                .await
                .map_err(|e| format!("{e}"));
            if let Err(ref e) = result {
                debug!(ip = %ip, error = %e, "poll failed");
            }
            // Receiver gone means the dashboard is shutting down.
            let _ = tx.send(T::from(PollEvent::Reading { ip, result }));
        });
    }

    /// Start one best-effort config fetch for `ip`.
    pub fn fetch_config(&self, ip: &str) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let ip = ip.to_owned();
        tokio::spawn(async move {
            let config = match client.fetch_config(&ip).await {
                Ok(config) => Some(config),
                Err(e) => {
                    debug!(ip = %ip, error = %e, "config fetch failed");
                    None
                }
            };
            let _ = tx.send(T::from(PollEvent::Config { ip, config }));
        });
    }
}

/// Send [`PollEvent::Tick`] every `period` until cancelled.
///
/// The first tick fires one full period after start; startup polls are
/// issued directly.
pub async fn run_ticker<T>(
    period: Duration,
    tx: mpsc::UnboundedSender<T>,
    cancel: CancellationToken,
) where
    T: From<PollEvent>,
{
    let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                trace!("poll tick");
                if tx.send(T::from(PollEvent::Tick)).is_err() {
                    break;
                }
            }
        }
    }
}
