// ── mDNS discovery ──
//
// Sensors advertise themselves as plain `_http._tcp` services with "awair"
// somewhere in the instance name. Discovery only produces candidates; the
// dashboard decides what is new.

use std::collections::HashSet;
use std::net::IpAddr;
use std::time::Duration;

use mdns_sd::{ServiceDaemon, ServiceEvent};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::CoreError;

/// Service type browsed for sensors.
pub const SERVICE_TYPE: &str = "_http._tcp.local.";

/// Query window for each pass of continuous discovery.
pub const CONTINUOUS_WINDOW: Duration = Duration::from_secs(5);

/// Pause between passes of continuous discovery.
pub const REQUERY_INTERVAL: Duration = Duration::from_secs(30);

/// Query window for a one-shot rescan.
pub const ONE_SHOT_WINDOW: Duration = Duration::from_secs(10);

const NAME_MARKER: &str = "awair";
const SERVICE_SUFFIX: &str = "._http._tcp";

/// A sensor seen on the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredDevice {
    pub name: String,
    pub ip: String,
    pub port: u16,
}

/// Turn a resolved service into a candidate, if it looks like a sensor.
///
/// Keeps instances whose name contains "awair" (any case) and that have an
/// IPv4 address. The service suffix is stripped from the instance name.
pub fn parse_candidate<'a>(
    fullname: &str,
    addrs: impl IntoIterator<Item = &'a IpAddr>,
    port: u16,
) -> Option<DiscoveredDevice> {
    if !fullname.to_lowercase().contains(NAME_MARKER) {
        return None;
    }

    let mut v4: Vec<_> = addrs
        .into_iter()
        .filter_map(|addr| match addr {
            IpAddr::V4(v4) => Some(*v4),
            IpAddr::V6(_) => None,
        })
        .collect();
    // Resolution sets are unordered; pick deterministically.
    v4.sort_unstable();
    let ip = v4.first()?;

    let name = fullname
        .find(SERVICE_SUFFIX)
        .map_or(fullname, |idx| &fullname[..idx])
        .trim_end_matches('.');

    Some(DiscoveredDevice {
        name: name.to_owned(),
        ip: ip.to_string(),
        port,
    })
}

/// Browse for `window` and return every distinct candidate, in the order
/// they resolved. Returns early, with what it has, if cancelled.
pub async fn query(
    daemon: &ServiceDaemon,
    window: Duration,
    cancel: &CancellationToken,
) -> Result<Vec<DiscoveredDevice>, CoreError> {
    let receiver = daemon
        .browse(SERVICE_TYPE)
        .map_err(|e| CoreError::BrowseFailed {
            service: SERVICE_TYPE.to_owned(),
            message: e.to_string(),
        })?;

    let deadline = tokio::time::sleep(window);
    tokio::pin!(deadline);

    let mut seen = HashSet::new();
    let mut found = Vec::new();

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            () = &mut deadline => break,
            event = receiver.recv_async() => {
                let Ok(event) = event else { break };
                if let ServiceEvent::ServiceResolved(info) = event {
                    let candidate = parse_candidate(
                        info.get_fullname(),
                        info.get_addresses(),
                        info.get_port(),
                    );
                    if let Some(device) = candidate {
                        if seen.insert(device.ip.clone()) {
                            debug!(name = %device.name, ip = %device.ip, "sensor resolved");
                            found.push(device);
                        }
                    }
                }
            }
        }
    }

    if let Err(e) = daemon.stop_browse(SERVICE_TYPE) {
        debug!(error = %e, "stop_browse failed");
    }
    Ok(found)
}

/// Query every [`REQUERY_INTERVAL`] and send each candidate until
/// cancelled. Runs for the life of the dashboard.
pub async fn run_discovery<T>(tx: mpsc::UnboundedSender<T>, cancel: CancellationToken)
where
    T: From<DiscoveredDevice>,
{
    let daemon = match ServiceDaemon::new() {
        Ok(daemon) => daemon,
        Err(e) => {
            warn!(error = %e, "mDNS unavailable, continuous discovery disabled");
            return;
        }
    };
    info!("continuous mDNS discovery started");

    'outer: loop {
        match query(&daemon, CONTINUOUS_WINDOW, &cancel).await {
            Ok(devices) => {
                for device in devices {
                    if tx.send(T::from(device)).is_err() {
                        break 'outer;
                    }
                }
            }
            Err(e) => warn!(error = %e, "discovery pass failed"),
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            () = tokio::time::sleep(REQUERY_INTERVAL) => {}
        }
    }

    shutdown(&daemon);
    debug!("continuous mDNS discovery stopped");
}

/// Run a single [`ONE_SHOT_WINDOW`] query on a fresh daemon.
pub async fn discover_once(
    cancel: &CancellationToken,
) -> Result<Vec<DiscoveredDevice>, CoreError> {
    let daemon = ServiceDaemon::new()?;
    let result = query(&daemon, ONE_SHOT_WINDOW, cancel).await;
    shutdown(&daemon);
    result
}

fn shutdown(daemon: &ServiceDaemon) {
    if let Err(e) = daemon.shutdown() {
        debug!(error = %e, "mDNS daemon shutdown failed");
    }
}
