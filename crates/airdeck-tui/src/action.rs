//! All possible dashboard actions. Actions are the sole mechanism for state mutation.

use airdeck_core::{DeviceConfig, DiscoveredDevice, PollEvent, SensorData};
use crossterm::event::KeyEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Timers ───────────────────────────────────────────────────────
    /// Time for a full poll pass.
    Tick,
    /// Redraw from current state.
    Render,
    /// Terminal was resized to (cols, rows).
    Resize(u16, u16),

    // ── Input ────────────────────────────────────────────────────────
    Key(KeyEvent),

    // ── Background results ───────────────────────────────────────────
    Reading {
        ip: String,
        result: Result<SensorData, String>,
    },
    Config {
        ip: String,
        config: Option<DeviceConfig>,
    },
    /// One candidate from continuous discovery.
    Discovered(DiscoveredDevice),
    /// Result of a user-requested rescan.
    DiscoveryBatch(Vec<DiscoveredDevice>),
}

impl From<PollEvent> for Action {
    fn from(event: PollEvent) -> Self {
        match event {
            PollEvent::Tick => Self::Tick,
            PollEvent::Reading { ip, result } => Self::Reading { ip, result },
            PollEvent::Config { ip, config } => Self::Config { ip, config },
        }
    }
}

impl From<DiscoveredDevice> for Action {
    fn from(device: DiscoveredDevice) -> Self {
        Self::Discovered(device)
    }
}
