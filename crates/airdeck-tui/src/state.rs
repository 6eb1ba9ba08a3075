//! Dashboard state and the reducer that owns every mutation of it.
//!
//! `reduce` performs no I/O and never reads the clock; side effects come
//! back as [`Effect`]s for the app loop to execute.

use std::collections::BTreeMap;
use std::net::IpAddr;

use airdeck_core::{DeviceRegistry, DiscoveredDevice, EventLog, TempUnit};
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::prompt::{Prompt, PromptKey, PromptStep};

/// Work requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Poll(String),
    FetchConfig(String),
    /// Persist the full ip -> name map.
    SaveNames(BTreeMap<String, String>),
    /// Run a one-shot discovery scan.
    Discover,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub registry: DeviceRegistry,
    pub log: EventLog,
    pub prompt: Option<Prompt>,
    /// Last known terminal size (cols, rows).
    pub size: (u16, u16),
    pub unit: TempUnit,
    pub discovery_enabled: bool,
    pub running: bool,
}

impl Dashboard {
    /// Seed the dashboard from persisted names and command-line addresses.
    pub fn new(
        names: BTreeMap<String, String>,
        ips: &[String],
        unit: TempUnit,
        discovery_enabled: bool,
        now: DateTime<Local>,
    ) -> Self {
        let mut log = EventLog::new();
        if !names.is_empty() {
            log.push(
                now,
                format!("Loaded {} device name(s) from config", names.len()),
            );
        }

        let mut registry = DeviceRegistry::with_names(names);
        for ip in ips {
            let device = registry.upsert(ip, None);
            log.push(now, format!("Added device: {}", device.name));
        }

        Self {
            registry,
            log,
            prompt: None,
            size: (0, 0),
            unit,
            discovery_enabled,
            running: true,
        }
    }

    /// Initial poll and config fetch for every seeded device.
    pub fn startup_effects(&self) -> Vec<Effect> {
        self.registry
            .ordered_devices()
            .flat_map(|d| [Effect::Poll(d.ip.clone()), Effect::FetchConfig(d.ip.clone())])
            .collect()
    }

    pub fn reduce(&mut self, action: Action, now: DateTime<Local>) -> Vec<Effect> {
        match action {
            Action::Tick => self.poll_all(),
            Action::Render => Vec::new(),
            Action::Resize(w, h) => {
                self.size = (w, h);
                Vec::new()
            }
            Action::Key(key) => self.handle_key(key, now),
            Action::Reading { ip, result } => {
                self.registry.record_reading(&ip, result, now);
                Vec::new()
            }
            Action::Config { ip, config } => {
                if let Some(config) = config {
                    self.registry.attach_config(&ip, config);
                }
                Vec::new()
            }
            Action::Discovered(device) => self.add_discovered(&device, now),
            Action::DiscoveryBatch(devices) => {
                let effects: Vec<Effect> = devices
                    .iter()
                    .flat_map(|d| self.add_discovered(d, now))
                    .collect();
                if effects.is_empty() {
                    self.log.push(now, "No new devices found");
                }
                effects
            }
        }
    }

    fn poll_all(&self) -> Vec<Effect> {
        self.registry
            .ordered_devices()
            .map(|d| Effect::Poll(d.ip.clone()))
            .collect()
    }

    fn add_discovered(&mut self, found: &DiscoveredDevice, now: DateTime<Local>) -> Vec<Effect> {
        if self.registry.contains(&found.ip) {
            return Vec::new();
        }
        let device = self.registry.upsert(&found.ip, Some(&found.name));
        let message = format!("Discovered: {} at {}", device.name, found.ip);
        self.log.push(now, message);
        vec![
            Effect::Poll(found.ip.clone()),
            Effect::FetchConfig(found.ip.clone()),
        ]
    }

    // ── Keys ─────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent, now: DateTime<Local>) -> Vec<Effect> {
        if self.prompt.is_some() {
            return self.handle_prompt_key(key, now);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.quit(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('r') => {
                self.log.push(now, "Refreshing...");
                self.poll_all()
            }
            KeyCode::Char('a') => {
                self.prompt = Some(Prompt::new());
                Vec::new()
            }
            KeyCode::Char('d') => {
                if self.discovery_enabled {
                    self.log.push(now, "Restarting mDNS discovery...");
                    vec![Effect::Discover]
                } else {
                    self.log.push(now, "Discovery disabled (--no-discovery)");
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }

    fn quit(&mut self) -> Vec<Effect> {
        self.running = false;
        vec![Effect::Quit]
    }

    fn handle_prompt_key(&mut self, key: KeyEvent, now: DateTime<Local>) -> Vec<Effect> {
        let Some(prompt) = self.prompt.as_mut() else {
            return Vec::new();
        };

        let value = match prompt.handle_key(key) {
            PromptKey::Edited => return Vec::new(),
            PromptKey::Cancel => {
                self.prompt = None;
                return Vec::new();
            }
            PromptKey::Submit(value) => value,
        };

        match prompt.step.clone() {
            PromptStep::AwaitingIp => {
                if value.is_empty() {
                    self.prompt = None;
                } else if value.parse::<IpAddr>().is_err() {
                    self.log.push(now, format!("Invalid IP: {value}"));
                    self.prompt = None;
                } else {
                    prompt.ask_name(value);
                }
                Vec::new()
            }
            PromptStep::AwaitingName { ip } => {
                self.prompt = None;
                let mut effects = Vec::new();
                if !value.is_empty() {
                    self.registry.set_persisted_name(&ip, &value);
                    effects.push(Effect::SaveNames(self.registry.persisted_names().clone()));
                }
                let device = self.registry.upsert(&ip, Some(&value));
                let message = format!("Added device: {} ({ip})", device.name);
                self.log.push(now, message);
                effects.push(Effect::Poll(ip.clone()));
                effects.push(Effect::FetchConfig(ip));
                effects
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use airdeck_core::{DeviceConfig, SensorData};
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(code: KeyCode) -> Action {
        Action::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(dash: &mut Dashboard, s: &str, now: DateTime<Local>) {
        for c in s.chars() {
            dash.reduce(key(KeyCode::Char(c)), now);
        }
    }

    fn last_log(dash: &Dashboard) -> &str {
        dash.log.last().map(|e| e.message.as_str()).unwrap_or_default()
    }

    fn empty() -> Dashboard {
        Dashboard::new(BTreeMap::new(), &[], TempUnit::Celsius, true, Local::now())
    }

    #[test]
    fn startup_logs_and_effects() {
        let names = BTreeMap::from([("10.0.0.1".to_owned(), "Kitchen".to_owned())]);
        let ips = ["10.0.0.1".to_owned(), "10.0.0.2".to_owned()];
        let dash = Dashboard::new(names, &ips, TempUnit::Celsius, true, Local::now());

        let messages: Vec<&str> = dash.log.visible().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "Loaded 1 device name(s) from config",
                "Added device: Kitchen",
                "Added device: 10.0.0.2",
            ]
        );
        assert_eq!(
            dash.startup_effects(),
            [
                Effect::Poll("10.0.0.1".into()),
                Effect::FetchConfig("10.0.0.1".into()),
                Effect::Poll("10.0.0.2".into()),
                Effect::FetchConfig("10.0.0.2".into()),
            ]
        );
    }

    #[test]
    fn reduce_is_deterministic() {
        let now = Local::now();
        let base = Dashboard::new(
            BTreeMap::new(),
            &["10.0.0.1".to_owned()],
            TempUnit::Celsius,
            true,
            now,
        );
        let actions = [
            Action::Tick,
            Action::Discovered(DiscoveredDevice {
                name: "awair-x".into(),
                ip: "10.0.0.5".into(),
                port: 80,
            }),
            Action::Reading {
                ip: "10.0.0.1".into(),
                result: Err("HTTP 500".into()),
            },
            key(KeyCode::Char('r')),
            key(KeyCode::Char('a')),
        ];
        for action in actions {
            let mut left = base.clone();
            let mut right = base.clone();
            let left_effects = left.reduce(action.clone(), now);
            let right_effects = right.reduce(action, now);
            assert_eq!(left, right);
            assert_eq!(left_effects, right_effects);
        }
    }

    #[test]
    fn discovery_adds_once() {
        let now = Local::now();
        let mut dash = empty();
        let found = DiscoveredDevice {
            name: "awair-x".into(),
            ip: "10.0.0.5".into(),
            port: 80,
        };

        let fx = dash.reduce(Action::Discovered(found.clone()), now);
        assert_eq!(
            fx,
            [
                Effect::Poll("10.0.0.5".into()),
                Effect::FetchConfig("10.0.0.5".into()),
            ]
        );
        assert_eq!(last_log(&dash), "Discovered: awair-x at 10.0.0.5");

        assert!(dash.reduce(Action::Discovered(found.clone()), now).is_empty());
        assert!(dash.reduce(Action::DiscoveryBatch(vec![found]), now).is_empty());
        assert_eq!(last_log(&dash), "No new devices found");
        assert_eq!(dash.registry.len(), 1);
    }

    #[test]
    fn tick_polls_in_registry_order() {
        let ips = ["10.0.0.2".to_owned(), "10.0.0.1".to_owned()];
        let mut dash = Dashboard::new(BTreeMap::new(), &ips, TempUnit::Celsius, true, Local::now());
        assert_eq!(
            dash.reduce(Action::Tick, Local::now()),
            [Effect::Poll("10.0.0.2".into()), Effect::Poll("10.0.0.1".into())]
        );
    }

    #[test]
    fn error_after_success_keeps_reading() {
        let now = Local::now();
        let mut dash = Dashboard::new(
            BTreeMap::new(),
            &["10.0.0.1".to_owned()],
            TempUnit::Celsius,
            true,
            now,
        );
        let reading = SensorData {
            score: 77,
            ..SensorData::default()
        };
        dash.reduce(
            Action::Reading {
                ip: "10.0.0.1".into(),
                result: Ok(reading.clone()),
            },
            now,
        );
        dash.reduce(
            Action::Reading {
                ip: "10.0.0.1".into(),
                result: Err("timed out".into()),
            },
            now,
        );
        let device = dash.registry.get("10.0.0.1").unwrap();
        assert_eq!(device.reading.as_ref(), Some(&reading));
        assert_eq!(device.last_error.as_deref(), Some("timed out"));
    }

    #[test]
    fn invalid_ip_is_logged_and_closes_prompt() {
        let now = Local::now();
        let mut dash = empty();
        dash.reduce(key(KeyCode::Char('a')), now);
        type_str(&mut dash, "not-an-ip", now);
        let fx = dash.reduce(key(KeyCode::Enter), now);

        assert!(fx.is_empty());
        assert!(dash.prompt.is_none());
        assert!(dash.registry.is_empty());
        assert_eq!(last_log(&dash), "Invalid IP: not-an-ip");
    }

    #[test]
    fn empty_ip_closes_silently() {
        let now = Local::now();
        let mut dash = empty();
        dash.reduce(key(KeyCode::Char('a')), now);
        let logged = dash.log.len();
        dash.reduce(key(KeyCode::Enter), now);
        assert!(dash.prompt.is_none());
        assert_eq!(dash.log.len(), logged);
    }

    #[test]
    fn add_device_with_name_persists_it() {
        let now = Local::now();
        let mut dash = empty();
        dash.reduce(key(KeyCode::Char('a')), now);
        type_str(&mut dash, "10.0.0.9", now);
        dash.reduce(key(KeyCode::Enter), now);
        assert!(matches!(
            dash.prompt.as_ref().map(|p| &p.step),
            Some(PromptStep::AwaitingName { ip }) if ip == "10.0.0.9"
        ));

        type_str(&mut dash, "Office", now);
        let fx = dash.reduce(key(KeyCode::Enter), now);

        let expected_names = BTreeMap::from([("10.0.0.9".to_owned(), "Office".to_owned())]);
        assert_eq!(
            fx,
            [
                Effect::SaveNames(expected_names),
                Effect::Poll("10.0.0.9".into()),
                Effect::FetchConfig("10.0.0.9".into()),
            ]
        );
        assert!(dash.prompt.is_none());
        assert_eq!(dash.registry.get("10.0.0.9").unwrap().name, "Office");
        assert_eq!(last_log(&dash), "Added device: Office (10.0.0.9)");
    }

    #[test]
    fn add_device_without_name_skips_save() {
        let now = Local::now();
        let mut dash = empty();
        dash.reduce(key(KeyCode::Char('a')), now);
        type_str(&mut dash, "10.0.0.9", now);
        dash.reduce(key(KeyCode::Enter), now);
        let fx = dash.reduce(key(KeyCode::Enter), now);

        assert_eq!(
            fx,
            [
                Effect::Poll("10.0.0.9".into()),
                Effect::FetchConfig("10.0.0.9".into()),
            ]
        );
        assert_eq!(last_log(&dash), "Added device: 10.0.0.9 (10.0.0.9)");
    }

    #[test]
    fn prompt_swallows_shortcuts() {
        let now = Local::now();
        let mut dash = empty();
        dash.reduce(key(KeyCode::Char('a')), now);
        let fx = dash.reduce(key(KeyCode::Char('q')), now);
        assert!(fx.is_empty());
        assert!(dash.running);
        assert_eq!(dash.prompt.as_ref().unwrap().input.value(), "q");

        dash.reduce(key(KeyCode::Esc), now);
        assert!(dash.prompt.is_none());
        assert!(dash.running);
    }

    #[test]
    fn quit_keys() {
        for action in [
            key(KeyCode::Char('q')),
            key(KeyCode::Esc),
            Action::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        ] {
            let mut dash = empty();
            assert_eq!(dash.reduce(action, Local::now()), [Effect::Quit]);
            assert!(!dash.running);
        }
    }

    #[test]
    fn discovery_key_respects_flag() {
        let now = Local::now();
        let mut dash = empty();
        assert_eq!(dash.reduce(key(KeyCode::Char('d')), now), [Effect::Discover]);
        assert_eq!(last_log(&dash), "Restarting mDNS discovery...");

        let mut disabled = Dashboard::new(BTreeMap::new(), &[], TempUnit::Celsius, false, now);
        assert!(disabled.reduce(key(KeyCode::Char('d')), now).is_empty());
        assert_eq!(last_log(&disabled), "Discovery disabled (--no-discovery)");
    }

    fn config(uuid: &str) -> Option<DeviceConfig> {
        Some(DeviceConfig {
            device_uuid: uuid.into(),
            ..DeviceConfig::default()
        })
    }

    #[test]
    fn resize_records_size_only() {
        let mut dash = empty();
        let before = dash.clone();

        assert!(dash.reduce(Action::Resize(132, 43), Local::now()).is_empty());
        assert_eq!(dash.size, (132, 43));
        assert_eq!(dash.registry, before.registry);
        assert_eq!(dash.log, before.log);
    }

    #[test]
    fn missing_config_changes_nothing() {
        let now = Local::now();
        let mut dash = Dashboard::new(
            BTreeMap::new(),
            &["10.0.0.4".to_owned()],
            TempUnit::Celsius,
            true,
            now,
        );
        let before = dash.clone();

        let fx = dash.reduce(
            Action::Config {
                ip: "10.0.0.4".into(),
                config: None,
            },
            now,
        );

        assert!(fx.is_empty());
        assert_eq!(dash, before);
    }

    #[test]
    fn config_names_a_device_known_only_by_ip() {
        let now = Local::now();
        let mut dash = Dashboard::new(
            BTreeMap::new(),
            &["10.0.0.4".to_owned()],
            TempUnit::Celsius,
            true,
            now,
        );

        let fx = dash.reduce(
            Action::Config {
                ip: "10.0.0.4".into(),
                config: config("awair-omni_1234"),
            },
            now,
        );

        assert!(fx.is_empty());
        let device = dash.registry.get("10.0.0.4").unwrap();
        assert_eq!(device.name, "awair-omni_1234");
        assert!(device.config.is_some());
    }

    #[test]
    fn persisted_name_beats_later_config() {
        let now = Local::now();
        let names = BTreeMap::from([("10.0.0.4".to_owned(), "Bedroom".to_owned())]);
        let mut dash = Dashboard::new(
            names,
            &["10.0.0.4".to_owned()],
            TempUnit::Celsius,
            true,
            now,
        );

        dash.reduce(
            Action::Config {
                ip: "10.0.0.4".into(),
                config: config("awair-omni_1234"),
            },
            now,
        );

        let device = dash.registry.get("10.0.0.4").unwrap();
        assert_eq!(device.name, "Bedroom");
        assert_eq!(
            device.config.as_ref().map(|c| c.device_uuid.as_str()),
            Some("awair-omni_1234")
        );
    }
}
