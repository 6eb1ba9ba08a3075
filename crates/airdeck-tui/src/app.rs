//! Main event loop: terminal events and background results flow into one
//! action channel, the dashboard reduces them, and effects are executed here.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::time::Duration;

use airdeck_core::{AirClient, Poller, discovery, poller};
use chrono::Local;
use color_eyre::eyre::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::event::{Event, EventReader};
use crate::state::{Dashboard, Effect};
use crate::tui::Tui;
use crate::ui;

/// Redraw at least this often so timestamps stay current while idle.
const RENDER_RATE: Duration = Duration::from_secs(1);

type NameMap = BTreeMap<String, String>;

pub struct App {
    dash: Dashboard,
    /// Action sender, cloned into every background task.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver, drained by the main loop.
    action_rx: mpsc::UnboundedReceiver<Action>,
    poller: Poller<AirClient, Action>,
    poll_interval: Duration,
    /// Queue into the name writer. Dropped on shutdown to let it finish.
    save_tx: Option<mpsc::UnboundedSender<NameMap>>,
    save_rx: Option<mpsc::UnboundedReceiver<NameMap>>,
    name_writer: Option<JoinHandle<()>>,
    /// Parent token for the ticker, discovery and the event reader.
    cancel: CancellationToken,
}

impl App {
    pub fn new(dash: Dashboard, client: AirClient, poll_interval: Duration) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let poller = Poller::new(client, action_tx.clone());
        let (save_tx, save_rx) = mpsc::unbounded_channel();

        Self {
            dash,
            action_tx,
            action_rx,
            poller,
            poll_interval,
            save_tx: Some(save_tx),
            save_rx: Some(save_rx),
            name_writer: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        let (w, h) = tui.size().unwrap_or((80, 24));
        self.dispatch(Action::Resize(w, h));

        self.spawn_background();
        for effect in self.dash.startup_effects() {
            self.execute(effect);
        }

        let mut events = EventReader::new(RENDER_RATE, &self.cancel);
        tui.draw(|frame| ui::render(frame, &self.dash))?;

        info!("TUI event loop started");

        while self.dash.running {
            // 1. Wait for a terminal event or a background result
            let action = tokio::select! {
                event = events.next() => match event {
                    Some(Event::Key(key)) => Action::Key(key),
                    Some(Event::Resize(w, h)) => Action::Resize(w, h),
                    Some(Event::Render) => Action::Render,
                    None => break,
                },
                Some(action) = self.action_rx.recv() => action,
            };
            self.dispatch(action);

            // 2. Drain whatever else queued up, in arrival order
            while self.dash.running {
                let Ok(action) = self.action_rx.try_recv() else {
                    break;
                };
                self.dispatch(action);
            }

            // 3. Draw the post-reduction state
            tui.draw(|frame| ui::render(frame, &self.dash))?;
        }

        self.cancel.cancel();
        events.stop();
        info!("TUI event loop ended");

        // Let queued name saves land before the runtime goes away.
        drop(tui);
        self.save_tx = None;
        if let Some(writer) = self.name_writer.take() {
            if let Err(e) = writer.await {
                warn!(error = %e, "name writer stopped abnormally");
            }
        }
        Ok(())
    }

    fn spawn_background(&mut self) {
        if let Some(rx) = self.save_rx.take() {
            self.name_writer = Some(tokio::spawn(run_name_writer(
                rx,
                airdeck_config::save_names,
            )));
        }

        let tx = self.action_tx.clone();
        tokio::spawn(poller::run_ticker(
            self.poll_interval,
            tx,
            self.cancel.child_token(),
        ));

        if self.dash.discovery_enabled {
            let tx = self.action_tx.clone();
            tokio::spawn(discovery::run_discovery(tx, self.cancel.child_token()));
        }
    }

    fn dispatch(&mut self, action: Action) {
        for effect in self.dash.reduce(action, Local::now()) {
            self.execute(effect);
        }
    }

    fn execute(&self, effect: Effect) {
        match effect {
            Effect::Poll(ip) => self.poller.poll(&ip),
            Effect::FetchConfig(ip) => self.poller.fetch_config(&ip),
            Effect::SaveNames(names) => self.queue_save(names),
            Effect::Discover => self.discover_once(),
            Effect::Quit => self.cancel.cancel(),
        }
    }

    fn queue_save(&self, names: NameMap) {
        let Some(tx) = &self.save_tx else {
            return;
        };
        if tx.send(names).is_err() {
            warn!("name writer gone, device names not saved");
        }
    }

    fn discover_once(&self) {
        let tx = self.action_tx.clone();
        let cancel = self.cancel.child_token();
        tokio::spawn(async move {
            let found = match discovery::discover_once(&cancel).await {
                Ok(found) => found,
                Err(e) => {
                    warn!(error = %e, "one-shot discovery failed");
                    Vec::new()
                }
            };
            debug!(count = found.len(), "one-shot discovery finished");
            let _ = tx.send(Action::DiscoveryBatch(found));
        });
    }
}

/// Persist name maps one at a time, in request order.
///
/// When several maps are queued only the newest is written, since each one
/// is the complete map. Returns once every sender is gone and the queue is
/// empty. Failures are logged only.
async fn run_name_writer<F, E>(mut rx: mpsc::UnboundedReceiver<NameMap>, save: F)
where
    F: Fn(&NameMap) -> Result<(), E> + Clone + Send + 'static,
    E: Display + Send + 'static,
{
    while let Some(mut names) = rx.recv().await {
        while let Ok(newer) = rx.try_recv() {
            names = newer;
        }
        let save = save.clone();
        match tokio::task::spawn_blocking(move || save(&names)).await {
            Ok(Ok(())) => debug!("device names saved"),
            Ok(Err(e)) => warn!(error = %e, "failed to save device names"),
            Err(e) => warn!(error = %e, "name save task panicked"),
        }
    }
}
