//! Application shell
//!
//! Owns the live snapshot and all UI state. Views read from it; user intents
//! come back through [`App::dispatch`]. Persistence runs through an injected
//! [`Gateway`] so nothing here knows whether saves go remote or local.

pub mod autosave;
pub mod help;
pub mod panel;

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::AUTOSAVE_INTERVAL_MS;
use crate::notifications::{NotificationFeed, Severity};
use crate::persistence::{Gateway, PersistError};
use crate::platform::now_ms;
use crate::settings::{GameSettings, SettingChange};
use crate::state::{MapSector, StateSnapshot, generate_sectors};

pub use autosave::AutosaveTimer;
pub use help::{HELP_KEY, HELP_SECTIONS, HelpOverlay, HelpSection};
pub use panel::Panel;

pub const MSG_LOAD_OK: &str = "Game state loaded successfully";
pub const MSG_LOAD_FAILED: &str = "Failed to load saved game state. Starting new game.";
pub const MSG_SAVE_FAILED: &str = "Failed to auto-save game state. Your progress might not be saved.";

/// A user action emitted by a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    ShowPanel(Panel),
    SelectSector(u32),
    ChangeSetting(SettingChange),
    OpenHelp,
    CloseHelp,
    ShowHelpSection(usize),
}

impl Intent {
    /// Global keyboard shortcuts
    pub fn from_key(key: &str) -> Option<Self> {
        (key == HELP_KEY).then_some(Intent::OpenHelp)
    }

    /// Decode a clickable element's `data-*` attribute
    pub fn from_data_attribute(name: &str, value: &str) -> Option<Self> {
        match name {
            "data-panel" => Panel::from_str(value).map(Intent::ShowPanel),
            "data-sector" => value.parse().ok().map(Intent::SelectSector),
            "data-help" => match value {
                "open" => Some(Intent::OpenHelp),
                "close" => Some(Intent::CloseHelp),
                _ => None,
            },
            "data-help-section" => value.parse().ok().map(Intent::ShowHelpSection),
            _ => None,
        }
    }
}

/// Attributes that mark a clickable element, most specific first
pub const CLICK_ATTRIBUTES: [&str; 4] = ["data-help-section", "data-help", "data-sector", "data-panel"];

/// The running dashboard
pub struct App {
    snapshot: StateSnapshot,
    feed: NotificationFeed,
    panel: Panel,
    selected_sector: Option<MapSector>,
    help: HelpOverlay,
    autosave: AutosaveTimer,
    gateway: Rc<dyn Gateway>,
    user_id: String,
    seed: u64,
}

impl App {
    /// New game with a map generated from `seed`
    pub fn new(gateway: Rc<dyn Gateway>, user_id: impl Into<String>, seed: u64) -> Self {
        Self {
            snapshot: StateSnapshot::new_game(seed),
            feed: NotificationFeed::new(),
            panel: Panel::default(),
            selected_sector: None,
            help: HelpOverlay::default(),
            autosave: AutosaveTimer::new(AUTOSAVE_INTERVAL_MS),
            gateway,
            user_id: user_id.into(),
            seed,
        }
    }

    pub fn snapshot(&self) -> &StateSnapshot {
        &self.snapshot
    }

    pub fn settings(&self) -> &GameSettings {
        &self.snapshot.settings
    }

    pub fn notifications(&self) -> &NotificationFeed {
        &self.feed
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn selected_sector(&self) -> Option<&MapSector> {
        self.selected_sector.as_ref()
    }

    pub fn help(&self) -> &HelpOverlay {
        &self.help
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn gateway(&self) -> Rc<dyn Gateway> {
        self.gateway.clone()
    }

    /// Apply a user intent
    pub fn dispatch(&mut self, intent: Intent, now: f64) {
        match intent {
            Intent::ShowPanel(panel) => self.panel = panel,
            Intent::SelectSector(id) => self.select_sector(id, now),
            Intent::ChangeSetting(change) => self.change_setting(change),
            Intent::OpenHelp => self.help.open(),
            Intent::CloseHelp => self.help.close(),
            Intent::ShowHelpSection(index) => self.help.select(index),
        }
    }

    fn select_sector(&mut self, id: u32, now: f64) {
        let Some(sector) = self.snapshot.sector(id).cloned() else {
            log::warn!("Ignoring click on unknown sector {}", id);
            return;
        };
        if sector.control.is_hostile() {
            self.notify(
                format!("Warning: High threat level detected in Sector {}", sector.id),
                Severity::Warning,
                now,
            );
        }
        self.selected_sector = Some(sector);
    }

    fn change_setting(&mut self, change: SettingChange) {
        let next = self.snapshot.settings.with_change(change);
        if next.auto_save != self.snapshot.settings.auto_save {
            log::info!("Autosave {}", if next.auto_save { "enabled" } else { "disabled" });
            self.autosave.rearm();
        }
        self.snapshot.settings = next;
    }

    /// Add to the feed unless notifications are turned off
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity, now: f64) {
        if !self.snapshot.settings.notifications {
            return;
        }
        self.feed.push(message, severity, now);
    }

    /// Advance the autosave countdown. Returns how many saves are now due,
    /// one per elapsed interval.
    pub fn tick(&mut self, dt_ms: f64) -> u32 {
        let due = self.autosave.advance(dt_ms, self.snapshot.settings.auto_save);
        if due > 1 {
            log::debug!("{} autosave periods elapsed", due);
        }
        due
    }

    /// Apply the outcome of the startup load
    pub fn on_loaded(&mut self, result: Result<Option<StateSnapshot>, PersistError>, now: f64) {
        match result {
            Ok(Some(saved)) => {
                self.replace_snapshot(saved);
                self.notify(MSG_LOAD_OK, Severity::Success, now);
            }
            Ok(None) => log::info!("No saved game, starting fresh"),
            Err(e) => {
                log::error!("Failed to load game state: {}", e);
                self.notify(MSG_LOAD_FAILED, Severity::Warning, now);
            }
        }
    }

    /// Apply the outcome of an autosave
    pub fn on_saved(&mut self, result: Result<(), PersistError>, now: f64) {
        if let Err(e) = result {
            log::error!("Failed to auto-save game state: {}", e);
            self.notify(MSG_SAVE_FAILED, Severity::Error, now);
        }
    }

    /// Swap in a loaded snapshot. A save without a map gets a fresh one.
    fn replace_snapshot(&mut self, mut saved: StateSnapshot) {
        if saved.map_sectors.is_empty() {
            saved.map_sectors = generate_sectors(self.seed);
        }
        self.selected_sector = None;
        self.snapshot = saved;
        self.autosave.rearm();
    }
}

/// Run the startup load and apply its result
pub async fn load_game(app: Rc<RefCell<App>>) {
    let (gateway, user_id) = {
        let app = app.borrow();
        (app.gateway(), app.user_id().to_string())
    };
    let result = gateway.load(&user_id).await;
    app.borrow_mut().on_loaded(result, now_ms());
}

/// Save the current snapshot and report failures to the feed
pub async fn save_game(app: Rc<RefCell<App>>) {
    let (gateway, user_id, snapshot) = {
        let app = app.borrow();
        (app.gateway(), app.user_id().to_string(), app.snapshot().clone())
    };
    let result = gateway.save(&user_id, &snapshot).await;
    app.borrow_mut().on_saved(result, now_ms());
}
