//! NeonGenesis - strategy game dashboard for the browser
//!
//! Core modules:
//! - `state`: Serializable game data (resources, units, quests, map)
//! - `settings`: Player preferences, saved with the game
//! - `notifications`: Bounded, newest-first notification feed
//! - `persistence`: Save/load gateway with LocalStorage fallback
//! - `remote`: DynamoDB/S3 clients over a pluggable HTTP transport
//! - `platform`: Browser/native platform abstraction
//! - `shell`: Application state and intent handling
//! - `view`: HTML rendering of the dashboard

pub mod config;
pub mod notifications;
pub mod persistence;
pub mod platform;
pub mod remote;
pub mod settings;
pub mod shell;
pub mod state;
pub mod view;

pub use notifications::{Notification, NotificationFeed, Severity};
pub use persistence::{Gateway, PersistError};
pub use settings::{GameSettings, GraphicsQuality, SettingChange, Theme};
pub use shell::{App, Intent, Panel};
pub use state::StateSnapshot;
