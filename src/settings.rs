//! Game settings and preferences
//!
//! Settings travel inside the state snapshot, so they are saved and loaded
//! together with the rest of the game.

use serde::{Deserialize, Serialize};

/// Highest value a volume slider can produce
pub const MAX_VOLUME: u8 = 100;

/// Graphics quality levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GraphicsQuality {
    Low,
    Medium,
    #[default]
    High,
}

impl GraphicsQuality {
    pub const ALL: [GraphicsQuality; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            GraphicsQuality::Low => "low",
            GraphicsQuality::Medium => "medium",
            GraphicsQuality::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GraphicsQuality::Low => "Low",
            GraphicsQuality::Medium => "Medium",
            GraphicsQuality::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(GraphicsQuality::Low),
            "medium" | "med" => Some(GraphicsQuality::Medium),
            "high" => Some(GraphicsQuality::High),
            _ => None,
        }
    }
}

/// Color theme for the dashboard background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Neon,
    Cyber,
    Quantum,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Self::Neon, Self::Cyber, Self::Quantum];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Neon => "neon",
            Theme::Cyber => "cyber",
            Theme::Quantum => "quantum",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Neon => "Neon",
            Theme::Cyber => "Cyber",
            Theme::Quantum => "Quantum",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "neon" => Some(Theme::Neon),
            "cyber" => Some(Theme::Cyber),
            "quantum" => Some(Theme::Quantum),
            _ => None,
        }
    }

    /// CSS class applied to the root element
    pub fn css_class(&self) -> &'static str {
        match self {
            Theme::Neon => "theme-neon",
            Theme::Cyber => "theme-cyber",
            Theme::Quantum => "theme-quantum",
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSettings {
    // === Audio ===
    pub sound_enabled: bool,
    /// Music volume (0 - 100)
    pub music_volume: u8,
    /// Sound effects volume (0 - 100)
    pub sfx_volume: u8,

    // === Graphics ===
    pub graphics_quality: GraphicsQuality,
    pub theme: Theme,

    // === Game ===
    /// Show entries in the notification feed
    pub notifications: bool,
    /// Periodically push the snapshot through the persistence gateway
    pub auto_save: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_volume: 70,
            sfx_volume: 80,

            graphics_quality: GraphicsQuality::High,
            theme: Theme::Neon,

            notifications: true,
            auto_save: true,
        }
    }
}

/// A single setting edit coming from the settings form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingChange {
    SoundEnabled(bool),
    MusicVolume(u8),
    SfxVolume(u8),
    GraphicsQuality(GraphicsQuality),
    Theme(Theme),
    Notifications(bool),
    AutoSave(bool),
}

impl SettingChange {
    /// Build a change from a form control name and its raw string value.
    ///
    /// Checkbox values are `"true"`/`"false"`, range values are integers.
    pub fn parse(name: &str, value: &str) -> Option<Self> {
        let flag = || value.parse::<bool>().ok();
        let volume = || value.parse::<f64>().ok().map(clamp_volume);
        match name {
            "soundEnabled" => flag().map(SettingChange::SoundEnabled),
            "musicVolume" => volume().map(SettingChange::MusicVolume),
            "sfxVolume" => volume().map(SettingChange::SfxVolume),
            "graphicsQuality" => GraphicsQuality::from_str(value).map(SettingChange::GraphicsQuality),
            "theme" => Theme::from_str(value).map(SettingChange::Theme),
            "notifications" => flag().map(SettingChange::Notifications),
            "autoSave" => flag().map(SettingChange::AutoSave),
            _ => None,
        }
    }
}

fn clamp_volume(raw: f64) -> u8 {
    raw.round().clamp(0.0, MAX_VOLUME as f64) as u8
}

impl GameSettings {
    /// Return a copy with one setting replaced
    pub fn with_change(&self, change: SettingChange) -> Self {
        let mut next = self.clone();
        match change {
            SettingChange::SoundEnabled(on) => next.sound_enabled = on,
            SettingChange::MusicVolume(v) => next.music_volume = v.min(MAX_VOLUME),
            SettingChange::SfxVolume(v) => next.sfx_volume = v.min(MAX_VOLUME),
            SettingChange::GraphicsQuality(q) => next.graphics_quality = q,
            SettingChange::Theme(t) => next.theme = t,
            SettingChange::Notifications(on) => next.notifications = on,
            SettingChange::AutoSave(on) => next.auto_save = on,
        }
        next
    }

    /// Volume sliders are only editable while sound is on
    pub fn volume_controls_enabled(&self) -> bool {
        self.sound_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_initial_settings() {
        let s = GameSettings::default();
        assert!(s.sound_enabled);
        assert_eq!(s.music_volume, 70);
        assert_eq!(s.sfx_volume, 80);
        assert_eq!(s.graphics_quality, GraphicsQuality::High);
        assert!(s.notifications);
        assert!(s.auto_save);
        assert_eq!(s.theme, Theme::Neon);
    }

    #[test]
    fn test_serialized_names_are_camel_case() {
        let json = serde_json::to_value(GameSettings::default()).unwrap();
        assert_eq!(json["soundEnabled"], true);
        assert_eq!(json["graphicsQuality"], "high");
        assert_eq!(json["autoSave"], true);
        assert_eq!(json["theme"], "neon");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let s: GameSettings = serde_json::from_str(r#"{"theme":"cyber"}"#).unwrap();
        assert_eq!(s.theme, Theme::Cyber);
        assert_eq!(s.music_volume, 70);
    }

    #[test]
    fn test_parse_form_values() {
        assert_eq!(
            SettingChange::parse("musicVolume", "42"),
            Some(SettingChange::MusicVolume(42))
        );
        assert_eq!(
            SettingChange::parse("sfxVolume", "250"),
            Some(SettingChange::SfxVolume(100))
        );
        assert_eq!(
            SettingChange::parse("graphicsQuality", "Medium"),
            Some(SettingChange::GraphicsQuality(GraphicsQuality::Medium))
        );
        assert_eq!(
            SettingChange::parse("autoSave", "false"),
            Some(SettingChange::AutoSave(false))
        );
        assert_eq!(SettingChange::parse("theme", "vaporwave"), None);
        assert_eq!(SettingChange::parse("fov", "90"), None);
    }

    #[test]
    fn test_with_change_leaves_original_untouched() {
        let before = GameSettings::default();
        let after = before.with_change(SettingChange::Notifications(false));
        assert!(before.notifications);
        assert!(!after.notifications);
        assert_eq!(after.theme, before.theme);
    }

    #[test]
    fn test_volume_controls_follow_sound_toggle() {
        let muted = GameSettings::default().with_change(SettingChange::SoundEnabled(false));
        assert!(!muted.volume_controls_enabled());
    }
}
