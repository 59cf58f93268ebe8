//! Main panel selection

/// Which panel the main area shows. Starts on the map; changes only on
/// navigation clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Map,
    Units,
    Quests,
    Research,
    Settings,
}

impl Panel {
    /// Navigation order
    pub const ALL: [Panel; 5] = [
        Panel::Map,
        Panel::Units,
        Panel::Quests,
        Panel::Research,
        Panel::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Panel::Map => "map",
            Panel::Units => "units",
            Panel::Quests => "quests",
            Panel::Research => "research",
            Panel::Settings => "settings",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Panel::Map => "Map",
            Panel::Units => "Units",
            Panel::Quests => "Quests",
            Panel::Research => "Research",
            Panel::Settings => "Settings",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Panel::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_panel_is_map() {
        assert_eq!(Panel::default(), Panel::Map);
    }

    #[test]
    fn test_from_str_round_trips_every_panel() {
        for panel in Panel::ALL {
            assert_eq!(Panel::from_str(panel.as_str()), Some(panel));
        }
        assert_eq!(Panel::from_str("diplomacy"), None);
    }
}
