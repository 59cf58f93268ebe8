//! Help overlay state and content

/// One page of the game guide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpSection {
    pub title: &'static str,
    pub content: &'static str,
}

pub const HELP_SECTIONS: [HelpSection; 5] = [
    HelpSection {
        title: "Getting Started",
        content: "Welcome to NeoGenesis! Begin by exploring the strategic map and managing your resources. Click on sectors to view details and plan your expansion.",
    },
    HelpSection {
        title: "Resources",
        content: "Monitor your Energy, Data Shards, and Quantum Cores. These resources are essential for building units, researching technologies, and expanding your influence.",
    },
    HelpSection {
        title: "Units",
        content: "Create and manage your AI units. Each unit has unique abilities and can be upgraded using resources. Deploy them strategically to secure sectors and complete missions.",
    },
    HelpSection {
        title: "Quests",
        content: "Accept and complete quests to earn rewards and advance the story. Track your progress in the Quests panel and prioritize missions based on their difficulty and rewards.",
    },
    HelpSection {
        title: "Research",
        content: "Advance your technology through the Research panel. New discoveries unlock powerful units, resource bonuses, and strategic advantages.",
    },
];

/// Key that opens the overlay from anywhere
pub const HELP_KEY: &str = "?";

/// Open/closed state plus the selected guide section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HelpOverlay {
    open: bool,
    active: usize,
}

impl HelpOverlay {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Out-of-range indices are ignored
    pub fn select(&mut self, index: usize) {
        if index < HELP_SECTIONS.len() {
            self.active = index;
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_section(&self) -> &'static HelpSection {
        &HELP_SECTIONS[self.active]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed_on_first_section() {
        let help = HelpOverlay::default();
        assert!(!help.is_open());
        assert_eq!(help.active_section().title, "Getting Started");
    }

    #[test]
    fn test_select_and_ignore_out_of_range() {
        let mut help = HelpOverlay::default();
        help.select(3);
        assert_eq!(help.active_section().title, "Quests");
        help.select(99);
        assert_eq!(help.active_index(), 3);
    }

    #[test]
    fn test_open_close() {
        let mut help = HelpOverlay::default();
        help.open();
        assert!(help.is_open());
        help.close();
        assert!(!help.is_open());
    }
}
