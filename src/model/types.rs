//! Core type definitions for the application

use std::time::Instant;

/// Which page of the site is currently shown
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Listen,
    Browse,
    ForYou,
    Read,
    Voices,
    Subscribe,
    Head,
}

impl ActiveSection {
    pub const ALL: [ActiveSection; 7] = [
        ActiveSection::Listen,
        ActiveSection::Browse,
        ActiveSection::ForYou,
        ActiveSection::Read,
        ActiveSection::Voices,
        ActiveSection::Subscribe,
        ActiveSection::Head,
    ];

    pub fn next(self) -> Self {
        match self {
            ActiveSection::Listen => ActiveSection::Browse,
            ActiveSection::Browse => ActiveSection::ForYou,
            ActiveSection::ForYou => ActiveSection::Read,
            ActiveSection::Read => ActiveSection::Voices,
            ActiveSection::Voices => ActiveSection::Subscribe,
            ActiveSection::Subscribe => ActiveSection::Head,
            ActiveSection::Head => ActiveSection::Listen,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveSection::Listen => ActiveSection::Head,
            ActiveSection::Browse => ActiveSection::Listen,
            ActiveSection::ForYou => ActiveSection::Browse,
            ActiveSection::Read => ActiveSection::ForYou,
            ActiveSection::Voices => ActiveSection::Read,
            ActiveSection::Subscribe => ActiveSection::Voices,
            ActiveSection::Head => ActiveSection::Subscribe,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ActiveSection::Listen => "Listen",
            ActiveSection::Browse => "Browse",
            ActiveSection::ForYou => "For You",
            ActiveSection::Read => "Read",
            ActiveSection::Voices => "Voices",
            ActiveSection::Subscribe => "Subscribe",
            ActiveSection::Head => "Head",
        }
    }

    /// Whether the page presents the featured article
    pub fn is_article(self) -> bool {
        matches!(self, ActiveSection::Listen | ActiveSection::Read)
    }
}

/// UI state for the application
#[derive(Clone, Debug)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    /// Transient status line (share results, subscription confirmations)
    pub notice: Option<String>,
    pub notice_timestamp: Option<Instant>,
    pub show_help_popup: bool,
    pub head_scroll: u16,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Listen,
            error_message: None,
            error_timestamp: None,
            notice: None,
            notice_timestamp: None,
            show_help_popup: false,
            head_scroll: 0,
        }
    }
}
