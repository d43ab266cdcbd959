//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Page tabs and status line
//! - `content`: One renderer per page
//! - `skeleton`: Loading placeholders
//! - `progress`: Audio player bar
//! - `overlays`: Modal overlays (error, help, share menu)

mod utils;
mod layout;
mod content;
mod skeleton;
mod progress;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::model::{HeadDocument, PlaybackClock, UiState, WidgetState};

/// Everything a frame needs, captured under the model locks
pub struct FrameState {
    pub playback: PlaybackClock,
    pub ui_state: UiState,
    pub widgets: WidgetState,
    pub head: HeadDocument,
}

/// Screen regions shared by rendering and mouse hit-testing
pub struct ScreenLayout {
    pub tabs: Rect,
    pub body: Rect,
    pub player: Rect,
    pub status: Rect,
}

pub fn screen_layout(area: Rect, player_minimized: bool) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                                      // Page tabs
            Constraint::Min(0),                                         // Active page
            Constraint::Length(progress::player_height(player_minimized)), // Audio player
            Constraint::Length(1),                                      // Status line
        ])
        .split(area);

    ScreenLayout {
        tabs: chunks[0],
        body: chunks[1],
        player: chunks[2],
        status: chunks[3],
    }
}

/// Clickable progress track of the audio player for a given screen size
pub fn progress_track_area(screen: Rect, player_minimized: bool) -> Rect {
    let layout = screen_layout(screen, player_minimized);
    progress::track_area(layout.player, player_minimized)
}

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, state: &FrameState) {
        let layout = screen_layout(frame.area(), state.playback.is_minimized);

        layout::render_tabs(frame, layout.tabs, &state.ui_state);

        content::render_page(frame, layout.body, state);

        progress::render_player(frame, layout.player, &state.playback);

        layout::render_status_line(frame, layout.status, &state.ui_state, &state.widgets);

        // Share menu overlay (if open)
        if state.widgets.share.is_open {
            overlays::render_share_menu(frame, &state.widgets.share);
        }

        // Error notification overlay (if there's an error)
        if state.ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, &state.ui_state);
        }

        // Help popup overlay (if open)
        if state.ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_sits_inside_the_player() {
        let screen = Rect::new(0, 0, 100, 40);
        for minimized in [false, true] {
            let layout = screen_layout(screen, minimized);
            let track = progress_track_area(screen, minimized);
            assert!(track.width > 0);
            assert!(track.y > layout.player.y && track.y < layout.player.bottom());
            assert!(track.x > layout.player.x && track.right() < layout.player.right());
        }
    }

    #[test]
    fn layout_fills_the_screen() {
        let screen = Rect::new(0, 0, 80, 30);
        let layout = screen_layout(screen, false);
        assert_eq!(layout.tabs.height + layout.body.height + layout.player.height + layout.status.height, 30);
        assert_eq!(layout.status.bottom(), 30);
    }
}
