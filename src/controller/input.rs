//! Key and mouse event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::model::{ActiveSection, SharePlatform};
use crate::view;
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // Ctrl+Q quits from anywhere, including the email field and popups
        if let KeyCode::Char('q') | KeyCode::Char('Q') = key.code {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                model.set_should_quit(true).await;
                return Ok(());
            }
        }

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_error().await;
            }
            return Ok(());
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        // Page switching works on every page
        match key.code {
            KeyCode::Tab if !key.modifiers.contains(KeyModifiers::SHIFT) => {
                drop(model);
                self.next_section().await;
                return Ok(());
            }
            KeyCode::Tab | KeyCode::BackTab => {
                drop(model);
                self.previous_section().await;
                return Ok(());
            }
            _ => {}
        }

        let section = model.active_section().await;

        // Share menu captures keys while open
        if section == ActiveSection::Read && model.is_share_menu_open().await {
            drop(model);
            match key.code {
                KeyCode::Char('t') | KeyCode::Char('T') => self.share_to(SharePlatform::Twitter).await,
                KeyCode::Char('l') | KeyCode::Char('L') => self.share_to(SharePlatform::LinkedIn).await,
                KeyCode::Char('f') | KeyCode::Char('F') => self.share_to(SharePlatform::Facebook).await,
                KeyCode::Char('e') | KeyCode::Char('E') => self.share_to(SharePlatform::Email).await,
                KeyCode::Char('y') | KeyCode::Char('Y') => self.copy_link().await,
                KeyCode::Esc | KeyCode::Char('s') | KeyCode::Char('S') => self.close_share_menu().await,
                _ => {}
            }
            return Ok(());
        }

        // The subscribe page owns the keyboard for its email field
        if section == ActiveSection::Subscribe {
            drop(model);
            self.handle_subscribe_key(key).await;
            return Ok(());
        }

        drop(model);
        if self.handle_section_key(section, key).await {
            return Ok(());
        }

        // Global keybindings
        let model = self.model.lock().await;
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup().await;
            }
            // Play/Pause toggle, available from the mini player on every page
            KeyCode::Char(' ') => {
                drop(model);
                self.toggle_playback().await;
            }
            _ => {}
        }
        Ok(())
    }

    /// Returns `true` when the key was consumed by the active page
    async fn handle_section_key(&self, section: ActiveSection, key: KeyEvent) -> bool {
        match (section, key.code) {
            (ActiveSection::Listen, KeyCode::Left) => self.skip_back().await,
            (ActiveSection::Listen, KeyCode::Right) => self.skip_forward().await,
            (ActiveSection::Listen, KeyCode::Char('r') | KeyCode::Char('R')) => self.cycle_rate().await,
            (ActiveSection::Listen, KeyCode::Char('m') | KeyCode::Char('M')) => self.toggle_mute().await,
            (ActiveSection::Listen, KeyCode::Char('z') | KeyCode::Char('Z')) => self.toggle_minimized().await,
            (ActiveSection::Listen, KeyCode::Char('x') | KeyCode::Char('X')) => self.dismiss_banner().await,
            (ActiveSection::Listen, KeyCode::Char('b') | KeyCode::Char('B')) => self.rotate_banner().await,
            (ActiveSection::Listen, KeyCode::Enter) => self.activate_banner().await,

            (ActiveSection::Browse, KeyCode::Char('l') | KeyCode::Char('L')) => self.cycle_layout().await,
            (ActiveSection::Browse, KeyCode::Char('o') | KeyCode::Char('O')) => self.cycle_sort().await,
            (ActiveSection::Browse, KeyCode::Char('f') | KeyCode::Char('F')) => self.focus_next_filter().await,
            (ActiveSection::Browse, KeyCode::Left) => self.cycle_filter_value(false).await,
            (ActiveSection::Browse, KeyCode::Right) => self.cycle_filter_value(true).await,
            (ActiveSection::Browse, KeyCode::Char('c') | KeyCode::Char('C')) => self.clear_filters().await,

            (ActiveSection::ForYou, KeyCode::Left) => self.feed_switch_tab(false).await,
            (ActiveSection::ForYou, KeyCode::Right) => self.feed_switch_tab(true).await,
            (ActiveSection::ForYou, KeyCode::Up) => self.feed_move(false).await,
            (ActiveSection::ForYou, KeyCode::Down) => self.feed_move(true).await,
            (ActiveSection::ForYou, KeyCode::Char('b') | KeyCode::Char('B')) => self.feed_toggle_bookmark().await,
            (ActiveSection::ForYou, KeyCode::Char(']')) => self.feed_next_topic().await,
            (ActiveSection::ForYou, KeyCode::Char('t') | KeyCode::Char('T')) => self.feed_toggle_topic().await,
            (ActiveSection::ForYou, KeyCode::Char('r') | KeyCode::Char('R')) => self.feed_refresh().await,

            (ActiveSection::Read, KeyCode::Up) => self.toc_move(false).await,
            (ActiveSection::Read, KeyCode::Down) => self.toc_move(true).await,
            (ActiveSection::Read, KeyCode::Char('c') | KeyCode::Char('C')) => self.toc_toggle_collapsed().await,
            (ActiveSection::Read, KeyCode::Char(c)) if c.is_ascii_digit() && c != '0' => {
                let index = c.to_digit(10).unwrap_or(1) as usize - 1;
                self.toc_jump(index).await;
            }
            (ActiveSection::Read, KeyCode::Char('s') | KeyCode::Char('S')) => self.share().await,
            (ActiveSection::Read, KeyCode::Char('y') | KeyCode::Char('Y')) => self.copy_link().await,

            (ActiveSection::Voices, KeyCode::Left) => self.carousel_step(false).await,
            (ActiveSection::Voices, KeyCode::Right) => self.carousel_step(true).await,
            (ActiveSection::Voices, KeyCode::Char('p') | KeyCode::Char('P')) => self.carousel_toggle_autoplay().await,
            (ActiveSection::Voices, KeyCode::Char(c)) if c.is_ascii_digit() && c != '0' => {
                let index = c.to_digit(10).unwrap_or(1) as usize - 1;
                self.carousel_jump(index).await;
            }

            (ActiveSection::Head, KeyCode::Up) => self.model.lock().await.scroll_head(false).await,
            (ActiveSection::Head, KeyCode::Down) => self.model.lock().await.scroll_head(true).await,

            _ => return false,
        }
        true
    }

    async fn handle_subscribe_key(&self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.newsletter_submit().await,
            KeyCode::Up => {
                let model = self.model.lock().await;
                model.update_widgets(|w| w.newsletter.cycle_frequency(false)).await;
            }
            KeyCode::Down => {
                let model = self.model.lock().await;
                model.update_widgets(|w| w.newsletter.cycle_frequency(true)).await;
            }
            KeyCode::Backspace => {
                let model = self.model.lock().await;
                model.update_widgets(|w| w.newsletter.backspace()).await;
            }
            KeyCode::Esc => {
                let model = self.model.lock().await;
                model.update_widgets(|w| w.newsletter.clear()).await;
            }
            KeyCode::Char(c) => {
                let model = self.model.lock().await;
                model.update_widgets(|w| w.newsletter.push_char(c)).await;
            }
            _ => {}
        }
    }

    /// Left clicks on the player's progress track seek
    pub async fn handle_mouse_event(&self, mouse: MouseEvent, screen: Rect) -> Result<()> {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return Ok(());
        }

        let minimized = self.model.lock().await.is_player_minimized().await;
        let track = view::progress_track_area(screen, minimized);
        if track.width == 0 || mouse.row != track.y {
            return Ok(());
        }
        if mouse.column < track.x || mouse.column >= track.x + track.width {
            return Ok(());
        }

        self.seek_at(mouse.column, track.x, track.width).await;
        Ok(())
    }
}
