//! Audio player rendering (full bar and minimized strip)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::PlaybackClock;
use super::utils::{format_duration, progress_line, truncate_string};

const FULL_HEIGHT: u16 = 5;
const MINI_HEIGHT: u16 = 3;

// Cells reserved for the time labels either side of the full track
const TIME_GUTTER: u16 = 7;
// Play icon before the mini track, times and rate after it
const MINI_LEAD: u16 = 3;
const MINI_TRAIL: u16 = 14;

pub fn player_height(minimized: bool) -> u16 {
    if minimized { MINI_HEIGHT } else { FULL_HEIGHT }
}

fn inner_area(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

/// Row of the progress track inside the player block
pub fn track_area(player: Rect, minimized: bool) -> Rect {
    let inner = inner_area(player);
    if inner.height == 0 {
        return Rect::new(inner.x, inner.y, 0, 0);
    }

    if minimized {
        Rect::new(
            inner.x + MINI_LEAD.min(inner.width),
            inner.y,
            inner.width.saturating_sub(MINI_LEAD + MINI_TRAIL),
            1,
        )
    } else {
        let row = if inner.height > 1 { inner.y + 1 } else { inner.y };
        Rect::new(
            inner.x + TIME_GUTTER.min(inner.width),
            row,
            inner.width.saturating_sub(TIME_GUTTER * 2),
            1,
        )
    }
}

fn play_icon(playback: &PlaybackClock) -> &'static str {
    if playback.is_playing { "▶" } else { "⏸" }
}

fn fill_color(playback: &PlaybackClock) -> Color {
    if playback.is_muted { Color::DarkGray } else { Color::Green }
}

pub fn render_player(frame: &mut Frame, area: Rect, playback: &PlaybackClock) {
    if playback.is_minimized {
        render_mini_player(frame, area, playback);
    } else {
        render_full_player(frame, area, playback);
    }
}

fn render_full_player(frame: &mut Frame, area: Rect, playback: &PlaybackClock) {
    let title = format!(
        " {} Listen: {} ",
        play_icon(playback),
        truncate_string(&playback.metadata.title, area.width.saturating_sub(20) as usize)
    );
    let volume = if playback.is_muted { "Muted" } else { "Vol: On" };
    let controls_info = format!(" Speed: {} | {} ", playback.rate.label(), volume);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(title)
        .title_bottom(Line::from(controls_info).right_aligned());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let byline = Paragraph::new(Line::from(Span::styled(
        format!("by {}", playback.metadata.author),
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(byline, Rect::new(inner.x, inner.y, inner.width, 1));

    let track = track_area(area, false);
    if track.width == 0 {
        return;
    }

    let elapsed = Paragraph::new(format!("{:>5}", format_duration(playback.current_secs)));
    frame.render_widget(elapsed, Rect::new(inner.x, track.y, TIME_GUTTER - 2, 1));

    frame.render_widget(
        Paragraph::new(progress_line(track.width, playback.progress_ratio(), fill_color(playback))),
        track,
    );

    let total = Paragraph::new(format_duration(playback.duration_secs()));
    frame.render_widget(total, Rect::new(track.right() + 2, track.y, TIME_GUTTER - 2, 1));

    if inner.height > 2 {
        let hints = Paragraph::new(Line::from(vec![
            Span::styled("Space", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" play  "),
            Span::styled("←/→", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" 15s  "),
            Span::styled("R", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" speed  "),
            Span::styled("M", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" mute  "),
            Span::styled("Z", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" minimize"),
        ]))
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hints, Rect::new(inner.x, inner.y + 2, inner.width, 1));
    }
}

fn render_mini_player(frame: &mut Frame, area: Rect, playback: &PlaybackClock) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", truncate_string(&playback.metadata.title, 40)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    frame.render_widget(
        Paragraph::new(play_icon(playback)).style(Style::default().fg(Color::Green)),
        Rect::new(inner.x, inner.y, MINI_LEAD.min(inner.width), 1),
    );

    let track = track_area(area, true);
    if track.width == 0 {
        return;
    }
    frame.render_widget(
        Paragraph::new(progress_line(track.width, playback.progress_ratio(), fill_color(playback))),
        track,
    );

    let times = format!(
        " {}/{} {}",
        format_duration(playback.current_secs),
        format_duration(playback.duration_secs()),
        playback.rate.label()
    );
    frame.render_widget(
        Paragraph::new(times),
        Rect::new(track.right(), inner.y, MINI_TRAIL.min(inner.right() - track.right()), 1),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_track_leaves_room_for_times() {
        let player = Rect::new(0, 10, 60, FULL_HEIGHT);
        let track = track_area(player, false);
        assert_eq!(track, Rect::new(8, 12, 44, 1));
    }

    #[test]
    fn mini_track_shares_the_row() {
        let player = Rect::new(0, 10, 60, MINI_HEIGHT);
        let track = track_area(player, true);
        assert_eq!(track, Rect::new(4, 11, 41, 1));
    }

    #[test]
    fn tiny_player_has_no_track() {
        let player = Rect::new(0, 0, 10, 2);
        assert_eq!(track_area(player, true).width, 0);
    }
}
