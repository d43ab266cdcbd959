//! Utility functions for rendering UI components

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState},
    Frame,
};

pub fn render_scrollable_list(
    frame: &mut Frame,
    area: Rect,
    items: Vec<ListItem>,
    selected_index: usize,
    block: Block,
) {
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default()); // Highlight handled by item styles

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index));

    frame.render_stateful_widget(list, area, &mut list_state);
}

pub fn format_duration(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

pub fn format_views(views: u32) -> String {
    if views >= 1000 {
        format!("{:.1}k", views as f64 / 1000.0)
    } else {
        views.to_string()
    }
}

/// Horizontal bar filled up to `ratio`, exactly `width` cells wide
pub fn progress_line(width: u16, ratio: f64, fill: Color) -> Line<'static> {
    let width = width as usize;
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    Line::from(vec![
        Span::styled("━".repeat(filled), Style::default().fg(fill)),
        Span::styled("─".repeat(width - filled), Style::default().fg(Color::DarkGray)),
    ])
}

pub fn stars(rating: u8) -> String {
    let rating = rating.min(5) as usize;
    format!("{}{}", "★".repeat(rating), "☆".repeat(5 - rating))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_format_as_minutes() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(75), "1:15");
        assert_eq!(format_duration(720), "12:00");
    }

    #[test]
    fn truncation_adds_ellipsis() {
        assert_eq!(truncate_string("Designing for Calm", 10), "Designi...");
        assert_eq!(truncate_string("Short", 10), "Short");
    }

    #[test]
    fn progress_line_fills_width() {
        let line = progress_line(10, 0.5, Color::Green);
        assert_eq!(line.width(), 10);
        assert_eq!(line.spans[0].content.chars().count(), 5);
    }

    #[test]
    fn star_rating() {
        assert_eq!(stars(4), "★★★★☆");
        assert_eq!(stars(9), "★★★★★");
        assert_eq!(format_views(31_700), "31.7k");
    }
}
