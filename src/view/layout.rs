//! Layout rendering (page tabs and status line)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{ActiveSection, UiState, WidgetState};

pub fn render_tabs(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let titles: Vec<Line> = ActiveSection::ALL
        .iter()
        .map(|section| Line::from(section.title()))
        .collect();
    let selected = ActiveSection::ALL
        .iter()
        .position(|s| *s == ui_state.active_section)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .divider("|")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Pressroom ")
                .title_bottom(Line::from(" Tab/Shift+Tab switch page | H help ").right_aligned())
                .padding(Padding::horizontal(1))
                .border_style(Style::default().fg(Color::Green)),
        );
    frame.render_widget(tabs, area);
}

/// Single line under the player: transient notices, otherwise loading state
pub fn render_status_line(frame: &mut Frame, area: Rect, ui_state: &UiState, widgets: &WidgetState) {
    let line = if let Some(ref notice) = ui_state.notice {
        Line::from(vec![
            Span::styled(" ✓ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::styled(notice.clone(), Style::default().fg(Color::White)),
        ])
    } else if widgets.browse_loading() || widgets.feed.is_refreshing() {
        Line::from(Span::styled(" Loading...", Style::default().fg(Color::Yellow)))
    } else if widgets.share.copied() {
        Line::from(Span::styled(" Link copied!", Style::default().fg(Color::Green)))
    } else {
        Line::from(Span::styled(
            format!(" {}", ui_state.active_section.title()),
            Style::default().fg(Color::DarkGray),
        ))
    };

    frame.render_widget(Paragraph::new(line), area);
}
