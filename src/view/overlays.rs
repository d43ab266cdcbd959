//! Overlay rendering (error notification, share menu, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::model::{ShareMenuState, SharePlatform, UiState};

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    if let Some(ref error_msg) = ui_state.error_message {
        let area = frame.area();

        // Fixed width popup (responsive to screen size)
        let popup_width = area.width.saturating_sub(4).min(52);
        let inner_width = popup_width.saturating_sub(4).max(1) as usize; // account for borders

        // Calculate how many lines the error message will take when wrapped
        let error_line_count = error_msg.chars().count().div_ceil(inner_width) as u16;

        // Height: top border (1) + error lines + bottom border (1)
        let popup_height = (2 + error_line_count.max(1)).min(area.height.saturating_sub(4));

        let popup_area = centered(area, popup_width, popup_height);

        // Clear the area behind the popup first
        frame.render_widget(Clear, popup_area);

        let error_widget = Paragraph::new(error_msg.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(ratatui::widgets::Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Error (Esc to dismiss) ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                    .style(Style::default().bg(Color::Black)),
            );

        frame.render_widget(error_widget, popup_area);
    }
}

fn platform_key(platform: SharePlatform) -> &'static str {
    match platform {
        SharePlatform::Twitter => "T",
        SharePlatform::LinkedIn => "L",
        SharePlatform::Facebook => "F",
        SharePlatform::Email => "E",
    }
}

pub fn render_share_menu(frame: &mut Frame, share: &ShareMenuState) {
    let mut lines: Vec<Line> = SharePlatform::ALL
        .iter()
        .map(|platform| {
            Line::from(vec![
                Span::styled(
                    format!(" {} ", platform_key(*platform)),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" {}", platform.label())),
            ])
        })
        .collect();

    let copy_label = if share.copied() { " ✓ Copied!" } else { " Copy link" };
    lines.push(Line::from(vec![
        Span::styled(" Y ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(copy_label),
    ]));

    let popup_area = centered(frame.area(), 30, lines.len() as u16 + 2);
    frame.render_widget(Clear, popup_area);

    let menu = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Share (Esc to close) ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(menu, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    // Define keybindings organized by category
    let keybindings = vec![
        ("", "── General ──"),
        ("Tab / Shift+Tab", "Next / previous page"),
        ("Space", "Play / Pause"),
        ("H", "Toggle this help"),
        ("Q / Ctrl+Q", "Quit"),
        ("", ""),
        ("", "── Listen ──"),
        ("← / →", "Skip back / forward 15s"),
        ("R / M / Z", "Speed / Mute / Minimize"),
        ("Click bar", "Seek"),
        ("Enter / B / X", "Banner action / next / dismiss"),
        ("", ""),
        ("", "── Browse ──"),
        ("L / O", "Cycle layout / sort"),
        ("F, ← / →", "Pick filter, change value"),
        ("C", "Clear filters"),
        ("", ""),
        ("", "── For You ──"),
        ("← / →  ↑ / ↓", "Switch tab, move"),
        ("B", "Bookmark story"),
        ("] / T", "Pick topic / follow"),
        ("R", "Refresh feed"),
        ("", ""),
        ("", "── Read & Voices ──"),
        ("↑ / ↓  1-9  C", "Contents, jump, collapse"),
        ("S / Y", "Share / Copy link"),
        ("← / →  1-9  P", "Slides, jump, autoplay"),
    ];

    let popup_width = 62;
    let popup_height = (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4));
    let popup_area = centered(area, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popups_stay_on_screen() {
        let area = Rect::new(0, 0, 20, 10);
        let popup = centered(area, 62, 30);
        assert_eq!(popup, area);

        let popup = centered(Rect::new(0, 0, 100, 40), 30, 7);
        assert_eq!(popup, Rect::new(35, 16, 30, 7));
    }
}
