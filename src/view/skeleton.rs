//! Loading placeholders with a moving shimmer

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::{Shimmer, SkeletonKind};

const BAR: &str = "▆";

fn bar_line(width: u16, percent: u16, shimmer: &Shimmer) -> Line<'static> {
    let len = (width as u32 * percent.min(100) as u32 / 100) as u16;
    if len == 0 {
        return Line::default();
    }
    let highlight = shimmer.highlight_at(len);
    let before = highlight as usize;
    let after = (len - highlight - 1) as usize;
    Line::from(vec![
        Span::styled(BAR.repeat(before), Style::default().fg(Color::DarkGray)),
        Span::styled(BAR, Style::default().fg(Color::Gray)),
        Span::styled(BAR.repeat(after), Style::default().fg(Color::DarkGray)),
    ])
}

/// Lines for one skeleton shape, blank line after each block
pub fn skeleton_lines(kind: SkeletonKind, width: u16, shimmer: &Shimmer) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = kind
        .bars()
        .into_iter()
        .map(|percent| bar_line(width, percent, shimmer))
        .collect();
    lines.push(Line::default());
    lines
}

/// Fill `area` with as many copies of `kind` as fit
pub fn render_skeletons(frame: &mut Frame, area: Rect, kind: SkeletonKind, shimmer: &Shimmer) {
    let per_item = kind.bars().len() as u16 + 1;
    let count = (area.height / per_item.max(1)).max(1);
    let lines: Vec<Line> = (0..count)
        .flat_map(|_| skeleton_lines(kind, area.width, shimmer))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_width() {
        let shimmer = Shimmer::default();
        let lines = skeleton_lines(SkeletonKind::ListRow, 50, &shimmer);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].width(), 40);
        assert_eq!(lines[1].width(), 15);
    }

    #[test]
    fn zero_width_bar_is_blank() {
        let shimmer = Shimmer::default();
        assert_eq!(bar_line(0, 80, &shimmer).width(), 0);
    }
}
