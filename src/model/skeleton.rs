//! Placeholder shapes shown while content is "loading"

use std::time::{Duration, Instant};

/// Time between shimmer frames
pub const SHIMMER_STEP: Duration = Duration::from_millis(120);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkeletonKind {
    /// Title bar, two excerpt lines and a meta line
    ArticleCard,
    /// A single row with a short meta bar
    ListRow,
    Paragraph(u8),
}

impl SkeletonKind {
    /// Bar widths as percentages of the available width, one per line
    pub fn bars(self) -> Vec<u16> {
        match self {
            SkeletonKind::ArticleCard => vec![70, 95, 85, 40],
            SkeletonKind::ListRow => vec![80, 30],
            SkeletonKind::Paragraph(lines) => (0..lines)
                .map(|i| if i + 1 == lines { 60 } else { 100 - (i as u16 % 3) * 5 })
                .collect(),
        }
    }
}

/// Animation phase for the shimmer highlight
#[derive(Clone, Debug)]
pub struct Shimmer {
    pub phase: usize,
    last_step: Instant,
}

impl Default for Shimmer {
    fn default() -> Self {
        Self {
            phase: 0,
            last_step: Instant::now(),
        }
    }
}

impl Shimmer {
    pub fn advance(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_step) >= SHIMMER_STEP {
            self.phase = self.phase.wrapping_add(1);
            self.last_step = now;
            true
        } else {
            false
        }
    }

    /// Column of the highlight within a bar of `width` cells
    pub fn highlight_at(&self, width: u16) -> u16 {
        if width == 0 {
            0
        } else {
            (self.phase % width as usize) as u16
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph_has_short_last_line() {
        let bars = SkeletonKind::Paragraph(4).bars();
        assert_eq!(bars.len(), 4);
        assert_eq!(bars.last(), Some(&60));
        assert!(bars[..3].iter().all(|w| *w >= 90));
    }

    #[test]
    fn shimmer_steps_on_schedule() {
        let mut shimmer = Shimmer::default();
        let t0 = Instant::now();
        shimmer.last_step = t0;
        assert!(!shimmer.advance(t0 + Duration::from_millis(100)));
        assert!(shimmer.advance(t0 + SHIMMER_STEP));
        assert_eq!(shimmer.phase, 1);
        assert_eq!(shimmer.highlight_at(0), 0);
    }
}
