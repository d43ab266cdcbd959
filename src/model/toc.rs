//! Table of contents for the article page

use super::content::Heading;

#[derive(Clone, Debug)]
pub struct TocState {
    pub headings: &'static [Heading],
    pub active: usize,
    pub collapsed: bool,
}

impl TocState {
    pub fn new(headings: &'static [Heading]) -> Self {
        Self {
            headings,
            active: 0,
            collapsed: false,
        }
    }

    pub fn active_heading(&self) -> Option<&'static Heading> {
        self.headings.get(self.active)
    }

    pub fn next(&mut self) {
        if self.active + 1 < self.headings.len() {
            self.active += 1;
        }
    }

    pub fn prev(&mut self) {
        self.active = self.active.saturating_sub(1);
    }

    pub fn jump_to(&mut self, id: &str) -> bool {
        match self.headings.iter().position(|h| h.id == id) {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }

    pub fn toggle_collapsed(&mut self) -> bool {
        self.collapsed = !self.collapsed;
        self.collapsed
    }

    /// Reading progress through the headings, in `0.0..=1.0`
    pub fn progress(&self) -> f64 {
        if self.headings.is_empty() {
            0.0
        } else {
            (self.active + 1) as f64 / self.headings.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content::FEATURED_HEADINGS;

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut toc = TocState::new(FEATURED_HEADINGS);
        toc.prev();
        assert_eq!(toc.active, 0);
        for _ in 0..20 {
            toc.next();
        }
        assert_eq!(toc.active, FEATURED_HEADINGS.len() - 1);
        assert_eq!(toc.progress(), 1.0);
    }

    #[test]
    fn jump_by_anchor() {
        let mut toc = TocState::new(FEATURED_HEADINGS);
        assert!(toc.jump_to("data-gravity"));
        assert_eq!(toc.active_heading().map(|h| h.level), Some(3));
        assert!(!toc.jump_to("missing"));
        assert_eq!(toc.active, 3);
    }

    #[test]
    fn empty_toc_has_no_progress() {
        let toc = TocState::new(&[]);
        assert_eq!(toc.progress(), 0.0);
        assert!(toc.active_heading().is_none());
    }
}
