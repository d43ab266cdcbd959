//! Testimonial carousel state

use std::time::{Duration, Instant};

/// Interval between automatic slide advances
pub const AUTOPLAY_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Clone, Debug)]
pub struct CarouselState {
    pub active_index: usize,
    len: usize,
    pub autoplay: bool,
    last_advance: Instant,
}

impl CarouselState {
    pub fn new(len: usize) -> Self {
        Self {
            active_index: 0,
            len,
            autoplay: true,
            last_advance: Instant::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn next(&mut self) {
        if self.is_empty() {
            return;
        }
        self.active_index = (self.active_index + 1) % self.len;
        self.last_advance = Instant::now();
    }

    pub fn prev(&mut self) {
        if self.is_empty() {
            return;
        }
        self.active_index = (self.active_index + self.len - 1) % self.len;
        self.last_advance = Instant::now();
    }

    /// Jump straight to a slide (dot navigation). Out-of-range indices are ignored.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.active_index = index;
        self.last_advance = Instant::now();
        true
    }

    pub fn toggle_autoplay(&mut self) -> bool {
        self.autoplay = !self.autoplay;
        self.last_advance = Instant::now();
        self.autoplay
    }

    /// Advance if autoplay is on and the interval elapsed as of `now`
    pub fn autoplay_due(&mut self, now: Instant) -> bool {
        if !self.autoplay || self.len < 2 {
            return false;
        }
        if now.saturating_duration_since(self.last_advance) >= AUTOPLAY_INTERVAL {
            self.active_index = (self.active_index + 1) % self.len;
            self.last_advance = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_four_times_is_identity() {
        let mut c = CarouselState::new(4);
        c.go_to(2);
        for _ in 0..4 {
            c.next();
        }
        assert_eq!(c.active_index, 2);
    }

    #[test]
    fn prev_wraps_to_last() {
        let mut c = CarouselState::new(4);
        c.prev();
        assert_eq!(c.active_index, 3);
        c.next();
        assert_eq!(c.active_index, 0);
    }

    #[test]
    fn prev_undoes_next() {
        let mut c = CarouselState::new(4);
        for start in 0..4 {
            c.go_to(start);
            c.next();
            c.prev();
            assert_eq!(c.active_index, start);
        }
    }

    #[test]
    fn go_to_rejects_out_of_range() {
        let mut c = CarouselState::new(4);
        assert!(c.go_to(3));
        assert!(!c.go_to(4));
        assert_eq!(c.active_index, 3);
    }

    #[test]
    fn empty_carousel_is_inert() {
        let mut c = CarouselState::new(0);
        c.next();
        c.prev();
        assert_eq!(c.active_index, 0);
        assert!(!c.autoplay_due(Instant::now() + AUTOPLAY_INTERVAL));
    }

    #[test]
    fn autoplay_advances_after_interval() {
        let mut c = CarouselState::new(4);
        let start = Instant::now();
        c.last_advance = start;
        assert!(!c.autoplay_due(start + Duration::from_millis(4999)));
        assert!(c.autoplay_due(start + AUTOPLAY_INTERVAL));
        assert_eq!(c.active_index, 1);
    }

    #[test]
    fn paused_autoplay_holds_position() {
        let mut c = CarouselState::new(4);
        c.toggle_autoplay();
        assert!(!c.autoplay_due(Instant::now() + AUTOPLAY_INTERVAL * 3));
        assert_eq!(c.active_index, 0);
    }
}
