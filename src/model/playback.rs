//! Playback clock for the article audio player
//!
//! There is no media behind this clock: the position is a logical counter
//! advanced once per tick by the controller's timer task.

use std::time::Duration;

/// Seconds moved by the skip back / skip forward buttons
pub const SKIP_SECONDS: i64 = 15;

/// Selectable playback speeds, in cycling order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlaybackRate {
    ThreeQuarters,
    #[default]
    Normal,
    OneAndAQuarter,
    OneAndAHalf,
    Double,
}

impl PlaybackRate {
    pub const ALL: [PlaybackRate; 5] = [
        PlaybackRate::ThreeQuarters,
        PlaybackRate::Normal,
        PlaybackRate::OneAndAQuarter,
        PlaybackRate::OneAndAHalf,
        PlaybackRate::Double,
    ];

    pub fn as_f64(self) -> f64 {
        match self {
            PlaybackRate::ThreeQuarters => 0.75,
            PlaybackRate::Normal => 1.0,
            PlaybackRate::OneAndAQuarter => 1.25,
            PlaybackRate::OneAndAHalf => 1.5,
            PlaybackRate::Double => 2.0,
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|r| *r == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Wall-clock period between two logical one-second ticks
    pub fn tick_interval(self) -> Duration {
        Duration::from_millis((1000.0 / self.as_f64()) as u64)
    }

    pub fn label(self) -> &'static str {
        match self {
            PlaybackRate::ThreeQuarters => "0.75x",
            PlaybackRate::Normal => "1x",
            PlaybackRate::OneAndAQuarter => "1.25x",
            PlaybackRate::OneAndAHalf => "1.5x",
            PlaybackRate::Double => "2x",
        }
    }
}

/// Result of advancing the clock by one tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Clock was paused, nothing happened
    Idle,
    Advanced,
    /// Reached the end: playback stopped and rewound to zero
    Finished,
}

/// What is being listened to
#[derive(Clone, Debug)]
pub struct ListenMetadata {
    pub title: String,
    pub author: String,
    pub duration_secs: u32,
}

/// Complete state of the audio player widget
#[derive(Clone, Debug)]
pub struct PlaybackClock {
    pub metadata: ListenMetadata,
    pub is_playing: bool,
    pub current_secs: u32,
    pub is_muted: bool,
    pub rate: PlaybackRate,
    pub is_minimized: bool,
}

impl PlaybackClock {
    pub fn new(metadata: ListenMetadata) -> Self {
        Self {
            metadata,
            is_playing: false,
            current_secs: 0,
            is_muted: false,
            rate: PlaybackRate::default(),
            is_minimized: false,
        }
    }

    pub fn duration_secs(&self) -> u32 {
        self.metadata.duration_secs
    }

    pub fn toggle_play(&mut self) -> bool {
        self.is_playing = !self.is_playing;
        self.is_playing
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    /// Move the position by `delta` seconds, clamped to the track bounds
    pub fn skip(&mut self, delta: i64) {
        let target = self.current_secs as i64 + delta;
        self.current_secs = target.clamp(0, self.duration_secs() as i64) as u32;
    }

    pub fn skip_forward(&mut self) {
        self.skip(SKIP_SECONDS);
    }

    pub fn skip_back(&mut self) {
        self.skip(-SKIP_SECONDS);
    }

    pub fn seek_to_fraction(&mut self, fraction: f64) {
        let duration = self.duration_secs();
        let offset = (fraction * duration as f64).floor();
        self.current_secs = offset.clamp(0.0, duration as f64) as u32;
    }

    /// Seek from a pointer column on a progress track starting at `track_x`.
    ///
    /// Clicks outside the track clamp to its ends.
    pub fn seek_at(&mut self, x: u16, track_x: u16, track_width: u16) {
        if track_width == 0 {
            return;
        }
        let fraction = (x as f64 - track_x as f64) / track_width as f64;
        self.seek_to_fraction(fraction);
    }

    pub fn cycle_rate(&mut self) -> PlaybackRate {
        self.rate = self.rate.next();
        self.rate
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.is_muted = !self.is_muted;
        self.is_muted
    }

    pub fn toggle_minimized(&mut self) -> bool {
        self.is_minimized = !self.is_minimized;
        self.is_minimized
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_playing {
            return TickOutcome::Idle;
        }
        let next = self.current_secs.saturating_add(1);
        if next >= self.duration_secs() {
            self.is_playing = false;
            self.current_secs = 0;
            TickOutcome::Finished
        } else {
            self.current_secs = next;
            TickOutcome::Advanced
        }
    }

    pub fn progress_ratio(&self) -> f64 {
        if self.duration_secs() == 0 {
            0.0
        } else {
            (self.current_secs as f64 / self.duration_secs() as f64).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(duration_secs: u32) -> PlaybackClock {
        PlaybackClock::new(ListenMetadata {
            title: "Test episode".to_string(),
            author: "Tester".to_string(),
            duration_secs,
        })
    }

    #[test]
    fn full_run_stops_and_rewinds() {
        let mut c = clock(720);
        c.toggle_play();
        let mut last = TickOutcome::Idle;
        for _ in 0..720 {
            last = c.tick();
        }
        assert_eq!(last, TickOutcome::Finished);
        assert!(!c.is_playing);
        assert_eq!(c.current_secs, 0);
    }

    #[test]
    fn tick_before_end_advances_one_second() {
        let mut c = clock(720);
        c.toggle_play();
        for _ in 0..719 {
            assert_eq!(c.tick(), TickOutcome::Advanced);
        }
        assert_eq!(c.current_secs, 719);
        assert!(c.is_playing);
    }

    #[test]
    fn paused_clock_does_not_move() {
        let mut c = clock(720);
        assert_eq!(c.tick(), TickOutcome::Idle);
        assert_eq!(c.current_secs, 0);
    }

    #[test]
    fn skip_forward_clamps_to_duration() {
        let mut c = clock(720);
        c.current_secs = 710;
        c.skip_forward();
        assert_eq!(c.current_secs, 720);
    }

    #[test]
    fn skip_back_clamps_to_zero() {
        let mut c = clock(720);
        c.current_secs = 5;
        c.skip_back();
        assert_eq!(c.current_secs, 0);
    }

    #[test]
    fn rate_wraps_from_double() {
        let mut c = clock(720);
        c.rate = PlaybackRate::Double;
        assert_eq!(c.cycle_rate(), PlaybackRate::ThreeQuarters);
    }

    #[test]
    fn rate_cycle_visits_every_speed() {
        let mut rate = PlaybackRate::ThreeQuarters;
        for expected in PlaybackRate::ALL.iter().cycle().skip(1).take(5) {
            rate = rate.next();
            assert_eq!(rate, *expected);
        }
    }

    #[test]
    fn tick_interval_scales_with_rate() {
        assert_eq!(PlaybackRate::Normal.tick_interval(), Duration::from_millis(1000));
        assert_eq!(PlaybackRate::Double.tick_interval(), Duration::from_millis(500));
        assert_eq!(PlaybackRate::ThreeQuarters.tick_interval(), Duration::from_millis(1333));
    }

    #[test]
    fn seek_maps_pointer_linearly() {
        let mut c = clock(720);
        c.seek_at(60, 10, 100);
        assert_eq!(c.current_secs, 360);

        c.seek_at(0, 10, 100);
        assert_eq!(c.current_secs, 0);

        c.seek_at(500, 10, 100);
        assert_eq!(c.current_secs, 720);
    }

    #[test]
    fn seek_floors_fractional_offsets() {
        let mut c = clock(100);
        c.seek_to_fraction(0.999);
        assert_eq!(c.current_secs, 99);
    }
}
