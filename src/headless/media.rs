//! Audio element whose playhead only moves when a test advances it.

use crate::media::MediaElement;

/// Audio element with a manually advanced playhead.
#[derive(Debug, Clone)]
pub struct HeadlessMedia {
    src: String,
    duration: f64,
    current_time: f64,
    paused: bool,
}

impl HeadlessMedia {
    pub fn new(src: impl Into<String>, duration: f64) -> Self {
        Self {
            src: src.into(),
            duration,
            current_time: 0.0,
            paused: true,
        }
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration;
    }

    /// Move the playhead forward by `dt` seconds while playing.
    ///
    /// Returns false once the end is reached (the element pauses itself).
    pub fn advance(&mut self, dt: f64) -> bool {
        if self.paused {
            return false;
        }
        self.current_time += dt;
        if self.duration.is_finite() && self.current_time >= self.duration {
            self.current_time = self.duration;
            self.paused = true;
            return false;
        }
        true
    }
}

impl MediaElement for HeadlessMedia {
    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn set_current_time(&mut self, time: f64) {
        self.current_time = if self.duration.is_finite() {
            time.clamp(0.0, self.duration.max(0.0))
        } else {
            time.max(0.0)
        };
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn play(&mut self) {
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn source(&self) -> String {
        self.src.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_stops_at_end() {
        let mut media = HeadlessMedia::new("a.wav", 1.0);
        media.play();
        assert!(media.advance(0.6));
        assert!(!media.advance(0.6));
        assert_eq!(media.current_time(), 1.0);
        assert!(media.is_paused());
    }

    #[test]
    fn paused_media_does_not_advance() {
        let mut media = HeadlessMedia::new("a.wav", 10.0);
        assert!(!media.advance(1.0));
        assert_eq!(media.current_time(), 0.0);
    }

    #[test]
    fn seek_is_clamped_to_duration() {
        let mut media = HeadlessMedia::new("a.wav", 10.0);
        media.set_current_time(12.0);
        assert_eq!(media.current_time(), 10.0);
        media.set_current_time(-1.0);
        assert_eq!(media.current_time(), 0.0);
    }
}
