//! Native audio element seam.
//!
//! The audio element is the single source of truth for playback time. The
//! engine reads it fresh on every event and writes to it only on the
//! click-to-seek path.

use std::fmt;

/// Media events the engine reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// A new source finished loading its first frame
    LoadedData,
    Play,
    Pause,
    /// An explicit seek completed
    Seeked,
    /// Periodic progress during playback
    TimeUpdate,
    /// Playback fault, with the host's description
    Error(String),
}

impl fmt::Display for MediaEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadedData => write!(f, "loadeddata"),
            Self::Play => write!(f, "play"),
            Self::Pause => write!(f, "pause"),
            Self::Seeked => write!(f, "seeked"),
            Self::TimeUpdate => write!(f, "timeupdate"),
            Self::Error(_) => write!(f, "error"),
        }
    }
}

/// The native audio element.
pub trait MediaElement {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Total length in seconds. `NaN` or `0.0` until metadata is known.
    fn duration(&self) -> f64;

    /// Move the playhead. The host fires `Seeked` once it lands.
    fn set_current_time(&mut self, time: f64);

    fn is_paused(&self) -> bool;

    /// Start playback. The host fires `Play`.
    fn play(&mut self);

    /// Stop playback. The host fires `Pause`.
    fn pause(&mut self);

    /// URL of the loaded source.
    fn source(&self) -> String;
}

/// Snapshot of native playback, always read fresh from the element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub current_time: f64,
    pub is_playing: bool,
}

impl PlaybackState {
    pub fn read(media: &dyn MediaElement) -> Self {
        Self {
            current_time: media.current_time(),
            is_playing: !media.is_paused(),
        }
    }
}

/// Duration if it is usable for fraction math.
pub fn known_duration(media: &dyn MediaElement) -> Option<f64> {
    let duration = media.duration();
    (duration.is_finite() && duration > 0.0).then_some(duration)
}
