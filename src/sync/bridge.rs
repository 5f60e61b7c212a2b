//! Mirrors native media events onto the waveform renderer.
//!
//! The bridge owns the renderer. Every write to it goes through here: the
//! media event rules, the click seek, and the region and zoom commands.
//! The renderer never writes back into native playback, so no event the
//! bridge issues can trigger another one.

use tracing::debug;

use crate::media::{known_duration, MediaElement, MediaEvent};
use crate::renderer::{Region, WaveformRenderer};

/// What the bridge did in response to one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BridgeCommand {
    Play,
    Pause,
    /// Seek after a completed native seek
    Seek(f64),
    /// Drift correction during playback
    Resync(f64),
    /// Renderer blanked after a media fault
    Blank,
    None,
}

pub struct PlaybackBridge {
    renderer: Box<dyn WaveformRenderer>,
    drift_tolerance: f64,
}

impl PlaybackBridge {
    /// Wrap a freshly created renderer. Its audio output is muted; it only
    /// moves the cursor.
    pub fn new(mut renderer: Box<dyn WaveformRenderer>, drift_tolerance: f64) -> Self {
        renderer.set_volume(0.0);
        Self {
            renderer,
            drift_tolerance,
        }
    }

    pub fn drift_tolerance(&self) -> f64 {
        self.drift_tolerance
    }

    /// Apply the event rules for one native media event.
    pub fn on_media_event(&mut self, event: &MediaEvent, media: &dyn MediaElement) -> BridgeCommand {
        match event {
            MediaEvent::Play => {
                self.renderer.play();
                BridgeCommand::Play
            }
            MediaEvent::Pause => {
                self.renderer.pause();
                BridgeCommand::Pause
            }
            MediaEvent::Seeked => match fraction_of(media) {
                Some(fraction) => {
                    self.renderer.seek_to(fraction);
                    BridgeCommand::Seek(fraction)
                }
                None => BridgeCommand::None,
            },
            MediaEvent::TimeUpdate => {
                let drift = (self.renderer.current_time() - media.current_time()).abs();
                if drift <= self.drift_tolerance {
                    return BridgeCommand::None;
                }
                match fraction_of(media) {
                    Some(fraction) => {
                        debug!("Renderer drifted {:.3}s, resyncing", drift);
                        self.renderer.seek_to(fraction);
                        BridgeCommand::Resync(fraction)
                    }
                    None => BridgeCommand::None,
                }
            }
            MediaEvent::Error(reason) => {
                debug!("Blanking waveform after media error: {}", reason);
                self.renderer.empty();
                BridgeCommand::Blank
            }
            MediaEvent::LoadedData => BridgeCommand::None,
        }
    }

    /// One-way seek from a waveform click.
    pub fn seek_to(&mut self, fraction: f64) {
        self.renderer.seek_to(fraction.clamp(0.0, 1.0));
    }

    pub fn zoom(&mut self, px_per_sec: f64) {
        self.renderer.zoom(px_per_sec);
    }

    pub fn add_region(&mut self, region: Region) {
        self.renderer.add_region(region);
    }

    pub fn clear_regions(&mut self) {
        self.renderer.clear_regions();
    }

    pub fn renderer_time(&self) -> f64 {
        self.renderer.current_time()
    }
}

impl Drop for PlaybackBridge {
    fn drop(&mut self) {
        self.renderer.destroy();
    }
}

/// Native position as a fraction of the duration, if the duration is known.
fn fraction_of(media: &dyn MediaElement) -> Option<f64> {
    known_duration(media).map(|d| (media.current_time() / d).clamp(0.0, 1.0))
}
