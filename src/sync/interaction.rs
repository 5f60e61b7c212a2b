//! Click-to-seek on the waveform.
//!
//! A click at `x` in a view `width` pixels wide seeks the audio element to
//! the matching time (rounded to hundredths), moves the renderer cursor,
//! and selects the nearest cue card if one lies within the nearest-cue
//! window. A click that lands in a gap between cues only seeks.

use tracing::debug;

use crate::cue::{CueId, CuePointIndex};
use crate::dom::CueDom;
use crate::media::{known_duration, MediaElement};

use super::bridge::PlaybackBridge;
use super::highlight::HighlightScheduler;

/// Result of one handled click.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickOutcome {
    /// Position in the view as a fraction, `0.0..=1.0`
    pub progress: f64,
    /// Seconds the audio element was moved to
    pub target_time: f64,
    /// Cue selected by the click, if any was close enough
    pub selected: Option<CueId>,
}

/// Round to two decimal places.
pub fn round_centis(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Progress and target time for a click, or `None` when the view has no
/// width or the duration is not known yet.
pub fn click_target(x: f64, width: f64, duration: f64) -> Option<(f64, f64)> {
    if width.is_nan() || width <= 0.0 || !duration.is_finite() || duration <= 0.0 {
        return None;
    }
    let progress = (x / width).clamp(0.0, 1.0);
    Some((progress, round_centis(progress * duration)))
}

#[derive(Debug, Clone)]
pub struct InteractionHandler {
    nearest_threshold: f64,
}

impl InteractionHandler {
    pub fn new(nearest_threshold: f64) -> Self {
        Self { nearest_threshold }
    }

    pub fn nearest_threshold(&self) -> f64 {
        self.nearest_threshold
    }

    /// Handle a click on the waveform.
    ///
    /// Order of effects: audio element time, renderer seek, then the
    /// nearest-cue highlight with focus and centering.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_click(
        &self,
        x: f64,
        width: f64,
        media: &mut dyn MediaElement,
        bridge: Option<&mut PlaybackBridge>,
        index: &CuePointIndex,
        scheduler: &mut HighlightScheduler,
        dom: &mut dyn CueDom,
    ) -> Option<ClickOutcome> {
        let duration = known_duration(media)?;
        let (progress, target_time) = click_target(x, width, duration)?;

        media.set_current_time(target_time);
        if let Some(bridge) = bridge {
            bridge.seek_to(progress);
        }

        let selected = match index.find_nearest(target_time, self.nearest_threshold) {
            Some(cue) => {
                if let Some(handle) = scheduler.select_only(cue, index, dom) {
                    dom.focus_centered(handle);
                }
                Some(cue.id.clone())
            }
            None => {
                debug!("No cue within {}s of {:.2}", self.nearest_threshold, target_time);
                None
            }
        };

        Some(ClickOutcome {
            progress,
            target_time,
            selected,
        })
    }
}
