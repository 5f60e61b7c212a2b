//! Waveform renderer seam.
//!
//! The renderer draws the waveform, a cursor and the cue regions. It is a
//! muted follower of the native audio element: the engine commands it and
//! never reads its regions back.

use serde::{Deserialize, Serialize};

use crate::cue::Rgba;

/// A cue region drawn on the waveform. Write-only from the engine's side.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub start: f64,
    pub content: String,
    pub color: Rgba,
}

/// Timeline ruler drawn above the waveform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineOptions {
    pub height: u32,
    /// Seconds between ticks
    pub time_interval: f64,
    pub primary_label_interval: u32,
    pub secondary_label_interval: u32,
    pub font_size: String,
    pub color: String,
    pub background: String,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            height: 20,
            time_interval: 0.2,
            primary_label_interval: 5,
            secondary_label_interval: 1,
            font_size: "10px".to_string(),
            color: "yellow".to_string(),
            background: "#0E7490".to_string(),
        }
    }
}

/// Options handed to [`RendererFactory::create`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererOptions {
    /// Selector of the element the waveform is drawn into
    pub container: String,
    pub wave_color: String,
    pub progress_color: String,
    pub timeline: TimelineOptions,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            container: "#waveform".to_string(),
            wave_color: "violet".to_string(),
            progress_color: "purple".to_string(),
            timeline: TimelineOptions::default(),
        }
    }
}

/// One waveform renderer instance.
pub trait WaveformRenderer {
    fn load(&mut self, url: &str);
    fn set_volume(&mut self, volume: f64);
    fn zoom(&mut self, px_per_sec: f64);
    fn play(&mut self);
    fn pause(&mut self);
    /// Seek to a fraction of the total length, `0.0..=1.0`.
    fn seek_to(&mut self, fraction: f64);
    /// The renderer's own idea of the playhead, in seconds.
    fn current_time(&self) -> f64;
    /// Drop the decoded waveform and draw nothing.
    fn empty(&mut self);
    /// Release the instance and all its listeners.
    fn destroy(&mut self);
    fn add_region(&mut self, region: Region);
    fn clear_regions(&mut self);
}

/// Creates renderer instances.
pub trait RendererFactory {
    fn create(&mut self, options: &RendererOptions) -> Box<dyn WaveformRenderer>;
}
