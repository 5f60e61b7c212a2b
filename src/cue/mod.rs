//! Cue points and the index that owns them.
//!
//! - `index`: `CuePointIndex`, the working set with nearest/current lookups
//! - `shape`: mouth shape letters and their image slots

mod index;
mod shape;

pub use index::CuePointIndex;
pub use shape::MouthShape;

use std::fmt;

use rand::Rng;

use crate::dom::ElementHandle;

/// Stable cue identifier, derived from the cue time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CueId(String);

impl CueId {
    /// Id text for a time, as the cue cards write it (`5.4`, `0.0`).
    pub fn from_time(time: f64) -> Self {
        Self(format!("{:?}", time))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CueId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CueId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for CueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Semi-transparent region colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const REGION_ALPHA: f32 = 0.5;

    /// Random colour at half opacity.
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            r: rng.gen(),
            g: rng.gen(),
            b: rng.gen(),
            a: Self::REGION_ALPHA,
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// A labeled instant where the mouth shape changes.
#[derive(Debug, Clone, PartialEq)]
pub struct CuePoint {
    /// Seconds from the start of the audio, never negative
    pub time: f64,
    pub id: CueId,
    /// Mouth shape letter (or free text for manual markers)
    pub label: String,
    /// Back-reference to the rendered card, if one exists
    pub dom_ref: Option<ElementHandle>,
    /// Colour of the waveform region drawn for this cue
    pub color: Option<Rgba>,
}

impl CuePoint {
    /// Create a cue whose id is derived from its time.
    pub fn new(time: f64, label: impl Into<String>) -> Self {
        let time = time.max(0.0);
        Self {
            time,
            id: CueId::from_time(time),
            label: label.into(),
            dom_ref: None,
            color: None,
        }
    }

    pub fn with_dom_ref(mut self, handle: ElementHandle) -> Self {
        self.dom_ref = Some(handle);
        self
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    pub fn shape(&self) -> MouthShape {
        MouthShape::from_label(&self.label)
    }
}
