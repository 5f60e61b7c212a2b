//! lipcue - keeps an audio element, its waveform view and a panel of
//! mouth-shape cue cards in lockstep.
//!
//! The engine talks to its host through four seams: [`media::MediaElement`],
//! [`renderer::WaveformRenderer`], [`dom::CueDom`] and
//! [`source::DocumentFetcher`]. [`headless`] provides in-memory versions of
//! each, used by the CLI and the tests.

pub mod cli;
pub mod config;
pub mod cue;
pub mod dom;
pub mod error;
pub mod headless;
pub mod media;
pub mod renderer;
pub mod session;
pub mod source;
pub mod sync;

pub use config::Config;
pub use cue::{CueId, CuePoint, CuePointIndex, MouthShape};
pub use error::{ConfigError, SyncError};
pub use session::{EventReport, Session};
