//! Synchronization between native playback, the waveform and the cue cards.
//!
//! - `bridge`: `PlaybackBridge`, native media events -> renderer commands
//! - `highlight`: `HighlightScheduler`, active class around the playhead
//! - `interaction`: `InteractionHandler`, click-to-seek and nearest cue

mod bridge;
mod highlight;
mod interaction;

pub use bridge::{BridgeCommand, PlaybackBridge};
pub use highlight::{HighlightChange, HighlightScheduler};
pub use interaction::{click_target, round_centis, ClickOutcome, InteractionHandler};
