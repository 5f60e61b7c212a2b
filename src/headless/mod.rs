//! In-memory hosts for the engine's seams.
//!
//! These stand in for the browser: an audio element with a movable
//! playhead, a renderer that records every command it receives, and a
//! small element tree with ids and classes. The CLI drives sessions through
//! them and the test suite asserts against their records.

mod dom;
mod media;
mod renderer;

pub use dom::HeadlessDom;
pub use media::HeadlessMedia;
pub use renderer::{
    HeadlessRendererFactory, Lifecycle, RendererCommand, RendererHandle, RendererRecord,
};
