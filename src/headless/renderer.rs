//! Recording waveform renderer.
//!
//! Every command sent to a headless renderer is appended to its record,
//! and the factory keeps the order in which renderers were created and
//! destroyed.

use std::cell::RefCell;
use std::rc::Rc;

use crate::renderer::{Region, RendererFactory, RendererOptions, WaveformRenderer};

/// A command received by a headless renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum RendererCommand {
    Load(String),
    SetVolume(f64),
    Zoom(f64),
    Play,
    Pause,
    SeekTo(f64),
    Empty,
    Destroy,
    AddRegion(f64),
    ClearRegions,
}

/// Everything a headless renderer has been told, plus its cursor.
#[derive(Debug, Clone, Default)]
pub struct RendererRecord {
    pub options: RendererOptions,
    pub commands: Vec<RendererCommand>,
    pub regions: Vec<Region>,
    /// Length the renderer assumes for fraction seeks
    pub duration: f64,
    pub current_time: f64,
    pub playing: bool,
    pub destroyed: bool,
}

impl RendererRecord {
    pub fn seek_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, RendererCommand::SeekTo(_)))
            .count()
    }

    pub fn last_seek(&self) -> Option<f64> {
        self.commands.iter().rev().find_map(|c| match c {
            RendererCommand::SeekTo(f) => Some(*f),
            _ => None,
        })
    }
}

/// Shared view onto one renderer instance's record.
#[derive(Debug, Clone, Default)]
pub struct RendererHandle(Rc<RefCell<RendererRecord>>);

impl RendererHandle {
    pub fn record(&self) -> std::cell::Ref<'_, RendererRecord> {
        self.0.borrow()
    }

    /// Move the renderer's cursor independently of the audio element.
    pub fn set_current_time(&self, time: f64) {
        self.0.borrow_mut().current_time = time;
    }

    /// Advance the cursor while playing, as the renderer's own clock would.
    pub fn advance(&self, dt: f64) {
        let mut record = self.0.borrow_mut();
        if record.playing && !record.destroyed {
            record.current_time = (record.current_time + dt).min(record.duration);
        }
    }

    pub fn seek_count(&self) -> usize {
        self.0.borrow().seek_count()
    }

    pub fn is_destroyed(&self) -> bool {
        self.0.borrow().destroyed
    }
}

/// One step in the lives of a factory's renderers, by creation index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Created(usize),
    Destroyed(usize),
}

struct HeadlessRenderer {
    record: RendererHandle,
    index: usize,
    lifecycle: Rc<RefCell<Vec<Lifecycle>>>,
}

impl HeadlessRenderer {
    fn push(&self, command: RendererCommand) -> std::cell::RefMut<'_, RendererRecord> {
        let mut record = self.record.0.borrow_mut();
        record.commands.push(command);
        record
    }
}

impl WaveformRenderer for HeadlessRenderer {
    fn load(&mut self, url: &str) {
        self.push(RendererCommand::Load(url.to_string()));
    }

    fn set_volume(&mut self, volume: f64) {
        self.push(RendererCommand::SetVolume(volume));
    }

    fn zoom(&mut self, px_per_sec: f64) {
        self.push(RendererCommand::Zoom(px_per_sec));
    }

    fn play(&mut self) {
        self.push(RendererCommand::Play).playing = true;
    }

    fn pause(&mut self) {
        self.push(RendererCommand::Pause).playing = false;
    }

    fn seek_to(&mut self, fraction: f64) {
        let mut record = self.push(RendererCommand::SeekTo(fraction));
        record.current_time = fraction.clamp(0.0, 1.0) * record.duration;
    }

    fn current_time(&self) -> f64 {
        self.record.0.borrow().current_time
    }

    fn empty(&mut self) {
        let mut record = self.push(RendererCommand::Empty);
        record.current_time = 0.0;
        record.playing = false;
    }

    fn destroy(&mut self) {
        let mut record = self.push(RendererCommand::Destroy);
        if !record.destroyed {
            self.lifecycle
                .borrow_mut()
                .push(Lifecycle::Destroyed(self.index));
        }
        record.destroyed = true;
        record.playing = false;
    }

    fn add_region(&mut self, region: Region) {
        self.push(RendererCommand::AddRegion(region.start))
            .regions
            .push(region);
    }

    fn clear_regions(&mut self) {
        self.push(RendererCommand::ClearRegions).regions.clear();
    }
}

/// Creates headless renderers and keeps a handle on each one.
///
/// Clones share the handle list, so a test can hand one clone to a session
/// and inspect the renderers it creates through another.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRendererFactory {
    duration: f64,
    instances: Rc<RefCell<Vec<RendererHandle>>>,
    lifecycle: Rc<RefCell<Vec<Lifecycle>>>,
}

impl HeadlessRendererFactory {
    /// `duration` is what every created renderer decodes the audio to.
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            instances: Rc::default(),
            lifecycle: Rc::default(),
        }
    }

    pub fn instances(&self) -> Vec<RendererHandle> {
        self.instances.borrow().clone()
    }

    /// Creations and destructions in the order they happened.
    pub fn lifecycle(&self) -> Vec<Lifecycle> {
        self.lifecycle.borrow().clone()
    }

    /// Handle on the most recently created renderer.
    pub fn latest(&self) -> Option<RendererHandle> {
        self.instances.borrow().last().cloned()
    }
}

impl RendererFactory for HeadlessRendererFactory {
    fn create(&mut self, options: &RendererOptions) -> Box<dyn WaveformRenderer> {
        let handle = RendererHandle(Rc::new(RefCell::new(RendererRecord {
            options: options.clone(),
            duration: self.duration,
            ..RendererRecord::default()
        })));
        let index = {
            let mut instances = self.instances.borrow_mut();
            instances.push(handle.clone());
            instances.len() - 1
        };
        self.lifecycle.borrow_mut().push(Lifecycle::Created(index));
        Box::new(HeadlessRenderer {
            record: handle,
            index,
            lifecycle: Rc::clone(&self.lifecycle),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::Rgba;

    #[test]
    fn factory_keeps_handle_per_instance() {
        let mut factory = HeadlessRendererFactory::new(10.0);
        let mut first = factory.create(&RendererOptions::default());
        let _second = factory.create(&RendererOptions::default());

        first.seek_to(0.5);
        assert_eq!(factory.instances().len(), 2);
        assert_eq!(factory.instances()[0].record().current_time, 5.0);
        assert_eq!(factory.latest().unwrap().seek_count(), 0);
    }

    #[test]
    fn lifecycle_records_creation_and_destroy_order() {
        let mut factory = HeadlessRendererFactory::new(10.0);
        let mut first = factory.create(&RendererOptions::default());
        first.destroy();
        first.destroy();
        let _second = factory.create(&RendererOptions::default());

        assert_eq!(
            factory.lifecycle(),
            [
                Lifecycle::Created(0),
                Lifecycle::Destroyed(0),
                Lifecycle::Created(1)
            ]
        );
    }

    #[test]
    fn regions_are_recorded_and_cleared() {
        let mut factory = HeadlessRendererFactory::new(10.0);
        let mut renderer = factory.create(&RendererOptions::default());
        renderer.add_region(Region {
            start: 1.0,
            content: "A".to_string(),
            color: Rgba {
                r: 1,
                g: 2,
                b: 3,
                a: 0.5,
            },
        });
        let waveform = factory.latest().unwrap();
        assert_eq!(waveform.record().regions.len(), 1);

        renderer.clear_regions();
        assert!(waveform.record().regions.is_empty());
    }

    #[test]
    fn cursor_only_advances_while_playing() {
        let mut factory = HeadlessRendererFactory::new(10.0);
        let mut renderer = factory.create(&RendererOptions::default());
        let waveform = factory.latest().unwrap();

        waveform.advance(1.0);
        assert_eq!(renderer.current_time(), 0.0);

        renderer.play();
        waveform.advance(1.0);
        assert_eq!(renderer.current_time(), 1.0);
    }
}
