//! The owned editing session.
//!
//! A `Session` holds everything the page used to keep in globals: the cue
//! index, the live renderer (inside its bridge), the highlight state and
//! the cancellation token for pending waits. Host code forwards media
//! events, timer ticks, clicks and UI commands to it.
//!
//! The UI-facing commands (`load_cues_from_file`, `add_marker`,
//! `clear_markers`, `regenerate_from_manual_markers`) never fail from the
//! caller's point of view. Faults are logged and the previous state stays
//! in place. The `try_` variants return the error for callers that want it.
//!
//! Waiting for the cue panel never blocks the host: a regenerate only arms
//! a [`ReadinessPoll`], and each `tick` checks it once its interval has
//! passed.

use std::thread;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::cue::{CueId, CuePoint, CuePointIndex, Rgba};
use crate::dom::{ContainerPath, CueDom};
use crate::error::SyncError;
use crate::media::{known_duration, MediaElement, MediaEvent};
use crate::renderer::{Region, RendererFactory};
use crate::source::{self, CancelToken, DocumentFetcher, ReadinessPoll, WaitOutcome};
use crate::sync::{
    BridgeCommand, ClickOutcome, HighlightChange, HighlightScheduler, InteractionHandler,
    PlaybackBridge,
};

/// What one media event caused.
#[derive(Debug, Clone, PartialEq)]
pub struct EventReport {
    pub command: BridgeCommand,
    /// Set when the event also re-evaluated highlights
    pub highlight: Option<HighlightChange>,
}

impl EventReport {
    fn command(command: BridgeCommand) -> Self {
        Self {
            command,
            highlight: None,
        }
    }
}

pub struct Session {
    config: Config,
    factory: Box<dyn RendererFactory>,
    index: CuePointIndex,
    scheduler: HighlightScheduler,
    interaction: InteractionHandler,
    bridge: Option<PlaybackBridge>,
    cancel: CancelToken,
    pending_scan: Option<ReadinessPoll>,
    /// Stop time of a single-cue playback
    segment_end: Option<f64>,
}

impl Session {
    pub fn new(config: Config, factory: Box<dyn RendererFactory>) -> Self {
        let scheduler = HighlightScheduler::new(
            config.sync.highlight_threshold,
            config.dom.active_class.clone(),
        );
        let interaction = InteractionHandler::new(config.sync.nearest_threshold);
        Self {
            config,
            factory,
            index: CuePointIndex::new(),
            scheduler,
            interaction,
            bridge: None,
            cancel: CancelToken::new(),
            pending_scan: None,
            segment_end: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn index(&self) -> &CuePointIndex {
        &self.index
    }

    pub fn scheduler(&self) -> &HighlightScheduler {
        &self.scheduler
    }

    /// Token that cancels waits started by this session.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.bridge.is_some()
    }

    /// Whether a cue panel wait is in progress.
    pub fn is_regenerating(&self) -> bool {
        self.pending_scan.is_some()
    }

    /// Where single-cue playback will pause, if one is running.
    pub fn segment_end(&self) -> Option<f64> {
        self.segment_end
    }

    /// The renderer's cursor time, if a renderer is live.
    pub fn renderer_time(&self) -> Option<f64> {
        self.bridge.as_ref().map(PlaybackBridge::renderer_time)
    }

    /// Build a fresh renderer for the element's current source.
    ///
    /// The previous renderer is destroyed first so two renderers never
    /// follow the same element.
    pub fn init(&mut self, media: &dyn MediaElement) {
        if self.bridge.take().is_some() {
            debug!("Destroyed previous renderer");
        }
        let src = media.source();
        let mut renderer = self.factory.create(&self.config.renderer);
        renderer.load(&src);
        let mut bridge = PlaybackBridge::new(renderer, self.config.sync.drift_tolerance);
        for cue in self.index.iter() {
            if let Some(region) = region_for(cue) {
                bridge.add_region(region);
            }
        }
        self.bridge = Some(bridge);
        info!("Waveform initialized for {}", src);
    }

    /// Destroy the renderer and cancel any pending wait.
    pub fn teardown(&mut self) {
        self.cancel.cancel();
        self.pending_scan = None;
        self.segment_end = None;
        self.bridge = None;
        self.scheduler.forget();
        info!("Session torn down");
    }

    /// React to one native media event.
    ///
    /// Highlights follow `TimeUpdate` and `Seeked` whether or not a
    /// waveform exists yet.
    pub fn handle_media_event(
        &mut self,
        event: &MediaEvent,
        media: &mut dyn MediaElement,
        dom: &mut dyn CueDom,
    ) -> EventReport {
        match event {
            MediaEvent::LoadedData => {
                self.init(media);
                return EventReport::command(BridgeCommand::None);
            }
            MediaEvent::Error(reason) => {
                let err = SyncError::MediaError(reason.clone());
                warn!("{}", err);
            }
            MediaEvent::Pause => {
                if self.segment_end.take().is_some() {
                    debug!("Segment playback stopped");
                }
            }
            _ => {}
        }

        let command = match self.bridge.as_mut() {
            Some(bridge) => bridge.on_media_event(event, media),
            None => {
                debug!("No waveform for {} yet", event);
                BridgeCommand::None
            }
        };

        let highlight = match event {
            MediaEvent::TimeUpdate | MediaEvent::Seeked => Some(self.tick(media, dom)),
            _ => None,
        };
        EventReport { command, highlight }
    }

    /// Timer work: check a pending cue panel wait, stop single-cue
    /// playback once it reaches its end, then re-evaluate highlights.
    pub fn tick(&mut self, media: &mut dyn MediaElement, dom: &mut dyn CueDom) -> HighlightChange {
        if let Some(Err(e)) = self.advance_regenerate(dom, Instant::now()) {
            warn!("Cue panel unavailable: {}", e);
        }

        if let Some(end) = self.segment_end {
            if media.current_time() >= end {
                media.pause();
                self.segment_end = None;
                debug!("Segment ended at {:.2}s", end);
            }
        }

        self.scheduler
            .evaluate(media.current_time(), &self.index, dom)
    }

    /// Move playback to a cue's time, as selecting its card does.
    ///
    /// Returns the cue time, or `None` when no cue has that id.
    pub fn seek_to_cue(&mut self, id: &CueId, media: &mut dyn MediaElement) -> Option<f64> {
        let Some(time) = self.index.get(id).map(|cue| cue.time) else {
            debug!("No cue {} to seek to", id);
            return None;
        };
        media.set_current_time(time);
        if let (Some(bridge), Some(duration)) = (self.bridge.as_mut(), known_duration(media)) {
            bridge.seek_to(time / duration);
        }
        Some(time)
    }

    /// Play a single cue: seek to it, play, and pause when the next cue
    /// starts (or the audio ends).
    ///
    /// Returns the stop time, or `None` when no cue has that id.
    pub fn play_segment(&mut self, id: &CueId, media: &mut dyn MediaElement) -> Option<f64> {
        let start = self.seek_to_cue(id, media)?;
        let duration = known_duration(media).unwrap_or(f64::INFINITY);
        let end = self.index.segment_end(start, duration);
        self.segment_end = Some(end);
        media.play();
        debug!("Playing {} from {:.2}s until {:.2}s", id, start, end);
        Some(end)
    }

    /// Click on the waveform at `x` of a view `width` pixels wide.
    pub fn click(
        &mut self,
        x: f64,
        width: f64,
        media: &mut dyn MediaElement,
        dom: &mut dyn CueDom,
    ) -> Option<ClickOutcome> {
        self.interaction.handle_click(
            x,
            width,
            media,
            self.bridge.as_mut(),
            &self.index,
            &mut self.scheduler,
            dom,
        )
    }

    /// Zoom the waveform. A no-op until a renderer exists.
    pub fn zoom(&mut self, px_per_sec: f64) {
        match self.bridge.as_mut() {
            Some(bridge) => bridge.zoom(px_per_sec),
            None => debug!("Zoom {} ignored, no waveform yet", px_per_sec),
        }
    }

    /// Replace all cues with the ones from a cue-data document.
    pub fn try_load_cues(
        &mut self,
        fetcher: &dyn DocumentFetcher,
        url: &str,
    ) -> Result<usize, SyncError> {
        let cues = source::load_from_document(fetcher, url)?;
        self.index.replace_all(cues);
        if let Some(bridge) = self.bridge.as_mut() {
            bridge.clear_regions();
            for cue in self.index.iter() {
                if let Some(region) = region_for(cue) {
                    bridge.add_region(region);
                }
            }
        }
        info!("Loaded {} cues from {}", self.index.len(), url);
        Ok(self.index.len())
    }

    pub fn load_cues_from_file(&mut self, fetcher: &dyn DocumentFetcher, url: &str) {
        if let Err(e) = self.try_load_cues(fetcher, url) {
            warn!("Keeping previous cues: {}", e);
        }
    }

    /// Add one marker to the index and draw its region right away.
    pub fn add_marker(&mut self, time: f64, label: &str) -> CueId {
        let cue = CuePoint::new(time, label).with_color(Rgba::random());
        if let Some(region) = region_for(&cue) {
            if let Some(bridge) = self.bridge.as_mut() {
                bridge.add_region(region);
            }
        }
        let id = self.index.insert(cue);
        debug!("Added marker {} ({})", id, label);
        id
    }

    /// Remove every cue and region.
    pub fn clear_markers(&mut self) {
        self.index.clear();
        if let Some(bridge) = self.bridge.as_mut() {
            bridge.clear_regions();
        }
        debug!("Cleared all markers");
    }

    /// Arm a wait for the cue panel. Each later tick checks it once its
    /// poll interval has passed, and the index is rebuilt from the cards
    /// when the panel shows up. A wait already in progress is replaced.
    pub fn begin_regenerate(&mut self, now: Instant) {
        let readiness = &self.config.readiness;
        if self.pending_scan.is_some() {
            debug!("Restarting cue panel wait");
        }
        self.cancel.reset();
        self.pending_scan = Some(ReadinessPoll::start(
            readiness.timeout(),
            readiness.poll_interval(),
            self.cancel.clone(),
            now,
        ));
    }

    /// Advance a pending cue panel wait to `now`.
    ///
    /// Returns the result once the wait resolves. A panel that never
    /// appears leaves the index empty. A cancelled wait leaves it
    /// untouched.
    pub fn advance_regenerate(
        &mut self,
        dom: &mut dyn CueDom,
        now: Instant,
    ) -> Option<Result<usize, SyncError>> {
        let path = ContainerPath::new(self.config.readiness.container_path.iter().cloned());
        let outcome = self
            .pending_scan
            .as_mut()?
            .poll_container(now, dom, &path)?;
        self.pending_scan = None;

        Some(match outcome {
            WaitOutcome::Found { .. } => {
                let dom_config = &self.config.dom;
                let cues =
                    source::scan_container(dom, &dom_config.cue_container, &dom_config.marker_class);
                self.index.replace_all(cues);
                info!("Generated {} cue points from the cue panel", self.index.len());
                Ok(self.index.len())
            }
            WaitOutcome::TimedOut { .. } => {
                self.index.clear();
                Err(SyncError::ContainerNotFound {
                    path: path.to_string(),
                })
            }
            WaitOutcome::Cancelled { .. } => Err(SyncError::Cancelled),
        })
    }

    /// Regenerate on the calling thread, sleeping between checks.
    ///
    /// For hosts whose panel is built by another thread or already exists.
    pub fn try_regenerate(&mut self, dom: &mut dyn CueDom) -> Result<usize, SyncError> {
        self.begin_regenerate(Instant::now());
        let interval = self.config.readiness.poll_interval();
        loop {
            thread::sleep(interval);
            if let Some(result) = self.advance_regenerate(dom, Instant::now()) {
                return result;
            }
        }
    }

    /// Start rebuilding the index from the cue panel. Ticks finish the job.
    pub fn regenerate_from_manual_markers(&mut self) {
        self.begin_regenerate(Instant::now());
    }
}

fn region_for(cue: &CuePoint) -> Option<Region> {
    cue.color.map(|color| Region {
        start: cue.time,
        content: cue.label.clone(),
        color,
    })
}
