//! End-to-end session tests against the headless hosts

use std::thread;
use std::time::{Duration, Instant};

use lipcue::dom::ContainerPath;
use lipcue::headless::{HeadlessDom, HeadlessMedia, HeadlessRendererFactory};
use lipcue::media::{MediaElement, MediaEvent};
use lipcue::source::FileFetcher;
use lipcue::sync::BridgeCommand;
use lipcue::{Config, CueId, Session, SyncError};

use crate::helpers::{fixture, fixtures_dir, load_fixture};

fn config(highlight_threshold: f64) -> Config {
    let mut config = Config::default();
    config.sync.highlight_threshold = highlight_threshold;
    config.readiness.timeout_ms = 10_000;
    config.readiness.poll_interval_ms = 10;
    config
}

fn panel(config: &Config) -> HeadlessDom {
    let mut dom = HeadlessDom::new();
    let mut segments = config.readiness.container_path.clone();
    segments.push(config.dom.cue_container.clone());
    dom.ensure_path(&ContainerPath::new(segments));
    dom
}

/// Session with the vocals fixture loaded and its cards on the page.
fn loaded(config: Config, duration: f64) -> (Session, HeadlessRendererFactory, HeadlessDom) {
    let factory = HeadlessRendererFactory::new(duration);
    let mut session = Session::new(config.clone(), Box::new(factory.clone()));
    let fetcher = FileFetcher::with_root(fixtures_dir());
    assert_eq!(session.try_load_cues(&fetcher, "vocals.json").unwrap(), 5);

    let mut dom = panel(&config);
    let cards: Vec<(f64, String)> = session
        .index()
        .iter()
        .map(|c| (c.time, c.label.clone()))
        .collect();
    dom.add_cue_cards(
        &config.dom.cue_container,
        &config.dom.marker_class,
        cards.iter().map(|(t, l)| (*t, l.as_str())),
    );
    (session, factory, dom)
}

#[test]
fn fixture_is_a_rhubarb_document() {
    assert!(load_fixture("vocals.json").contains("mouthCues"));
    assert!(fixture("vocals.json").exists());
}

#[test]
fn playback_moves_highlight_along_the_cues() {
    let (mut session, factory, mut dom) = loaded(config(0.3), 3.2);
    let mut media = HeadlessMedia::new("vocals.wav", 3.2);

    session.handle_media_event(&MediaEvent::LoadedData, &mut media, &mut dom);
    let waveform = factory.latest().unwrap();
    media.play();
    session.handle_media_event(&MediaEvent::Play, &mut media, &mut dom);

    let mut seen = Vec::new();
    while media.advance(0.05) {
        waveform.advance(0.05);
        let report = session.handle_media_event(&MediaEvent::TimeUpdate, &mut media, &mut dom);
        assert_eq!(report.command, BridgeCommand::None);
        seen.extend(report.highlight.unwrap().activated);
    }

    for id in ["0.4", "0.9", "1.5", "2.1"] {
        assert!(seen.contains(&CueId::from(id)), "{} never highlighted", id);
    }
    assert_eq!(waveform.seek_count(), 0);
}

#[test]
fn drift_beyond_tolerance_resyncs_renderer() {
    let (mut session, factory, mut dom) = loaded(config(5.0), 4.0);
    let mut media = HeadlessMedia::new("vocals.wav", 4.0);
    session.init(&media);
    let waveform = factory.latest().unwrap();

    media.play();
    session.handle_media_event(&MediaEvent::Play, &mut media, &mut dom);
    media.advance(2.0);
    waveform.set_current_time(1.5);

    let report = session.handle_media_event(&MediaEvent::TimeUpdate, &mut media, &mut dom);
    assert_eq!(report.command, BridgeCommand::Resync(0.5));
    assert_eq!(session.renderer_time(), Some(2.0));
}

#[test]
fn native_seek_moves_cursor_and_highlights() {
    let (mut session, factory, mut dom) = loaded(config(0.3), 4.0);
    let mut media = HeadlessMedia::new("vocals.wav", 4.0);
    session.init(&media);

    media.set_current_time(1.0);
    let report = session.handle_media_event(&MediaEvent::Seeked, &mut media, &mut dom);

    assert_eq!(report.command, BridgeCommand::Seek(0.25));
    assert_eq!(factory.latest().unwrap().record().last_seek(), Some(0.25));
    assert_eq!(dom.ids_with_class("blink"), ["0.9"]);
}

#[test]
fn click_selects_card_and_scrolls_it_into_view() {
    let (mut session, _, mut dom) = loaded(config(5.0), 4.0);
    let mut media = HeadlessMedia::new("vocals.wav", 4.0);
    session.init(&media);

    // 400 / 1000 * 4.0 = 1.6
    let outcome = session.click(400.0, 1000.0, &mut media, &mut dom).unwrap();

    assert_eq!(media.current_time(), 1.6);
    assert_eq!(outcome.selected, Some(CueId::from("1.5")));
    assert_eq!(dom.ids_with_class("blink"), ["1.5"]);
    assert!(dom.focused().is_some());
}

#[test]
fn regenerate_replaces_document_cues_with_cards() {
    let config = config(5.0);
    let factory = HeadlessRendererFactory::new(4.0);
    let mut session = Session::new(config.clone(), Box::new(factory));
    session.add_marker(3.0, "G");

    let mut dom = panel(&config);
    dom.add_cue_cards("CuePoints", "cue-point", [(0.25, "A"), (0.75, "C")]);

    assert_eq!(session.try_regenerate(&mut dom).unwrap(), 2);
    let ids: Vec<&str> = session.index().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["0.25", "0.75"]);
}

#[test]
fn cancelled_regenerate_keeps_index() {
    let mut config = config(5.0);
    config.readiness.container_path = vec!["NeverRendered".to_string()];
    let mut session = Session::new(config, Box::new(HeadlessRendererFactory::new(4.0)));
    session.add_marker(1.0, "A");

    let token = session.cancel_token();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        token.cancel();
    });

    let started = Instant::now();
    let mut dom = HeadlessDom::new();
    let err = session.try_regenerate(&mut dom).unwrap_err();
    canceller.join().unwrap();

    assert!(matches!(err, SyncError::Cancelled));
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(session.index().len(), 1);
}

#[test]
fn events_after_teardown_are_ignored() {
    let (mut session, factory, mut dom) = loaded(config(5.0), 4.0);
    let mut media = HeadlessMedia::new("vocals.wav", 4.0);
    session.init(&media);
    session.teardown();

    let report = session.handle_media_event(&MediaEvent::Play, &mut media, &mut dom);
    assert_eq!(report.command, BridgeCommand::None);
    assert!(factory.latest().unwrap().is_destroyed());
}

#[test]
fn panel_rendered_while_waiting_is_picked_up_by_ticks() {
    let config = config(5.0);
    let mut session = Session::new(config.clone(), Box::new(HeadlessRendererFactory::new(4.0)));
    let mut media = HeadlessMedia::new("vocals.wav", 4.0);
    let mut dom = HeadlessDom::new();
    session.init(&media);

    session.regenerate_from_manual_markers();
    media.play();
    for _ in 0..3 {
        thread::sleep(Duration::from_millis(12));
        media.advance(0.1);
        session.handle_media_event(&MediaEvent::TimeUpdate, &mut media, &mut dom);
    }
    assert!(session.is_regenerating());

    // the UI builds the panel while playback keeps ticking
    dom = panel(&config);
    dom.add_cue_cards("CuePoints", "cue-point", [(0.25, "A"), (0.75, "C")]);
    thread::sleep(Duration::from_millis(12));
    media.advance(0.1);
    let report = session.handle_media_event(&MediaEvent::TimeUpdate, &mut media, &mut dom);

    assert!(!session.is_regenerating());
    assert_eq!(session.index().len(), 2);
    assert_eq!(report.highlight.unwrap().activated.len(), 2);
}

#[test]
fn play_segment_stops_at_next_cue() {
    let (mut session, factory, mut dom) = loaded(config(0.3), 3.2);
    let mut media = HeadlessMedia::new("vocals.wav", 3.2);
    session.handle_media_event(&MediaEvent::LoadedData, &mut media, &mut dom);

    let end = session.play_segment(&CueId::from("0.9"), &mut media).unwrap();
    assert_eq!(end, 1.5);
    session.handle_media_event(&MediaEvent::Play, &mut media, &mut dom);
    let waveform = factory.latest().unwrap();

    while !media.is_paused() {
        media.advance(0.1);
        waveform.advance(0.1);
        session.handle_media_event(&MediaEvent::TimeUpdate, &mut media, &mut dom);
    }
    session.handle_media_event(&MediaEvent::Pause, &mut media, &mut dom);

    assert!(media.current_time() >= 1.5 && media.current_time() < 1.65);
    assert!(!waveform.record().playing);
}
