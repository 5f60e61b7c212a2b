//! `lipcue replay`: a full playback, or one cue, through a headless session

use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use lipcue::cli::ReplayArgs;
use lipcue::dom::ContainerPath;
use lipcue::headless::{HeadlessDom, HeadlessMedia, HeadlessRendererFactory};
use lipcue::media::{MediaElement, MediaEvent};
use lipcue::source::FileFetcher;
use lipcue::{Config, CueId, CuePointIndex, MouthShape, Session};

/// Lay out the cue panel for `index` the way the page renders it.
pub fn render_cards(dom: &mut HeadlessDom, config: &Config, index: &CuePointIndex) {
    let mut segments = config.readiness.container_path.clone();
    segments.push(config.dom.cue_container.clone());
    dom.ensure_path(&ContainerPath::new(segments));
    dom.add_cue_cards(
        &config.dom.cue_container,
        &config.dom.marker_class,
        index.iter().map(|cue| (cue.time, cue.label.as_str())),
    );
}

#[cfg(not(tarpaulin_include))]
pub fn handle(config: Config, args: &ReplayArgs) -> Result<()> {
    if !(args.step.is_finite() && args.step > 0.0) {
        bail!("--step must be a positive number of seconds");
    }
    if !(args.duration.is_finite() && args.duration > 0.0) {
        bail!("--duration must be a positive number of seconds");
    }

    let factory = HeadlessRendererFactory::new(args.duration);
    let mut session = Session::new(config.clone(), Box::new(factory.clone()));
    session.try_load_cues(&FileFetcher::new(), &args.file)?;

    let cancel = session.cancel_token();
    ctrlc::set_handler(move || cancel.cancel()).context("Failed to install Ctrl-C handler")?;

    let mut dom = HeadlessDom::new();
    render_cards(&mut dom, &config, session.index());
    let mut media = HeadlessMedia::new(args.file.as_str(), args.duration);

    session.handle_media_event(&MediaEvent::LoadedData, &mut media, &mut dom);
    let waveform = factory
        .latest()
        .context("Session did not create a waveform renderer")?;
    match &args.from {
        Some(from) => {
            let id = CueId::from(from.as_str());
            let Some(end) = session.play_segment(&id, &mut media) else {
                bail!("No cue with id {} in {}", from, args.file);
            };
            println!("Playing cue {} until {:.2}s", id, end);
            session.handle_media_event(&MediaEvent::Seeked, &mut media, &mut dom);
        }
        None => media.play(),
    }
    session.handle_media_event(&MediaEvent::Play, &mut media, &mut dom);

    let token = session.cancel_token();
    let mut shape: Option<MouthShape> = None;
    let mut ticks = 0u32;
    loop {
        if token.is_cancelled() {
            println!("Replay cancelled at {:.2}s", media.current_time());
            break;
        }
        if args.realtime {
            thread::sleep(Duration::from_secs_f64(args.step));
        }
        let playing = media.advance(args.step);
        waveform.advance(args.step);
        ticks += 1;

        let report = session.handle_media_event(&MediaEvent::TimeUpdate, &mut media, &mut dom);
        let time = media.current_time();
        let current = session.index().cue_at(time).map(|cue| cue.shape());
        let change = report.highlight.unwrap_or_default();
        if !change.is_empty() || current != shape {
            shape = current;
            let mut line = format!("{:>8.2}s  shape {}", time, fmt_shape(current));
            for id in &change.activated {
                line.push_str(&format!("  +{}", id));
            }
            for id in &change.deactivated {
                line.push_str(&format!("  -{}", id));
            }
            println!("{}", line);
        }

        if !playing || media.is_paused() {
            break;
        }
    }

    media.pause();
    session.handle_media_event(&MediaEvent::Pause, &mut media, &mut dom);
    println!(
        "{} updates, {} waveform seeks, {} cues",
        ticks,
        waveform.seek_count(),
        session.index().len()
    );
    session.teardown();
    Ok(())
}

fn fmt_shape(shape: Option<MouthShape>) -> String {
    match shape {
        Some(shape) => format!("{} ({})", shape, shape.image_index()),
        None => "-".to_string(),
    }
}
