//! `lipcue nearest`, `lipcue active` and `lipcue click`

use anyhow::{bail, Result};

use lipcue::cli::ClickArgs;
use lipcue::headless::{HeadlessDom, HeadlessMedia, HeadlessRendererFactory};
use lipcue::source::FileFetcher;
use lipcue::{Config, Session};

use super::replay::render_cards;

#[cfg(not(tarpaulin_include))]
pub fn handle_nearest(config: &Config, file: &str, time: f64, threshold: Option<f64>) -> Result<()> {
    let threshold = threshold.unwrap_or(config.sync.nearest_threshold);
    let index = super::load_index(file)?;
    match index.find_nearest(time, threshold) {
        Some(cue) => println!("{:.3} {} {}", cue.time, cue.id, cue.label),
        None => println!("none"),
    }
    Ok(())
}

#[cfg(not(tarpaulin_include))]
pub fn handle_active(config: &Config, file: &str, time: f64) -> Result<()> {
    let index = super::load_index(file)?;
    let active: Vec<String> = index
        .within(time, config.sync.highlight_threshold)
        .map(|cue| cue.id.to_string())
        .collect();
    if active.is_empty() {
        println!("none");
    } else {
        println!("{}", active.join(" "));
    }
    Ok(())
}

#[cfg(not(tarpaulin_include))]
pub fn handle_click(config: &Config, args: &ClickArgs) -> Result<()> {
    let factory = HeadlessRendererFactory::new(args.duration);
    let mut session = Session::new(config.clone(), Box::new(factory));
    session.try_load_cues(&FileFetcher::new(), &args.file)?;

    let mut dom = HeadlessDom::new();
    render_cards(&mut dom, config, session.index());
    let mut media = HeadlessMedia::new(args.file.as_str(), args.duration);
    session.init(&media);

    let Some(outcome) = session.click(args.x, args.width, &mut media, &mut dom) else {
        bail!("Click ignored: width and duration must be positive");
    };
    println!("time     {:.2}", outcome.target_time);
    println!("progress {:.4}", outcome.progress);
    match outcome.selected {
        Some(id) => println!("selected {}", id),
        None => println!("selected none"),
    }
    Ok(())
}
