//! `lipcue cues`

use anyhow::Result;

#[cfg(not(tarpaulin_include))]
pub fn handle(file: &str) -> Result<()> {
    let index = super::load_index(file)?;
    if index.is_empty() {
        println!("No cues in {}", file);
        return Ok(());
    }
    println!("{:>9}  {:<12} {:<6} image", "time", "id", "label");
    for cue in index.iter() {
        println!(
            "{:>9.3}  {:<12} {:<6} {}",
            cue.time,
            cue.id,
            cue.label,
            cue.shape().image_index()
        );
    }
    Ok(())
}
