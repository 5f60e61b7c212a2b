//! Marker sources: where cue points come from.
//!
//! Two sources feed the index with a full batch each time:
//! - a cue-data document (`{ "mouthCues": [{ "start", "value" }] }`)
//! - the marker-tagged cards inside a named container of the page
//!
//! The `readiness` submodule provides the bounded wait used before a
//! container scan; `fetch` provides document readers.

mod fetch;
pub mod readiness;

pub use fetch::{DocumentFetcher, FileFetcher};
pub use readiness::{
    wait_for, wait_for_container, wait_until, CancelToken, ReadinessPoll, WaitOutcome,
};

use serde::Deserialize;
use tracing::debug;

use crate::cue::{CueId, CuePoint, Rgba};
use crate::dom::CueDom;
use crate::error::SyncError;

/// The only part of a cue-data document that is read.
#[derive(Debug, Clone, Deserialize)]
pub struct CueDocument {
    #[serde(rename = "mouthCues")]
    pub mouth_cues: Vec<DocumentCue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentCue {
    pub start: f64,
    pub value: String,
}

/// Parse document text into cue points, each with a random region colour.
pub fn parse_document(text: &str) -> Result<Vec<CuePoint>, serde_json::Error> {
    let document: CueDocument = serde_json::from_str(text)?;
    Ok(document
        .mouth_cues
        .into_iter()
        .map(|cue| CuePoint::new(cue.start, cue.value).with_color(Rgba::random()))
        .collect())
}

/// Fetch and parse a cue-data document.
///
/// Any fetch or parse failure is `SourceUnavailable`; nothing partial is
/// returned.
pub fn load_from_document(
    fetcher: &dyn DocumentFetcher,
    url: &str,
) -> Result<Vec<CuePoint>, SyncError> {
    let text = fetcher
        .fetch(url)
        .map_err(|e| SyncError::source_unavailable(url, e))?;
    let cues = parse_document(&text).map_err(|e| SyncError::source_unavailable(url, e))?;
    debug!("Loaded {} cues from {}", cues.len(), url);
    Ok(cues)
}

/// Read marker cards inside `container_id`, in document order.
///
/// Each card's id attribute is its time. Cards whose id is not a finite,
/// non-negative number are skipped. A missing container or an empty one
/// yields an empty batch.
pub fn scan_container(dom: &dyn CueDom, container_id: &str, marker_class: &str) -> Vec<CuePoint> {
    dom.marker_elements(container_id, marker_class)
        .into_iter()
        .filter_map(|element| {
            let time = match element.id.trim().parse::<f64>() {
                Ok(t) if t.is_finite() && t >= 0.0 => t,
                _ => {
                    debug!("Skipping marker with non-numeric id {:?}", element.id);
                    return None;
                }
            };
            let mut cue = CuePoint::new(time, element.text.unwrap_or_default())
                .with_dom_ref(element.handle);
            cue.id = CueId::from(element.id);
            Some(cue)
        })
        .collect()
}
