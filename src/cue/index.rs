//! In-memory working set of cue points.
//!
//! The set lives behind an `Arc` so that every mutation is a single
//! reference swap: a snapshot taken before `replace_all`, `add` or `clear`
//! keeps seeing the old set in full, and a snapshot taken after sees only
//! the new one.
//!
//! Storage order is insertion order and is never re-sorted. All time
//! lookups scan the whole set, so they are correct for any order.

use std::collections::HashSet;
use std::sync::Arc;

use super::{CueId, CuePoint};

/// Ordered set of cue points with unique ids.
#[derive(Debug, Clone, Default)]
pub struct CuePointIndex {
    cues: Arc<Vec<CuePoint>>,
}

impl CuePointIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a whole new working set.
    ///
    /// Colliding ids inside the batch are made unique with a `-N` suffix.
    pub fn replace_all(&mut self, cues: Vec<CuePoint>) {
        let mut seen = HashSet::with_capacity(cues.len());
        let cues = cues
            .into_iter()
            .map(|mut cue| {
                cue.id = unique_id(&cue.id, |id| seen.contains(id));
                seen.insert(cue.id.clone());
                cue
            })
            .collect();
        self.cues = Arc::new(cues);
    }

    /// Append one cue with an id generated from its time. Returns the id.
    pub fn add(&mut self, time: f64, label: impl Into<String>) -> CueId {
        self.insert(CuePoint::new(time, label))
    }

    /// Append a prepared cue, keeping ids unique. Returns the final id.
    pub fn insert(&mut self, mut cue: CuePoint) -> CueId {
        cue.id = unique_id(&cue.id, |id| self.contains_id(id));
        let id = cue.id.clone();
        Arc::make_mut(&mut self.cues).push(cue);
        id
    }

    pub fn clear(&mut self) {
        self.cues = Arc::new(Vec::new());
    }

    /// Current set as an immutable snapshot.
    pub fn snapshot(&self) -> Arc<Vec<CuePoint>> {
        Arc::clone(&self.cues)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CuePoint> {
        self.cues.iter()
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn get(&self, id: &CueId) -> Option<&CuePoint> {
        self.cues.iter().find(|c| &c.id == id)
    }

    pub fn contains_id(&self, id: &CueId) -> bool {
        self.get(id).is_some()
    }

    /// Cue closest to `time`, if it lies strictly within `threshold`.
    ///
    /// Exact ties go to the cue with the earliest time; cues sharing that
    /// time resolve to the first inserted.
    pub fn find_nearest(&self, time: f64, threshold: f64) -> Option<&CuePoint> {
        let mut best: Option<(&CuePoint, f64)> = None;
        for cue in self.cues.iter() {
            let diff = (time - cue.time).abs();
            let better = match best {
                None => true,
                Some((current, best_diff)) => {
                    diff < best_diff || (diff == best_diff && cue.time < current.time)
                }
            };
            if better {
                best = Some((cue, diff));
            }
        }
        best.filter(|(_, diff)| *diff < threshold)
            .map(|(cue, _)| cue)
    }

    /// Cues within `threshold` of `time` (strict), in storage order.
    pub fn within(&self, time: f64, threshold: f64) -> impl Iterator<Item = &CuePoint> {
        self.cues
            .iter()
            .filter(move |c| (time - c.time).abs() < threshold)
    }

    /// The cue in effect at `time`: greatest time not after `time`.
    pub fn cue_at(&self, time: f64) -> Option<&CuePoint> {
        self.cues
            .iter()
            .filter(|c| c.time <= time)
            .fold(None, |acc: Option<&CuePoint>, c| match acc {
                Some(best) if best.time >= c.time => Some(best),
                _ => Some(c),
            })
    }

    /// First cue strictly after `time`.
    pub fn next_after(&self, time: f64) -> Option<&CuePoint> {
        self.cues
            .iter()
            .filter(|c| c.time > time)
            .fold(None, |acc: Option<&CuePoint>, c| match acc {
                Some(best) if best.time <= c.time => Some(best),
                _ => Some(c),
            })
    }

    /// End of the segment starting at `start`: the next cue, or the end of
    /// the audio when `start` is the last cue.
    pub fn segment_end(&self, start: f64, duration: f64) -> f64 {
        self.next_after(start).map_or(duration, |c| c.time)
    }
}

/// `base`, or `base-1`, `base-2`, ... whichever is not yet taken.
fn unique_id(base: &CueId, taken: impl Fn(&CueId) -> bool) -> CueId {
    if !taken(base) {
        return base.clone();
    }
    (1..)
        .map(|n| CueId::from(format!("{}-{}", base, n)))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.clone())
}
