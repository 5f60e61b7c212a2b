//! Highlighting of cue cards around the playhead.
//!
//! Each evaluation sets the active class on every card within the
//! highlight window and removes it everywhere else, including cards that
//! were active before the index was replaced. Classes are set, never
//! toggled, so evaluating twice at the same time changes nothing.

use std::collections::BTreeMap;

use crate::cue::{CueId, CuePoint, CuePointIndex};
use crate::dom::{CueDom, ElementHandle};

/// Cards that changed state during one evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightChange {
    pub activated: Vec<CueId>,
    pub deactivated: Vec<CueId>,
}

impl HighlightChange {
    pub fn is_empty(&self) -> bool {
        self.activated.is_empty() && self.deactivated.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct HighlightScheduler {
    threshold: f64,
    active_class: String,
    active: BTreeMap<CueId, ElementHandle>,
}

impl HighlightScheduler {
    pub fn new(threshold: f64, active_class: impl Into<String>) -> Self {
        Self {
            threshold,
            active_class: active_class.into(),
            active: BTreeMap::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Ids currently shown active.
    pub fn active_ids(&self) -> impl Iterator<Item = &CueId> {
        self.active.keys()
    }

    /// Bring card classes in line with the playhead at `time`.
    pub fn evaluate(
        &mut self,
        time: f64,
        index: &CuePointIndex,
        dom: &mut dyn CueDom,
    ) -> HighlightChange {
        let mut change = HighlightChange::default();
        let mut next = BTreeMap::new();

        for cue in index.iter() {
            let Some(handle) = resolve(cue, dom) else {
                continue;
            };
            let want = (time - cue.time).abs() < self.threshold;
            dom.set_class(handle, &self.active_class, want);
            if want {
                if !self.active.contains_key(&cue.id) {
                    change.activated.push(cue.id.clone());
                }
                next.insert(cue.id.clone(), handle);
            }
        }

        for (id, handle) in &self.active {
            if !next.contains_key(id) {
                dom.set_class(*handle, &self.active_class, false);
                change.deactivated.push(id.clone());
            }
        }

        self.active = next;
        change
    }

    /// Remove the active class from every card, known or previously shown.
    pub fn clear_all(&mut self, index: &CuePointIndex, dom: &mut dyn CueDom) {
        for cue in index.iter() {
            if let Some(handle) = resolve(cue, dom) {
                dom.set_class(handle, &self.active_class, false);
            }
        }
        for handle in self.active.values() {
            dom.set_class(*handle, &self.active_class, false);
        }
        self.active.clear();
    }

    /// Make `cue` the only active card. Returns its element, if it has one.
    pub fn select_only(
        &mut self,
        cue: &CuePoint,
        index: &CuePointIndex,
        dom: &mut dyn CueDom,
    ) -> Option<ElementHandle> {
        self.clear_all(index, dom);
        let handle = resolve(cue, dom)?;
        dom.set_class(handle, &self.active_class, true);
        self.active.insert(cue.id.clone(), handle);
        Some(handle)
    }

    /// Forget tracked state without touching the document.
    pub fn forget(&mut self) {
        self.active.clear();
    }
}

/// The card for a cue: its stored back-reference, else a lookup by id.
fn resolve(cue: &CuePoint, dom: &dyn CueDom) -> Option<ElementHandle> {
    cue.dom_ref.or_else(|| dom.element_by_id(cue.id.as_str()))
}
