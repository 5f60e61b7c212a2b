//! In-memory element tree standing in for the rendered page.
//!
//! Elements carry an id, a class set, optional text and a parent. Focus and
//! scroll-into-view calls are recorded so tests can assert on them.

use std::collections::BTreeSet;

use crate::dom::{ContainerPath, CueDom, ElementHandle, MarkerElement};

#[derive(Debug, Clone)]
struct Node {
    handle: ElementHandle,
    id: String,
    parent: Option<ElementHandle>,
    classes: BTreeSet<String>,
    text: Option<String>,
}

/// A flat element tree in document order.
#[derive(Debug, Clone, Default)]
pub struct HeadlessDom {
    nodes: Vec<Node>,
    next_handle: u64,
    focused: Option<ElementHandle>,
    centered: Vec<ElementHandle>,
}

impl HeadlessDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element under `parent_id` (or at the root).
    ///
    /// Returns `None` when the parent does not exist.
    pub fn append(
        &mut self,
        parent_id: Option<&str>,
        id: impl Into<String>,
        classes: &[&str],
        text: Option<&str>,
    ) -> Option<ElementHandle> {
        let parent = match parent_id {
            Some(pid) => Some(self.element_by_id(pid)?),
            None => None,
        };
        let handle = ElementHandle(self.next_handle);
        self.next_handle += 1;
        self.nodes.push(Node {
            handle,
            id: id.into(),
            parent,
            classes: classes.iter().map(|c| c.to_string()).collect(),
            text: text.map(str::to_string),
        });
        Some(handle)
    }

    /// Build the nested container path, creating missing segments.
    pub fn ensure_path(&mut self, path: &ContainerPath) {
        let mut parent: Option<String> = None;
        for segment in path.segments() {
            if self.element_by_id(segment).is_none() {
                self.append(parent.as_deref(), segment.clone(), &[], None);
            }
            parent = Some(segment.clone());
        }
    }

    /// Render one card per cue inside `container_id`, as the cue panel does:
    /// the element id carries the time and the text carries the label.
    pub fn add_cue_cards<'a, I>(&mut self, container_id: &str, marker_class: &str, cues: I)
    where
        I: IntoIterator<Item = (f64, &'a str)>,
    {
        for (time, label) in cues {
            self.append(
                Some(container_id),
                format!("{:?}", time),
                &[marker_class],
                Some(label),
            );
        }
    }

    /// Remove an element and everything below it.
    pub fn remove(&mut self, id: &str) {
        let Some(root) = self.element_by_id(id) else {
            return;
        };
        let doomed: BTreeSet<ElementHandle> = self
            .nodes
            .iter()
            .filter(|n| self.is_within(n.handle, root))
            .map(|n| n.handle)
            .collect();
        self.nodes.retain(|n| !doomed.contains(&n.handle));
        if self.focused.is_some_and(|f| doomed.contains(&f)) {
            self.focused = None;
        }
    }

    pub fn has_class(&self, handle: ElementHandle, class: &str) -> bool {
        self.node(handle).is_some_and(|n| n.classes.contains(class))
    }

    /// Ids of all elements carrying `class`, in document order.
    pub fn ids_with_class(&self, class: &str) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|n| n.classes.contains(class))
            .map(|n| n.id.clone())
            .collect()
    }

    pub fn focused(&self) -> Option<ElementHandle> {
        self.focused
    }

    /// Every element that was scrolled to the centre, oldest first.
    pub fn centered(&self) -> &[ElementHandle] {
        &self.centered
    }

    fn node(&self, handle: ElementHandle) -> Option<&Node> {
        self.nodes.iter().find(|n| n.handle == handle)
    }

    /// True if `handle` is `ancestor` or nested somewhere below it.
    fn is_within(&self, handle: ElementHandle, ancestor: ElementHandle) -> bool {
        let mut current = Some(handle);
        while let Some(h) = current {
            if h == ancestor {
                return true;
            }
            current = self.node(h).and_then(|n| n.parent);
        }
        false
    }
}

impl CueDom for HeadlessDom {
    fn container_exists(&self, path: &ContainerPath) -> bool {
        let mut outer: Option<ElementHandle> = None;
        for segment in path.segments() {
            let found = self.nodes.iter().find(|n| {
                &n.id == segment && outer.map_or(true, |o| n.handle != o && self.is_within(n.handle, o))
            });
            match found {
                Some(node) => outer = Some(node.handle),
                None => return false,
            }
        }
        !path.is_empty()
    }

    fn marker_elements(&self, container_id: &str, marker_class: &str) -> Vec<MarkerElement> {
        let Some(container) = self.element_by_id(container_id) else {
            return Vec::new();
        };
        self.nodes
            .iter()
            .filter(|n| n.handle != container && self.is_within(n.handle, container))
            .filter(|n| n.classes.contains(marker_class))
            .map(|n| MarkerElement {
                id: n.id.clone(),
                text: n.text.clone(),
                handle: n.handle,
            })
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<ElementHandle> {
        self.nodes.iter().find(|n| n.id == id).map(|n| n.handle)
    }

    fn set_class(&mut self, handle: ElementHandle, class: &str, present: bool) {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.handle == handle) {
            if present {
                node.classes.insert(class.to_string());
            } else {
                node.classes.remove(class);
            }
        }
    }

    fn focus_centered(&mut self, handle: ElementHandle) {
        if self.node(handle).is_some() {
            self.centered.push(handle);
            self.focused = Some(handle);
        }
    }
}
