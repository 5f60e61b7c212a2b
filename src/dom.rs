//! Document seam: the rendered page the cue cards live in.
//!
//! The engine never owns elements. It holds `ElementHandle`s as
//! back-references and only uses them to toggle the active class and to
//! bring a card into view.

use std::fmt;

/// Opaque, non-owning reference to a rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementHandle(pub u64);

/// A marker-tagged element found while scanning a container.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerElement {
    /// The element's id attribute (the cue card writes its time here)
    pub id: String,
    /// Visible text of the card, if any
    pub text: Option<String>,
    pub handle: ElementHandle,
}

/// Nested element ids, outermost first (`CardMouth` > `CuePointsArea`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerPath(Vec<String>);

impl ContainerPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ContainerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" > "))
    }
}

/// Operations the engine needs from the rendered document.
///
/// Implemented by the browser host and by [`crate::headless::HeadlessDom`].
pub trait CueDom {
    /// True once every segment of `path` exists, each nested in the previous.
    fn container_exists(&self, path: &ContainerPath) -> bool;

    /// All elements carrying `marker_class` inside `container_id`, in
    /// document order. Empty when the container is absent.
    fn marker_elements(&self, container_id: &str, marker_class: &str) -> Vec<MarkerElement>;

    /// Look up an element by its id attribute.
    fn element_by_id(&self, id: &str) -> Option<ElementHandle>;

    /// Add (`true`) or remove (`false`) `class` on the element. Setting a
    /// class that is already present is a no-op.
    fn set_class(&mut self, handle: ElementHandle, class: &str, present: bool);

    /// Scroll the element to the centre of its scroll area and give it
    /// keyboard focus.
    fn focus_centered(&mut self, handle: ElementHandle);
}
