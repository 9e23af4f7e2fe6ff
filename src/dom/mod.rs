//! Host document abstraction.
//!
//! Controllers never own the page. They hold [`ElementId`] handles resolved once
//! at setup and talk to the host through the [`Document`] trait: tree queries,
//! class and style mutation, control values, and the handful of window-level
//! effects the page needs (scrolling, alerts, navigation).
//!
//! [`memory::MemoryDocument`] is the in-process implementation used by the CLI
//! and the test suite. A browser binding implements the same trait over its
//! native element handles.

pub mod memory;

pub use memory::MemoryDocument;

/// Opaque handle to an element in a host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// How a scroll request should be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

pub trait Document {
    // -- tree queries --------------------------------------------------------

    /// Element whose `id` attribute equals `id`.
    fn element_by_id(&self, id: &str) -> Option<ElementId>;

    /// Descendants of `scope` (or of the whole document) carrying `class`, in document order.
    fn elements_by_class(&self, scope: Option<ElementId>, class: &str) -> Vec<ElementId>;

    /// Descendants of `scope` (or of the whole document) whose tag is one of `tags`, in document order.
    fn elements_by_tag(&self, scope: Option<ElementId>, tags: &[&str]) -> Vec<ElementId>;

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    // -- classes, styles, text -----------------------------------------------

    fn has_class(&self, element: ElementId, class: &str) -> bool;
    fn add_class(&mut self, element: ElementId, class: &str);
    fn remove_class(&mut self, element: ElementId, class: &str);

    fn style(&self, element: ElementId, property: &str) -> Option<String>;
    fn set_style(&mut self, element: ElementId, property: &str, value: &str);

    fn text(&self, element: ElementId) -> String;
    fn set_text(&mut self, element: ElementId, text: &str);

    // -- form controls -------------------------------------------------------

    /// Current value of an `input`/`textarea`. Empty for anything else.
    fn value(&self, element: ElementId) -> String;
    fn set_value(&mut self, element: ElementId, value: &str);

    /// Restore every control inside `form` to its initial value.
    fn reset_form(&mut self, form: ElementId);

    // -- window --------------------------------------------------------------

    /// Vertical scroll offset of the viewport, in CSS pixels.
    fn scroll_y(&self) -> f64;
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);
    fn scroll_into_view(&mut self, element: ElementId, behavior: ScrollBehavior);
    fn alert(&mut self, message: &str);
    fn navigate(&mut self, href: &str);

    /// The element's `id` attribute, if any.
    fn dom_id(&self, element: ElementId) -> Option<String> {
        self.attribute(element, "id")
    }

    /// Add or remove `class` depending on `on`.
    fn toggle_class(&mut self, element: ElementId, class: &str, on: bool) {
        if on {
            self.add_class(element, class);
        } else {
            self.remove_class(element, class);
        }
    }
}
