//! Back-to-top control and in-page anchor scrolling.

use crate::dom::{Document, ElementId, ScrollBehavior};

pub const BACK_TO_TOP_ID: &str = "backToTop";
pub const VISIBLE_CLASS: &str = "show";

/// Shows a control once the page is scrolled past a threshold; clicking it
/// scrolls smoothly back to the top.
#[derive(Debug, Clone)]
pub struct BackToTop {
    button: ElementId,
    threshold: f64,
}

impl BackToTop {
    pub fn bind(doc: &dyn Document, threshold: f64) -> Option<Self> {
        let button = doc.element_by_id(BACK_TO_TOP_ID)?;
        Some(Self { button, threshold })
    }

    pub fn button(&self) -> ElementId {
        self.button
    }

    /// Recompute visibility from the current scroll offset.
    pub fn on_scroll(&self, doc: &mut dyn Document) {
        let visible = doc.scroll_y() > self.threshold;
        doc.toggle_class(self.button, VISIBLE_CLASS, visible);
    }

    pub fn on_click(&self, doc: &mut dyn Document) {
        doc.scroll_to(0.0, ScrollBehavior::Smooth);
    }
}

/// A link to a fragment in the same document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorLink {
    pub link: ElementId,
    /// Fragment without the leading `#`.
    pub fragment: String,
}

impl AnchorLink {
    /// Every `a` whose `href` is a fragment other than the bare `#`.
    pub fn bind_all(doc: &dyn Document) -> Vec<Self> {
        doc.elements_by_tag(None, &["a"])
            .into_iter()
            .filter_map(|link| {
                let href = doc.attribute(link, "href")?;
                let fragment = href.strip_prefix('#')?;
                if fragment.is_empty() {
                    return None;
                }
                Some(Self {
                    link,
                    fragment: fragment.to_string(),
                })
            })
            .collect()
    }

    /// Scroll the target into view. False when the fragment names no element.
    pub fn follow(&self, doc: &mut dyn Document) -> bool {
        match doc.element_by_id(&self.fragment) {
            Some(target) => {
                doc.scroll_into_view(target, ScrollBehavior::Smooth);
                true
            }
            None => false,
        }
    }
}
