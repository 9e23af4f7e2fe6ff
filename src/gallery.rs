//! Gallery category filter.
//!
//! Filter controls carry a `data-filter` tag and gallery items a
//! `data-category` tag. Selecting a control makes it the only active one and
//! shows exactly the items it matches. Newly shown items start transparent;
//! the caller schedules [`GalleryFilter::fade_in`] after a short delay to make
//! them opaque. Hidden items leave the layout immediately.

use crate::dom::{Document, ElementId};

pub const FILTER_CLASS: &str = "filter-btn";
pub const ITEM_CLASS: &str = "gallery-item";
pub const FILTER_ATTR: &str = "data-filter";
pub const CATEGORY_ATTR: &str = "data-category";
pub const ACTIVE_CLASS: &str = "active";

/// Whether an item in `category` is shown under `filter`.
pub fn matches(filter: &str, category: Option<&str>, all: &str) -> bool {
    filter == all || category == Some(filter)
}

#[derive(Debug, Clone)]
pub struct GalleryFilter {
    controls: Vec<ElementId>,
    items: Vec<ElementId>,
    all: String,
}

impl GalleryFilter {
    /// `None` unless the document has at least one control and one item.
    pub fn bind(doc: &dyn Document, all: &str) -> Option<Self> {
        let controls = doc.elements_by_class(None, FILTER_CLASS);
        let items = doc.elements_by_class(None, ITEM_CLASS);
        if controls.is_empty() || items.is_empty() {
            return None;
        }
        Some(Self {
            controls,
            items,
            all: all.to_string(),
        })
    }

    pub fn controls(&self) -> &[ElementId] {
        &self.controls
    }

    pub fn items(&self) -> &[ElementId] {
        &self.items
    }

    /// Activate the control at `index` and apply its filter. Returns the items
    /// now shown, which are waiting to fade in.
    pub fn select(&self, doc: &mut dyn Document, index: usize) -> Vec<ElementId> {
        let Some(&control) = self.controls.get(index) else {
            return Vec::new();
        };
        for other in &self.controls {
            doc.remove_class(*other, ACTIVE_CLASS);
        }
        doc.add_class(control, ACTIVE_CLASS);

        // A control without a tag matches nothing but "all"-tagged items.
        let filter = doc.attribute(control, FILTER_ATTR).unwrap_or_default();
        let mut shown = Vec::new();
        for item in &self.items {
            let category = doc.attribute(*item, CATEGORY_ATTR);
            if matches(&filter, category.as_deref(), &self.all) {
                doc.set_style(*item, "display", "block");
                doc.set_style(*item, "opacity", "0");
                shown.push(*item);
            } else {
                doc.set_style(*item, "display", "none");
            }
        }
        tracing::debug!(filter = %filter, shown = shown.len(), total = self.items.len(), "gallery filtered");
        shown
    }

    /// Finish the fade for items shown by an earlier [`select`](Self::select).
    pub fn fade_in(&self, doc: &mut dyn Document, items: &[ElementId]) {
        for item in items {
            doc.set_style(*item, "opacity", "1");
        }
    }
}
