//! A page running against the in-memory document and a virtual clock.
//!
//! [`Session`] plays the host: it owns the [`MemoryDocument`], the
//! [`VirtualClock`] and the [`Page`], turns user gestures into events, and
//! fires timers as time is advanced. It is what the `simulate` command and the
//! behavior tests drive.

use crate::config::SiteConfig;
use crate::dom::{Document, ElementId, MemoryDocument};
use crate::events::{Event, EventKind};
use crate::forms::ERROR_CLASS;
use crate::page::{Dispatch, Page};
use crate::scroll::VISIBLE_CLASS;
use crate::timer::{VirtualClock, millis};
use serde::Serialize;
use std::time::Duration;

/// Observable page state at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub now_ms: u64,
    pub active_slide: Option<usize>,
    pub auto_play: bool,
    pub scroll_y: f64,
    pub back_to_top_visible: bool,
    /// `(error element id, message)` for every visible field error.
    pub errors: Vec<(String, String)>,
    /// Indices of displayed gallery items.
    pub gallery_shown: Vec<usize>,
    pub alerts: Vec<String>,
    pub location: Option<String>,
}

#[derive(Debug)]
pub struct Session {
    doc: MemoryDocument,
    clock: VirtualClock,
    page: Page,
    torn_down: bool,
}

impl Session {
    /// Run page setup against `doc`.
    pub fn new(mut doc: MemoryDocument, config: &SiteConfig) -> Self {
        let mut clock = VirtualClock::new();
        let page = Page::setup(&mut doc, &mut clock, config);
        Self {
            doc,
            clock,
            page,
            torn_down: false,
        }
    }

    pub fn doc(&self) -> &MemoryDocument {
        &self.doc
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn clock(&self) -> &VirtualClock {
        &self.clock
    }

    /// Deliver `event` to the page's listeners.
    pub fn dispatch(&mut self, event: Event) -> Dispatch {
        if self.torn_down {
            return Dispatch::default();
        }
        self.page.dispatch(&mut self.doc, &mut self.clock, event)
    }

    /// Click an element. A click that moves the viewport also delivers the
    /// resulting window scroll.
    pub fn click(&mut self, element: ElementId) -> Dispatch {
        let before = self.doc.scroll_y();
        let outcome = self.dispatch(Event::on(EventKind::Click, element));
        if self.doc.scroll_y() != before {
            self.dispatch(Event::window(EventKind::Scroll));
        }
        outcome
    }

    /// Replace a control's value and deliver the input event.
    pub fn type_into(&mut self, element: ElementId, text: &str) -> Dispatch {
        self.doc.set_value(element, text);
        self.dispatch(Event::on(EventKind::Input, element))
    }

    pub fn submit(&mut self, form: ElementId) -> Dispatch {
        self.dispatch(Event::on(EventKind::Submit, form))
    }

    /// Move the viewport and deliver the window scroll.
    pub fn scroll_to(&mut self, y: f64) -> Dispatch {
        self.doc.set_scroll_y(y);
        self.dispatch(Event::window(EventKind::Scroll))
    }

    pub fn pointer_enter(&mut self, element: ElementId) -> Dispatch {
        self.dispatch(Event::on(EventKind::PointerEnter, element))
    }

    pub fn pointer_leave(&mut self, element: ElementId) -> Dispatch {
        self.dispatch(Event::on(EventKind::PointerLeave, element))
    }

    /// Advance the clock, firing every timer that falls due in order.
    /// Returns the number of timers fired. The clock stops at `u64::MAX`
    /// milliseconds. A running interval fires once per period, so callers
    /// taking `by` from outside bound it first.
    pub fn advance(&mut self, by: Duration) -> usize {
        let target = self.clock.now_ms().saturating_add(millis(by));
        let mut fired = 0;
        while let Some(id) = self.clock.next_due(target) {
            if self.page.on_timer(&mut self.doc, id) {
                fired += 1;
            } else {
                tracing::trace!(timer = id.0, "timer fired with no owner");
            }
        }
        self.clock.set_now(target);
        fired
    }

    /// Remove every listener and cancel every timer. Later gestures are
    /// ignored.
    pub fn teardown(&mut self) -> usize {
        if self.torn_down {
            return 0;
        }
        self.torn_down = true;
        self.page.teardown(&mut self.clock)
    }

    pub fn snapshot(&self) -> Snapshot {
        let doc = &self.doc;
        let carousel = self.page.carousel();
        let errors = doc
            .elements_by_class(None, ERROR_CLASS)
            .into_iter()
            .filter(|el| doc.is_displayed(*el) && !doc.text(*el).is_empty())
            .map(|el| (doc.dom_id(el).unwrap_or_default(), doc.text(el)))
            .collect();
        let gallery_shown = self
            .page
            .gallery()
            .map(|g| {
                g.items()
                    .iter()
                    .enumerate()
                    .filter(|(_, item)| doc.is_displayed(**item))
                    .map(|(i, _)| i)
                    .collect()
            })
            .unwrap_or_default();

        Snapshot {
            now_ms: self.clock.now_ms(),
            active_slide: carousel.map(|c| c.current()),
            auto_play: carousel.is_some_and(|c| c.timer().is_some()),
            scroll_y: doc.scroll_y(),
            back_to_top_visible: self
                .page
                .back_to_top()
                .is_some_and(|b| doc.has_class(b.button(), VISIBLE_CLASS)),
            errors,
            gallery_shown,
            alerts: doc.alerts().to_vec(),
            location: doc.location().map(str::to_string),
        }
    }
}
