//! Banner carousel.
//!
//! Drives an ordered set of slides and a matching set of indicators so that
//! exactly one of each carries the `active` class, the pair at
//! [`Carousel::current`]. Indices wrap in both directions.
//!
//! Auto-play is a single repeating timer. Starting it always cancels the
//! previous one first, so restarting from a control click resets the period
//! and no two ticks can ever be pending for one carousel.

use crate::dom::{Document, ElementId};
use crate::timer::{Scheduler, TimerId};
use std::time::Duration;

pub const CONTAINER_CLASS: &str = "banner-slider";
pub const SLIDE_CLASS: &str = "slide";
pub const INDICATOR_CLASS: &str = "slider-dot";
pub const ARROW_CLASS: &str = "slider-arrow";
pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone)]
pub struct Carousel {
    root: ElementId,
    slides: Vec<ElementId>,
    indicators: Vec<ElementId>,
    prev: Option<ElementId>,
    next: Option<ElementId>,
    current: usize,
    interval: Duration,
    timer: Option<TimerId>,
}

impl Carousel {
    /// Bind to the first carousel container in the document and mark slide 0
    /// active. `None` when there is no container or it holds no slides.
    pub fn bind(doc: &mut dyn Document, interval: Duration) -> Option<Self> {
        let root = doc.elements_by_class(None, CONTAINER_CLASS).into_iter().next()?;
        let slides = doc.elements_by_class(Some(root), SLIDE_CLASS);
        if slides.is_empty() {
            return None;
        }
        let indicators = doc.elements_by_class(Some(root), INDICATOR_CLASS);
        let arrows = doc.elements_by_class(Some(root), ARROW_CLASS);
        let prev = arrows.iter().copied().find(|a| doc.has_class(*a, "prev"));
        let next = arrows.iter().copied().find(|a| doc.has_class(*a, "next"));

        let mut carousel = Self {
            root,
            slides,
            indicators,
            prev,
            next,
            current: 0,
            interval,
            timer: None,
        };
        carousel.go_to(doc, 0);
        Some(carousel)
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn indicators(&self) -> &[ElementId] {
        &self.indicators
    }

    pub fn prev_control(&self) -> Option<ElementId> {
        self.prev
    }

    pub fn next_control(&self) -> Option<ElementId> {
        self.next
    }

    /// The pending auto-play timer, if auto-play is running.
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Show the slide at `index`, wrapped into range.
    pub fn go_to(&mut self, doc: &mut dyn Document, index: isize) {
        let count = self.slides.len() as isize;
        if count == 0 {
            return;
        }
        let index = index.rem_euclid(count) as usize;

        for slide in &self.slides {
            doc.remove_class(*slide, ACTIVE_CLASS);
        }
        for dot in &self.indicators {
            doc.remove_class(*dot, ACTIVE_CLASS);
        }
        doc.add_class(self.slides[index], ACTIVE_CLASS);
        if let Some(dot) = self.indicators.get(index) {
            doc.add_class(*dot, ACTIVE_CLASS);
        }

        tracing::trace!(from = self.current, to = index, "carousel slide");
        self.current = index;
    }

    pub fn next(&mut self, doc: &mut dyn Document) {
        self.go_to(doc, self.current as isize + 1);
    }

    pub fn prev(&mut self, doc: &mut dyn Document) {
        self.go_to(doc, self.current as isize - 1);
    }

    /// Cancel any running auto-play, then schedule a fresh one.
    pub fn start_auto_play(&mut self, timers: &mut dyn Scheduler) {
        self.stop_auto_play(timers);
        self.timer = Some(timers.set_interval(self.interval));
        tracing::trace!(interval_ms = self.interval.as_millis() as u64, "carousel auto-play started");
    }

    pub fn stop_auto_play(&mut self, timers: &mut dyn Scheduler) {
        if let Some(id) = self.timer.take() {
            timers.clear(id);
            tracing::trace!("carousel auto-play stopped");
        }
    }

    /// Advance if `id` is this carousel's auto-play timer.
    pub fn on_tick(&mut self, doc: &mut dyn Document, id: TimerId) -> bool {
        if self.timer != Some(id) {
            return false;
        }
        self.next(doc);
        true
    }
}
