//! Page-level wiring.
//!
//! [`Page::setup`] runs once when the page structure is available. It binds
//! every controller whose markup exists, registers one listener per
//! interaction, and starts carousel auto-play. Controllers whose markup is
//! missing are simply absent; nothing else depends on them.
//!
//! The host forwards events to [`Page::dispatch`] and fired timers to
//! [`Page::on_timer`]. [`Page::teardown`] removes every listener through its
//! retained handle and cancels every pending timer.

use crate::carousel::Carousel;
use crate::config::SiteConfig;
use crate::dom::{Document, ElementId};
use crate::events::{Event, EventKind, ListenerHandle, Listeners, Target};
use crate::forms::{FormController, Submission};
use crate::gallery::GalleryFilter;
use crate::scroll::{AnchorLink, BackToTop};
use crate::timer::{Scheduler, TimerId};
use crate::validate::FormKind;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    SlidePrev,
    SlideNext,
    SlideTo(usize),
    PauseAutoPlay,
    ResumeAutoPlay,
    RevealBackToTop,
    ScrollToTop,
    Submit(usize),
    ClearFieldError(usize),
    Filter(usize),
    FollowAnchor(usize),
}

/// What a dispatched event did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Listeners that ran.
    pub handled: usize,
    /// The host must skip the event's default action (form post, link jump).
    pub default_prevented: bool,
    pub submissions: Vec<(FormKind, Submission)>,
}

#[derive(Debug)]
pub struct Page {
    carousel: Option<Carousel>,
    back_to_top: Option<BackToTop>,
    forms: Vec<FormController>,
    gallery: Option<GalleryFilter>,
    anchors: Vec<AnchorLink>,
    listeners: Listeners<Action>,
    fades: BTreeMap<TimerId, Vec<ElementId>>,
    fade_delay: Duration,
}

impl Page {
    pub fn setup(doc: &mut dyn Document, timers: &mut dyn Scheduler, config: &SiteConfig) -> Self {
        let mut page = Page {
            carousel: Carousel::bind(&mut *doc, config.carousel.interval()),
            back_to_top: BackToTop::bind(doc, config.back_to_top.threshold),
            forms: FormKind::ALL
                .iter()
                .filter_map(|kind| FormController::bind(&*doc, *kind, &config.forms))
                .collect(),
            gallery: GalleryFilter::bind(doc, &config.gallery.all_category),
            anchors: AnchorLink::bind_all(doc),
            listeners: Listeners::default(),
            fades: BTreeMap::new(),
            fade_delay: config.gallery.fade_delay(),
        };
        page.register_listeners();

        if let Some(carousel) = &mut page.carousel {
            carousel.start_auto_play(timers);
        }

        tracing::debug!(
            carousel = page.carousel.is_some(),
            back_to_top = page.back_to_top.is_some(),
            forms = page.forms.len(),
            gallery = page.gallery.is_some(),
            anchors = page.anchors.len(),
            listeners = page.listeners.len(),
            "page setup complete"
        );
        page
    }

    fn register_listeners(&mut self) {
        use EventKind::*;
        let listeners = &mut self.listeners;

        if let Some(carousel) = &self.carousel {
            if let Some(prev) = carousel.prev_control() {
                listeners.add(Click, Target::Element(prev), Action::SlidePrev);
            }
            if let Some(next) = carousel.next_control() {
                listeners.add(Click, Target::Element(next), Action::SlideNext);
            }
            for (i, dot) in carousel.indicators().iter().enumerate() {
                listeners.add(Click, Target::Element(*dot), Action::SlideTo(i));
            }
            let root = Target::Element(carousel.root());
            listeners.add(PointerEnter, root, Action::PauseAutoPlay);
            listeners.add(PointerLeave, root, Action::ResumeAutoPlay);
        }

        if let Some(control) = &self.back_to_top {
            listeners.add(Scroll, Target::Window, Action::RevealBackToTop);
            listeners.add(Click, Target::Element(control.button()), Action::ScrollToTop);
        }

        for (i, form) in self.forms.iter().enumerate() {
            listeners.add(Submit, Target::Element(form.form()), Action::Submit(i));
            for field in form.fields() {
                listeners.add(Input, Target::Element(*field), Action::ClearFieldError(i));
            }
        }

        if let Some(gallery) = &self.gallery {
            for (i, control) in gallery.controls().iter().enumerate() {
                listeners.add(Click, Target::Element(*control), Action::Filter(i));
            }
        }

        for (i, anchor) in self.anchors.iter().enumerate() {
            listeners.add(Click, Target::Element(anchor.link), Action::FollowAnchor(i));
        }
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    pub fn back_to_top(&self) -> Option<&BackToTop> {
        self.back_to_top.as_ref()
    }

    pub fn form(&self, kind: FormKind) -> Option<&FormController> {
        self.forms.iter().find(|f| f.kind() == kind)
    }

    pub fn gallery(&self) -> Option<&GalleryFilter> {
        self.gallery.as_ref()
    }

    pub fn anchors(&self) -> &[AnchorLink] {
        &self.anchors
    }

    /// Handles of every registered listener.
    pub fn listener_handles(&self) -> Vec<ListenerHandle> {
        self.listeners.handles()
    }

    /// Fade-in timeouts not yet fired.
    pub fn pending_fades(&self) -> usize {
        self.fades.len()
    }

    pub fn dispatch(
        &mut self,
        doc: &mut dyn Document,
        timers: &mut dyn Scheduler,
        event: Event,
    ) -> Dispatch {
        let mut outcome = Dispatch::default();
        for action in self.listeners.matching(&event) {
            outcome.handled += 1;
            self.run(doc, timers, action, event, &mut outcome);
        }
        outcome
    }

    fn run(
        &mut self,
        doc: &mut dyn Document,
        timers: &mut dyn Scheduler,
        action: Action,
        event: Event,
        outcome: &mut Dispatch,
    ) {
        match action {
            Action::SlidePrev | Action::SlideNext | Action::SlideTo(_) => {
                if let Some(carousel) = &mut self.carousel {
                    match action {
                        Action::SlidePrev => carousel.prev(doc),
                        Action::SlideTo(i) => carousel.go_to(doc, i as isize),
                        _ => carousel.next(doc),
                    }
                    carousel.start_auto_play(timers);
                }
            }
            Action::PauseAutoPlay => {
                if let Some(carousel) = &mut self.carousel {
                    carousel.stop_auto_play(timers);
                }
            }
            Action::ResumeAutoPlay => {
                if let Some(carousel) = &mut self.carousel {
                    carousel.start_auto_play(timers);
                }
            }
            Action::RevealBackToTop => {
                if let Some(control) = &self.back_to_top {
                    control.on_scroll(doc);
                }
            }
            Action::ScrollToTop => {
                if let Some(control) = &self.back_to_top {
                    control.on_click(doc);
                }
            }
            Action::Submit(i) => {
                outcome.default_prevented = true;
                let form = &self.forms[i];
                let submission = form.submit(doc);
                outcome.submissions.push((form.kind(), submission));
            }
            Action::ClearFieldError(i) => {
                if let Target::Element(field) = event.target {
                    self.forms[i].on_input(doc, field);
                }
            }
            Action::Filter(i) => {
                if let Some(gallery) = &self.gallery {
                    let shown = gallery.select(doc, i);
                    if !shown.is_empty() {
                        let id = timers.set_timeout(self.fade_delay);
                        self.fades.insert(id, shown);
                    }
                }
            }
            Action::FollowAnchor(i) => {
                outcome.default_prevented = true;
                self.anchors[i].follow(doc);
            }
        }
    }

    /// Route a fired timer. False when the timer does not belong to this page.
    pub fn on_timer(&mut self, doc: &mut dyn Document, id: TimerId) -> bool {
        if let Some(carousel) = &mut self.carousel {
            if carousel.on_tick(doc, id) {
                return true;
            }
        }
        match (self.fades.remove(&id), &self.gallery) {
            (Some(items), Some(gallery)) => {
                gallery.fade_in(doc, &items);
                true
            }
            _ => false,
        }
    }

    /// Remove every listener and cancel every timer. Returns the number of
    /// listeners removed.
    pub fn teardown(&mut self, timers: &mut dyn Scheduler) -> usize {
        if let Some(carousel) = &mut self.carousel {
            carousel.stop_auto_play(timers);
        }
        for id in std::mem::take(&mut self.fades).into_keys() {
            timers.clear(id);
        }
        let handles = self.listeners.handles();
        let removed = handles
            .into_iter()
            .filter(|h| self.listeners.remove(*h))
            .count();
        tracing::debug!(listeners = removed, "page torn down");
        removed
    }
}
