//! Events and listener registration.
//!
//! A listener pairs an event kind and a target with an action value chosen by
//! whoever registered it. Registration returns a [`ListenerHandle`] which the
//! owner keeps for explicit removal at teardown.

use crate::dom::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Input,
    Submit,
    Scroll,
    PointerEnter,
    PointerLeave,
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Window,
    Element(ElementId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub target: Target,
}

impl Event {
    pub fn on(kind: EventKind, element: ElementId) -> Self {
        Self {
            kind,
            target: Target::Element(element),
        }
    }

    pub fn window(kind: EventKind) -> Self {
        Self {
            kind,
            target: Target::Window,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerHandle(u64);

#[derive(Debug, Clone)]
struct Listener<A> {
    handle: ListenerHandle,
    kind: EventKind,
    target: Target,
    action: A,
}

/// Listeners in registration order.
#[derive(Debug, Clone)]
pub struct Listeners<A> {
    next: u64,
    entries: Vec<Listener<A>>,
}

impl<A> Default for Listeners<A> {
    fn default() -> Self {
        Self {
            next: 0,
            entries: Vec::new(),
        }
    }
}

impl<A: Clone> Listeners<A> {
    pub fn add(&mut self, kind: EventKind, target: Target, action: A) -> ListenerHandle {
        self.next += 1;
        let handle = ListenerHandle(self.next);
        self.entries.push(Listener {
            handle,
            kind,
            target,
            action,
        });
        handle
    }

    pub fn remove(&mut self, handle: ListenerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|l| l.handle != handle);
        before != self.entries.len()
    }

    /// Actions registered for this event, in registration order.
    pub fn matching(&self, event: &Event) -> Vec<A> {
        self.entries
            .iter()
            .filter(|l| l.kind == event.kind && l.target == event.target)
            .map(|l| l.action.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn handles(&self) -> Vec<ListenerHandle> {
        self.entries.iter().map(|l| l.handle).collect()
    }
}
