//! # Kiln UI
//!
//! The interactive behavior of a static ceramics showcase page: a banner
//! carousel with auto-play, a back-to-top control, smooth in-page anchors,
//! client-side validation for the contact, login and registration forms, and
//! a category filter over the works gallery.
//!
//! # Architecture: Controllers Over a Document Seam
//!
//! Nothing in the behavior core touches a browser. Controllers read and mutate
//! the page through the [`dom::Document`] trait and ask for timers through
//! [`timer::Scheduler`]. A host forwards events and fired timers to
//! [`page::Page`]:
//!
//! ```text
//! host event ──▶ Page::dispatch ──▶ listener registry ──▶ controller ──▶ Document
//! timer fires ─▶ Page::on_timer ──▶ carousel tick / gallery fade
//! ```
//!
//! The crate ships one host, [`session::Session`], which runs a page over the
//! in-memory [`dom::MemoryDocument`] and a deterministic [`timer::VirtualClock`].
//! The CLI's `simulate` command and the behavior tests drive it.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`dom`] | Document abstraction and the in-memory arena document |
//! | [`timer`] | Cancelable interval/timeout scheduling and the virtual clock |
//! | [`events`] | Event kinds, targets and the listener registry with removable handles |
//! | [`carousel`] | Slide rotation, indicators, arrows and auto-play |
//! | [`scroll`] | Back-to-top visibility and smooth anchor scrolling |
//! | [`validate`] | Field rules, mobile/email checks and the rule set of each form |
//! | [`forms`] | Submit interception, error display, success actions |
//! | [`gallery`] | Category filter with delayed fade-in |
//! | [`page`] | Setup, event routing and teardown for the whole page |
//! | [`session`] | In-memory host: gestures, time advance, state snapshots |
//! | [`script`] | JSON interaction scripts replayed against a session |
//! | [`content`] | Site content model and the page structure built from it |
//! | [`render`] | Static HTML rendering of the page using Maud |
//! | [`config`] | Layered `config.toml` loading and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Explicit Timer Handles
//!
//! Every interval and timeout is identified by a [`timer::TimerId`] that its
//! owner keeps. Restarting auto-play always clears the previous interval
//! first, so at most one is ever pending, however often the controls are
//! used.
//!
//! ## Rules as Data
//!
//! Form validation is a table of [`validate::Rule`]s per field rather than
//! hand-written branches. The first failing rule of a field supplies its
//! message; fields are independent, so every invalid field is reported at
//! once.
//!
//! ## Missing Markup Is Not an Error
//!
//! Each controller binds only when its markup exists. A page without a
//! carousel, gallery or form simply skips that behavior.

pub mod carousel;
pub mod config;
pub mod content;
pub mod dom;
pub mod events;
pub mod forms;
pub mod gallery;
pub mod output;
pub mod page;
pub mod render;
pub mod script;
pub mod scroll;
pub mod session;
pub mod timer;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
