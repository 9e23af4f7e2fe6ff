//! Shared test utilities for the kiln-ui test suite.
//!
//! Provides a ready-made session over the sample site and lookup helpers that
//! panic with the available candidates when an element is missing.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut session = sample_session();
//! let next = nth_by_class(&session, "slider-arrow", 1);
//! session.click(next);
//! assert_eq!(session.snapshot().active_slide, Some(1));
//! ```

use crate::config::SiteConfig;
use crate::content::{SiteContent, build_document};
use crate::dom::{Document, ElementId};
use crate::session::Session;

// =========================================================================
// Fixture setup
// =========================================================================

/// Session over the sample site with stock configuration.
pub fn sample_session() -> Session {
    let config = SiteConfig::default();
    Session::new(build_document(&SiteContent::default(), &config), &config)
}

// =========================================================================
// Element lookups: panic with a clear message on miss
// =========================================================================

/// Find an element by id. Panics if not found.
pub fn by_id(session: &Session, id: &str) -> ElementId {
    let doc = session.doc();
    doc.element_by_id(id).unwrap_or_else(|| {
        let ids: Vec<String> = doc
            .descendants(doc.root())
            .into_iter()
            .filter_map(|el| doc.dom_id(el))
            .collect();
        panic!("element '#{id}' not found. Available: {ids:?}")
    })
}

/// The `n`th element carrying `class`, in document order. Panics if missing.
pub fn nth_by_class(session: &Session, class: &str, n: usize) -> ElementId {
    let found = session.doc().elements_by_class(None, class);
    match found.get(n) {
        Some(el) => *el,
        None => panic!(
            "'.{class}' #{n} not found. Document has {} such elements",
            found.len()
        ),
    }
}

/// Type each `(id, value)` pair into its control.
pub fn fill(session: &mut Session, pairs: &[(&str, &str)]) {
    for (id, value) in pairs {
        let el = by_id(session, id);
        session.type_into(el, value);
    }
}

/// Message currently shown for `field`, or `""`.
pub fn error_for(session: &Session, field: &str) -> String {
    let id = crate::validate::error_id_for(field);
    session
        .snapshot()
        .errors
        .into_iter()
        .find(|(error_id, _)| *error_id == id)
        .map(|(_, message)| message)
        .unwrap_or_default()
}
