//! Page behavior tests: drives the sample page through a `Session` the way a
//! visitor would and checks what they would see.
//!
//! Run with: `cargo test --test page_behavior`

use kiln_ui::config::SiteConfig;
use kiln_ui::content::{SiteContent, build_document};
use kiln_ui::dom::{Document, ElementId};
use kiln_ui::session::Session;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn session() -> Session {
    let config = SiteConfig::default();
    Session::new(build_document(&SiteContent::default(), &config), &config)
}

fn id(s: &Session, id: &str) -> ElementId {
    s.doc()
        .element_by_id(id)
        .unwrap_or_else(|| panic!("no element #{id}"))
}

fn nth(s: &Session, class: &str, n: usize) -> ElementId {
    s.doc().elements_by_class(None, class)[n]
}

fn fill(s: &mut Session, pairs: &[(&str, &str)]) {
    for (field, value) in pairs {
        let el = id(s, field);
        s.type_into(el, value);
    }
}

fn submit(s: &mut Session, form: &str) -> bool {
    let el = id(s, form);
    let outcome = s.submit(el);
    assert!(outcome.default_prevented, "submit must never post");
    outcome.submissions.iter().all(|(_, sub)| sub.is_accepted())
}

fn error(s: &Session, field: &str) -> String {
    let error_id = format!("{field}Error");
    s.snapshot()
        .errors
        .into_iter()
        .find(|(id, _)| *id == error_id)
        .map(|(_, message)| message)
        .unwrap_or_default()
}

fn active_classes(s: &Session, class: &str) -> Vec<bool> {
    s.doc()
        .elements_by_class(None, class)
        .into_iter()
        .map(|el| s.doc().has_class(el, "active"))
        .collect()
}

// ---------------------------------------------------------------------------
// Carousel
// ---------------------------------------------------------------------------

#[test]
fn next_on_last_slide_wraps_to_first() {
    let mut s = session();
    let last = nth(&s, "slider-dot", 2);
    s.click(last);
    let next = nth(&s, "slider-arrow", 1);
    s.click(next);
    assert_eq!(s.snapshot().active_slide, Some(0));
    assert_eq!(active_classes(&s, "slide"), vec![true, false, false]);
    assert_eq!(active_classes(&s, "slider-dot"), vec![true, false, false]);
}

#[test]
fn prev_on_first_slide_wraps_to_last() {
    let mut s = session();
    let prev = nth(&s, "slider-arrow", 0);
    s.click(prev);
    assert_eq!(s.snapshot().active_slide, Some(2));
}

#[test]
fn repeated_restarts_leave_one_interval() {
    let mut s = session();
    let next = nth(&s, "slider-arrow", 1);
    let slider = nth(&s, "banner-slider", 0);
    for _ in 0..5 {
        s.click(next);
        s.pointer_leave(slider);
    }
    assert_eq!(s.clock().pending().len(), 1);

    // One advance per period, not several.
    let before = s.snapshot().active_slide;
    s.advance(Duration::from_millis(5000));
    let after = s.snapshot().active_slide;
    assert_eq!(after, before.map(|i| (i + 1) % 3));
}

// ---------------------------------------------------------------------------
// Back to top
// ---------------------------------------------------------------------------

#[test]
fn back_to_top_appears_past_threshold() {
    let mut s = session();
    s.scroll_to(300.0);
    assert!(!s.snapshot().back_to_top_visible);
    s.scroll_to(301.0);
    assert!(s.snapshot().back_to_top_visible);
}

#[test]
fn anchor_click_scrolls_to_section() {
    let mut s = session();
    let works = s
        .doc()
        .elements_by_tag(None, &["a"])
        .into_iter()
        .find(|a| s.doc().attribute(*a, "href").as_deref() == Some("#gallery"))
        .unwrap();
    let outcome = s.click(works);
    assert!(outcome.default_prevented);
    assert_eq!(s.doc().scroll_requests().len(), 1);
}

// ---------------------------------------------------------------------------
// Contact form
// ---------------------------------------------------------------------------

#[test]
fn phone_number_shapes() {
    let cases = [
        ("13812345678", ""),
        ("12812345678", "Please enter a valid mobile number"),
        ("1381234567", "Please enter a valid mobile number"),
        ("", "Please enter your phone number"),
    ];
    for (phone, expected) in cases {
        let mut s = session();
        fill(
            &mut s,
            &[
                ("name", "Li Wei"),
                ("phone", phone),
                ("subject", "Order"),
                ("message", "I would like two bowls please."),
            ],
        );
        submit(&mut s, "contactForm");
        assert_eq!(error(&s, "phone"), expected, "phone={phone:?}");
    }
}

#[test]
fn contact_success_acknowledges_and_clears_fields() {
    let mut s = session();
    fill(
        &mut s,
        &[
            ("name", "Li Wei"),
            ("phone", "13912345678"),
            ("email", "li@example.com"),
            ("subject", "Studio visit"),
            ("message", "Can I visit the kiln next week?"),
        ],
    );
    assert!(submit(&mut s, "contactForm"));
    let state = s.snapshot();
    assert_eq!(state.alerts.len(), 1);
    assert!(state.errors.is_empty());
    for field in ["name", "phone", "email", "subject", "message"] {
        let el = id(&s, field);
        assert_eq!(s.doc().value(el), "", "{field} not cleared");
    }
}

#[test]
fn every_invalid_field_reported_at_once() {
    let mut s = session();
    fill(&mut s, &[("email", "not-an-email")]);
    assert!(!submit(&mut s, "contactForm"));
    let fields: Vec<String> = s.snapshot().errors.into_iter().map(|(id, _)| id).collect();
    assert_eq!(
        fields,
        vec!["nameError", "phoneError", "emailError", "subjectError", "messageError"]
    );
}

#[test]
fn typing_clears_only_that_fields_error() {
    let mut s = session();
    submit(&mut s, "contactForm");
    let name = id(&s, "name");
    s.type_into(name, "L");
    assert_eq!(error(&s, "name"), "");
    assert_eq!(error(&s, "phone"), "Please enter your phone number");
}

// ---------------------------------------------------------------------------
// Login and registration
// ---------------------------------------------------------------------------

#[test]
fn login_requires_both_fields() {
    let mut s = session();
    fill(&mut s, &[("username", "guest")]);
    assert!(!submit(&mut s, "loginForm"));
    assert_eq!(error(&s, "username"), "");
    assert_eq!(error(&s, "password"), "Please enter your password");
}

#[test]
fn register_short_password_rejected() {
    let mut s = session();
    fill(
        &mut s,
        &[
            ("regUsername", "potter"),
            ("regPhone", "13812345678"),
            ("regPassword", "abc12"),
            ("regConfirmPassword", "abc12"),
        ],
    );
    assert!(!submit(&mut s, "registerForm"));
    assert_eq!(error(&s, "regPassword"), "Password must be 6-20 characters");
    assert_eq!(s.snapshot().location, None);
}

#[test]
fn register_mismatch_rejected() {
    let mut s = session();
    fill(
        &mut s,
        &[
            ("regUsername", "potter"),
            ("regPhone", "13812345678"),
            ("regPassword", "abc123"),
            ("regConfirmPassword", "abc124"),
        ],
    );
    assert!(!submit(&mut s, "registerForm"));
    assert_eq!(error(&s, "regConfirmPassword"), "The passwords do not match");
}

#[test]
fn register_success_navigates_to_login() {
    let mut s = session();
    fill(
        &mut s,
        &[
            ("regUsername", "potter"),
            ("regPhone", "13812345678"),
            ("regPassword", "abc123"),
            ("regConfirmPassword", "abc123"),
        ],
    );
    assert!(submit(&mut s, "registerForm"));
    assert_eq!(s.snapshot().location.as_deref(), Some("login.html"));
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

#[test]
fn category_filter_then_all() {
    let mut s = session();
    let ceramics = nth(&s, "filter-btn", 1);
    s.click(ceramics);
    assert_eq!(s.snapshot().gallery_shown, vec![0, 1]);
    assert_eq!(active_classes(&s, "filter-btn"), vec![false, true, false, false]);

    let all = nth(&s, "filter-btn", 0);
    s.click(all);
    assert_eq!(s.snapshot().gallery_shown, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(active_classes(&s, "filter-btn"), vec![true, false, false, false]);
}

#[test]
fn renamed_all_tag_still_shows_everything() {
    let mut config = SiteConfig::default();
    config.gallery.all_category = "everything".into();
    let mut s = Session::new(build_document(&SiteContent::default(), &config), &config);

    let vases = nth(&s, "filter-btn", 3);
    s.click(vases);
    assert_eq!(s.snapshot().gallery_shown, vec![4, 5]);

    let all = nth(&s, "filter-btn", 0);
    assert_eq!(s.doc().attribute(all, "data-filter").as_deref(), Some("everything"));
    s.click(all);
    assert_eq!(s.snapshot().gallery_shown, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn shown_items_fade_in_after_delay() {
    let mut s = session();
    let tea = nth(&s, "filter-btn", 2);
    s.click(tea);
    let item = nth(&s, "gallery-item", 2);
    assert_eq!(s.doc().style(item, "opacity").as_deref(), Some("0"));
    s.advance(Duration::from_millis(49));
    assert_eq!(s.doc().style(item, "opacity").as_deref(), Some("0"));
    s.advance(Duration::from_millis(1));
    assert_eq!(s.doc().style(item, "opacity").as_deref(), Some("1"));
}

// ---------------------------------------------------------------------------
// Page without optional markup
// ---------------------------------------------------------------------------

#[test]
fn page_without_carousel_or_gallery_still_validates() {
    let content = SiteContent {
        slides: vec![],
        works: vec![],
        ..SiteContent::default()
    };
    let config = SiteConfig::default();
    let mut s = Session::new(build_document(&content, &config), &config);
    assert!(s.page().carousel().is_none());
    assert!(s.page().gallery().is_none());
    assert!(s.clock().pending().is_empty());

    assert!(!submit(&mut s, "loginForm"));
    assert_eq!(s.snapshot().errors.len(), 2);
}
