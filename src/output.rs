//! CLI output formatting for every command.
//!
//! # Display Contract
//!
//! Every entity follows the same two-level pattern:
//!
//! 1. **Header line**: positional index + what happened
//! 2. **Context lines**: indented detail (field errors, page state)
//!
//! # Output Format
//!
//! ## Validate
//!
//! ```text
//! contact: rejected (2 errors)
//!     name: Name must be at least 2 characters
//!     phone: Please enter a valid mobile number
//! ```
//!
//! ## Simulate
//!
//! ```text
//! 001 advance 5000ms (1 handled)
//!     slide 2/3, auto-play on
//!     t=5000ms scroll=0 back-to-top hidden
//!     gallery 6 shown
//! 002 submit #loginForm (1 handled, default prevented)
//!     login: rejected
//!     usernameError: Please enter your username or phone number
//! ```
//!
//! ## Render
//!
//! ```text
//! Ru Kiln → dist/index.html
//!     3 slides, 4 filters, 6 works, 3 forms
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::content::SiteContent;
use crate::script::StepReport;
use crate::session::Snapshot;
use crate::validate::{FormKind, Verdict};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Validate
// ============================================================================

pub fn format_verdict(kind: FormKind, verdict: &Verdict) -> Vec<String> {
    if verdict.is_valid() {
        return vec![format!("{kind}: valid")];
    }
    let mut lines = vec![format!(
        "{kind}: rejected ({})",
        plural(verdict.errors.len(), "error")
    )];
    for error in &verdict.errors {
        lines.push(format!("{}{}: {}", indent(1), error.field, error.message));
    }
    lines
}

pub fn print_verdict(kind: FormKind, verdict: &Verdict) {
    for line in format_verdict(kind, verdict) {
        println!("{line}");
    }
}

// ============================================================================
// Simulate
// ============================================================================

/// Page state as indented context lines.
pub fn format_snapshot(state: &Snapshot, total_slides: usize, depth: usize) -> Vec<String> {
    let pad = indent(depth);
    let mut lines = Vec::new();

    if let Some(slide) = state.active_slide {
        lines.push(format!(
            "{pad}slide {}/{}, auto-play {}",
            slide + 1,
            total_slides,
            if state.auto_play { "on" } else { "off" }
        ));
    }
    lines.push(format!(
        "{pad}t={}ms scroll={} back-to-top {}",
        state.now_ms,
        state.scroll_y,
        if state.back_to_top_visible { "shown" } else { "hidden" }
    ));
    lines.push(format!("{pad}gallery {} shown", state.gallery_shown.len()));
    for (id, message) in &state.errors {
        lines.push(format!("{pad}{id}: {message}"));
    }
    if let Some(alert) = state.alerts.last() {
        lines.push(format!("{pad}alert: {alert}"));
    }
    if let Some(location) = &state.location {
        lines.push(format!("{pad}navigated to {location}"));
    }
    lines
}

pub fn format_simulation(reports: &[StepReport], total_slides: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, report) in reports.iter().enumerate() {
        let prevented = if report.default_prevented {
            ", default prevented"
        } else {
            ""
        };
        lines.push(format!(
            "{} {} ({} handled{prevented})",
            format_index(i + 1),
            report.step,
            report.handled
        ));
        for (form, accepted) in &report.submissions {
            let verdict = if *accepted { "accepted" } else { "rejected" };
            lines.push(format!("{}{form}: {verdict}", indent(1)));
        }
        lines.extend(format_snapshot(&report.state, total_slides, 1));
    }
    lines
}

pub fn print_simulation(reports: &[StepReport], total_slides: usize) {
    for line in format_simulation(reports, total_slides) {
        println!("{line}");
    }
}

// ============================================================================
// Render
// ============================================================================

pub fn format_render(content: &SiteContent, path: &Path) -> Vec<String> {
    vec![
        format!("{} → {}", content.title, path.display()),
        format!(
            "{}{}, {}, {}, {}",
            indent(1),
            plural(content.slides.len(), "slide"),
            plural(content.categories.len() + 1, "filter"),
            plural(content.works.len(), "work"),
            plural(FormKind::ALL.len(), "form"),
        ),
    ]
}

pub fn print_render(content: &SiteContent, path: &Path) {
    for line in format_render(content, path) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::FieldError;

    #[test]
    fn format_index_pads_to_three_digits() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn verdict_valid_is_one_line() {
        let lines = format_verdict(FormKind::Login, &Verdict { errors: vec![] });
        assert_eq!(lines, vec!["login: valid"]);
    }

    #[test]
    fn verdict_lists_field_errors() {
        let verdict = Verdict {
            errors: vec![FieldError {
                field: "name".into(),
                message: "Please enter your name".into(),
            }],
        };
        let lines = format_verdict(FormKind::Contact, &verdict);
        assert_eq!(
            lines,
            vec![
                "contact: rejected (1 error)",
                "    name: Please enter your name",
            ]
        );
    }

    fn state() -> Snapshot {
        Snapshot {
            now_ms: 5000,
            active_slide: Some(1),
            auto_play: true,
            scroll_y: 0.0,
            back_to_top_visible: false,
            errors: vec![],
            gallery_shown: vec![0, 1, 2],
            alerts: vec![],
            location: None,
        }
    }

    #[test]
    fn snapshot_lines() {
        let lines = format_snapshot(&state(), 3, 1);
        assert_eq!(
            lines,
            vec![
                "    slide 2/3, auto-play on",
                "    t=5000ms scroll=0 back-to-top hidden",
                "    gallery 3 shown",
            ]
        );
    }

    #[test]
    fn snapshot_without_carousel_omits_slide_line() {
        let mut s = state();
        s.active_slide = None;
        s.location = Some("login.html".into());
        let lines = format_snapshot(&s, 0, 0);
        assert!(!lines.iter().any(|l| l.starts_with("slide")));
        assert_eq!(lines.last().map(String::as_str), Some("navigated to login.html"));
    }

    #[test]
    fn simulation_headers_and_submissions() {
        let reports = vec![StepReport {
            step: "submit #loginForm".into(),
            handled: 1,
            default_prevented: true,
            submissions: vec![("login".into(), false)],
            state: state(),
        }];
        let lines = format_simulation(&reports, 3);
        assert_eq!(lines[0], "001 submit #loginForm (1 handled, default prevented)");
        assert_eq!(lines[1], "    login: rejected");
    }

    #[test]
    fn render_summary_counts_all_filter() {
        let lines = format_render(&SiteContent::default(), Path::new("dist/index.html"));
        assert_eq!(lines[0], "Ru Kiln → dist/index.html");
        assert_eq!(lines[1], "    3 slides, 4 filters, 6 works, 3 forms");
    }
}
