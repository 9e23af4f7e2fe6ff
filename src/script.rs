//! Scripted interaction replay.
//!
//! A script is a JSON array of steps, each naming an `action`:
//!
//! ```json
//! [
//!   { "action": "advance", "ms": 5000 },
//!   { "action": "click", "target": ".filter-btn:2" },
//!   { "action": "input", "target": "#name", "value": "Li" },
//!   { "action": "submit", "target": "#contactForm" },
//!   { "action": "scroll", "y": 640 }
//! ]
//! ```
//!
//! Targets are `#id` or `.class`, the latter optionally suffixed with `:N` to
//! pick the Nth match (zero-based, first by default). Each step yields a
//! [`StepReport`] carrying the page [`Snapshot`] after it ran.

use crate::dom::{Document, ElementId};
use crate::page::Dispatch;
use crate::session::{Session, Snapshot};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("script parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("step {step}: no element matches '{target}'")]
    UnknownTarget { step: usize, target: String },
    #[error("step {step}: '{target}' is not a form")]
    NotAForm { step: usize, target: String },
    #[error("step {step}: cannot advance {ms}ms, more than one day")]
    AdvanceTooLong { step: usize, ms: u64 },
}

/// Longest single `advance` a script may request: one day.
pub const MAX_ADVANCE_MS: u64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Click { target: String },
    Input { target: String, value: String },
    Submit { target: String },
    Scroll { y: f64 },
    Enter { target: String },
    Leave { target: String },
    Advance { ms: u64 },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Click { target } => write!(f, "click {target}"),
            Step::Input { target, value } => write!(f, "input {target} = {value:?}"),
            Step::Submit { target } => write!(f, "submit {target}"),
            Step::Scroll { y } => write!(f, "scroll to {y}"),
            Step::Enter { target } => write!(f, "enter {target}"),
            Step::Leave { target } => write!(f, "leave {target}"),
            Step::Advance { ms } => write!(f, "advance {ms}ms"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    pub step: String,
    /// Listeners that ran, or timers fired for `advance`.
    pub handled: usize,
    pub default_prevented: bool,
    /// Forms submitted by this step and whether each was accepted.
    pub submissions: Vec<(String, bool)>,
    pub state: Snapshot,
}

pub fn parse_script(text: &str) -> Result<Vec<Step>, ScriptError> {
    Ok(serde_json::from_str(text)?)
}

pub fn load_script(path: &Path) -> Result<Vec<Step>, ScriptError> {
    parse_script(&fs::read_to_string(path)?)
}

/// Resolve a `#id` or `.class[:N]` selector.
pub fn resolve(doc: &dyn Document, target: &str) -> Option<ElementId> {
    if let Some(id) = target.strip_prefix('#') {
        return doc.element_by_id(id);
    }
    let class = target.strip_prefix('.')?;
    let (class, index) = match class.rsplit_once(':') {
        Some((class, n)) => (class, n.parse().ok()?),
        None => (class, 0),
    };
    doc.elements_by_class(None, class).get(index).copied()
}

fn element(session: &Session, step: usize, target: &str) -> Result<ElementId, ScriptError> {
    resolve(session.doc(), target).ok_or_else(|| ScriptError::UnknownTarget {
        step,
        target: target.to_string(),
    })
}

/// Replay `steps` against `session`, stopping at the first step whose target
/// does not resolve.
pub fn run(session: &mut Session, steps: &[Step]) -> Result<Vec<StepReport>, ScriptError> {
    let mut reports = Vec::with_capacity(steps.len());
    for (i, step) in steps.iter().enumerate() {
        let number = i + 1;

        let outcome = match step {
            Step::Click { target } => {
                let el = element(session, number, target)?;
                session.click(el)
            }
            Step::Input { target, value } => {
                let el = element(session, number, target)?;
                session.type_into(el, value)
            }
            Step::Submit { target } => {
                let el = element(session, number, target)?;
                if session.doc().tag(el) != "form" {
                    return Err(ScriptError::NotAForm {
                        step: number,
                        target: target.clone(),
                    });
                }
                session.submit(el)
            }
            Step::Scroll { y } => session.scroll_to(*y),
            Step::Enter { target } => {
                let el = element(session, number, target)?;
                session.pointer_enter(el)
            }
            Step::Leave { target } => {
                let el = element(session, number, target)?;
                session.pointer_leave(el)
            }
            Step::Advance { ms } if *ms > MAX_ADVANCE_MS => {
                return Err(ScriptError::AdvanceTooLong {
                    step: number,
                    ms: *ms,
                });
            }
            Step::Advance { ms } => Dispatch {
                handled: session.advance(Duration::from_millis(*ms)),
                ..Dispatch::default()
            },
        };

        tracing::debug!(step = number, action = %step, handled = outcome.handled, "step replayed");
        reports.push(StepReport {
            step: step.to_string(),
            handled: outcome.handled,
            default_prevented: outcome.default_prevented,
            submissions: outcome
                .submissions
                .iter()
                .map(|(kind, submission)| (kind.to_string(), submission.is_accepted()))
                .collect(),
            state: session.snapshot(),
        });
    }
    Ok(reports)
}
