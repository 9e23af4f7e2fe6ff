//! Form controllers.
//!
//! A [`FormController`] intercepts one form's submission and runs its
//! [`RuleSet`]. Every error element in the form is cleared first; then each
//! failing field gets its message shown in the `<field>Error` element with the
//! configured [`ErrorStyle`]. A passing form runs its [`SuccessAction`]. No
//! data leaves the page.
//!
//! Typing into a field clears that field's own error and nothing else.

use crate::config::{ErrorStyle, FormsConfig};
use crate::dom::{Document, ElementId};
use crate::validate::{FormKind, RuleSet, Verdict, error_id_for};

pub const ERROR_CLASS: &str = "error-message";

/// What happens after a form passes validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuccessAction {
    /// Acknowledge and clear every field.
    AcknowledgeAndReset(String),
    /// Acknowledge and leave the form as is.
    Acknowledge(String),
    /// Acknowledge, then navigate to `href`.
    AcknowledgeAndNavigate { message: String, href: String },
}

impl SuccessAction {
    pub fn for_form(kind: FormKind, forms: &FormsConfig) -> Self {
        let acks = &forms.acknowledgments;
        match kind {
            FormKind::Contact => SuccessAction::AcknowledgeAndReset(acks.contact.clone()),
            FormKind::Login => SuccessAction::Acknowledge(acks.login.clone()),
            FormKind::Register => SuccessAction::AcknowledgeAndNavigate {
                message: acks.register.clone(),
                href: forms.login_page.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    Rejected(Verdict),
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted)
    }
}

#[derive(Debug, Clone)]
pub struct FormController {
    kind: FormKind,
    form: ElementId,
    fields: Vec<ElementId>,
    rules: RuleSet,
    success: SuccessAction,
    style: ErrorStyle,
}

impl FormController {
    /// Bind to the form for `kind`. `None` when the page has no such form.
    pub fn bind(doc: &dyn Document, kind: FormKind, forms: &FormsConfig) -> Option<Self> {
        let form = doc.element_by_id(kind.form_id())?;
        let fields = doc.elements_by_tag(Some(form), &["input", "textarea"]);
        Some(Self {
            kind,
            form,
            fields,
            rules: kind.rules(),
            success: SuccessAction::for_form(kind, forms),
            style: forms.error_style.clone(),
        })
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn form(&self) -> ElementId {
        self.form
    }

    /// Text controls inside the form, in document order.
    pub fn fields(&self) -> &[ElementId] {
        &self.fields
    }

    pub fn submit(&self, doc: &mut dyn Document) -> Submission {
        self.clear_errors(doc);

        let verdict = self.rules.evaluate(|field| {
            doc.element_by_id(field)
                .map(|el| doc.value(el))
                .unwrap_or_default()
        });

        if !verdict.is_valid() {
            for error in &verdict.errors {
                self.show_error(doc, &error.error_id(), &error.message);
            }
            tracing::debug!(form = %self.kind, invalid = verdict.errors.len(), "form rejected");
            return Submission::Rejected(verdict);
        }

        tracing::info!(form = %self.kind, "form accepted");
        match &self.success {
            SuccessAction::AcknowledgeAndReset(message) => {
                doc.alert(message);
                doc.reset_form(self.form);
            }
            SuccessAction::Acknowledge(message) => doc.alert(message),
            SuccessAction::AcknowledgeAndNavigate { message, href } => {
                doc.alert(message);
                doc.navigate(href);
            }
        }
        Submission::Accepted
    }

    /// Clear the error belonging to `field`.
    pub fn on_input(&self, doc: &mut dyn Document, field: ElementId) {
        let Some(id) = doc.dom_id(field) else {
            return;
        };
        if let Some(error) = doc.element_by_id(&error_id_for(&id)) {
            clear_error(doc, error);
        }
    }

    fn clear_errors(&self, doc: &mut dyn Document) {
        for error in doc.elements_by_class(Some(self.form), ERROR_CLASS) {
            clear_error(doc, error);
        }
    }

    fn show_error(&self, doc: &mut dyn Document, error_id: &str, message: &str) {
        let Some(error) = doc.element_by_id(error_id) else {
            return;
        };
        doc.set_text(error, message);
        for (property, value) in self.style.declarations() {
            doc.set_style(error, property, value);
        }
    }
}

fn clear_error(doc: &mut dyn Document, error: ElementId) {
    doc.set_text(error, "");
    doc.set_style(error, "display", "none");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDocument;

    fn form_doc(kind: FormKind) -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let form = doc.append_with(root, "form", &[("id", kind.form_id())]);
        for field in kind.rules().fields {
            let tag = if field.field == "message" { "textarea" } else { "input" };
            let error_id = field.error_id();
            doc.append_with(form, tag, &[("id", field.field.as_str())]);
            doc.append_with(form, "span", &[("id", error_id.as_str()), ("class", ERROR_CLASS)]);
        }
        doc
    }

    fn fill(doc: &mut MemoryDocument, pairs: &[(&str, &str)]) {
        for (id, value) in pairs {
            let el = doc.element_by_id(id).unwrap();
            doc.set_value(el, value);
        }
    }

    fn error_text(doc: &MemoryDocument, field: &str) -> String {
        doc.text(doc.element_by_id(&error_id_for(field)).unwrap())
    }

    fn valid_contact() -> [(&'static str, &'static str); 4] {
        [
            ("name", "John Doe"),
            ("phone", "13912345678"),
            ("subject", "Inquiry"),
            ("message", "Do you ship celadon overseas?"),
        ]
    }

    #[test]
    fn rejected_submit_shows_styled_errors_and_keeps_values() {
        let mut doc = form_doc(FormKind::Contact);
        let forms = FormsConfig::default();
        let controller = FormController::bind(&doc, FormKind::Contact, &forms).unwrap();
        fill(&mut doc, &[("name", "J"), ("subject", "Hi")]);

        let outcome = controller.submit(&mut doc);
        assert!(!outcome.is_accepted());

        let name_error = doc.element_by_id("nameError").unwrap();
        assert_eq!(doc.text(name_error), "Name must be at least 2 characters");
        assert_eq!(doc.style(name_error, "display").as_deref(), Some("block"));
        assert_eq!(doc.style(name_error, "color").as_deref(), Some("#c0392b"));
        assert_eq!(doc.style(name_error, "font-size").as_deref(), Some("12px"));
        assert_eq!(doc.style(name_error, "margin-top").as_deref(), Some("5px"));
        assert_eq!(error_text(&doc, "subject"), "");

        assert_eq!(doc.value(doc.element_by_id("name").unwrap()), "J");
        assert!(doc.alerts().is_empty());
    }

    #[test]
    fn resubmit_clears_stale_errors() {
        let mut doc = form_doc(FormKind::Contact);
        let controller =
            FormController::bind(&doc, FormKind::Contact, &FormsConfig::default()).unwrap();
        controller.submit(&mut doc);
        assert_ne!(error_text(&doc, "subject"), "");

        fill(&mut doc, &[("subject", "Kiln tour")]);
        controller.submit(&mut doc);
        assert_eq!(error_text(&doc, "subject"), "");
        let subject_error = doc.element_by_id("subjectError").unwrap();
        assert!(!doc.is_displayed(subject_error));
        assert_ne!(error_text(&doc, "name"), "");
    }

    #[test]
    fn contact_success_acknowledges_and_resets() {
        let mut doc = form_doc(FormKind::Contact);
        let forms = FormsConfig::default();
        let controller = FormController::bind(&doc, FormKind::Contact, &forms).unwrap();
        fill(&mut doc, &valid_contact());

        assert_eq!(controller.submit(&mut doc), Submission::Accepted);
        assert_eq!(doc.alerts(), &[forms.acknowledgments.contact.clone()]);
        for field in controller.fields() {
            assert_eq!(doc.value(*field), "");
        }
        assert_eq!(doc.location(), None);
    }

    #[test]
    fn login_success_only_acknowledges() {
        let mut doc = form_doc(FormKind::Login);
        let controller =
            FormController::bind(&doc, FormKind::Login, &FormsConfig::default()).unwrap();
        fill(&mut doc, &[("username", "guest"), ("password", "secret")]);
        assert!(controller.submit(&mut doc).is_accepted());
        assert_eq!(doc.alerts().len(), 1);
        assert_eq!(doc.value(doc.element_by_id("username").unwrap()), "guest");
        assert_eq!(doc.location(), None);
    }

    #[test]
    fn register_success_navigates_to_login() {
        let mut doc = form_doc(FormKind::Register);
        let controller =
            FormController::bind(&doc, FormKind::Register, &FormsConfig::default()).unwrap();
        fill(
            &mut doc,
            &[
                ("regUsername", "potter"),
                ("regPhone", "13812345678"),
                ("regPassword", "abc123"),
                ("regConfirmPassword", "abc123"),
            ],
        );
        assert!(controller.submit(&mut doc).is_accepted());
        assert_eq!(doc.location(), Some("login.html"));
    }

    #[test]
    fn register_mismatch_does_not_navigate() {
        let mut doc = form_doc(FormKind::Register);
        let controller =
            FormController::bind(&doc, FormKind::Register, &FormsConfig::default()).unwrap();
        fill(
            &mut doc,
            &[
                ("regUsername", "potter"),
                ("regPhone", "13812345678"),
                ("regPassword", "abc123"),
                ("regConfirmPassword", "abc124"),
            ],
        );
        let Submission::Rejected(verdict) = controller.submit(&mut doc) else {
            panic!("mismatched passwords must be rejected");
        };
        assert_eq!(verdict.errors.len(), 1);
        assert_eq!(error_text(&doc, "regConfirmPassword"), "The passwords do not match");
        assert_eq!(doc.location(), None);
    }

    #[test]
    fn input_clears_only_own_error() {
        let mut doc = form_doc(FormKind::Contact);
        let controller =
            FormController::bind(&doc, FormKind::Contact, &FormsConfig::default()).unwrap();
        controller.submit(&mut doc);

        let name = doc.element_by_id("name").unwrap();
        controller.on_input(&mut doc, name);
        assert_eq!(error_text(&doc, "name"), "");
        assert_ne!(error_text(&doc, "phone"), "");
        assert_ne!(error_text(&doc, "message"), "");
    }

    #[test]
    fn missing_error_element_is_tolerated() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let form = doc.append_with(root, "form", &[("id", "loginForm")]);
        doc.append_with(form, "input", &[("id", "username")]);
        let controller =
            FormController::bind(&doc, FormKind::Login, &FormsConfig::default()).unwrap();
        let Submission::Rejected(verdict) = controller.submit(&mut doc) else {
            panic!("empty login must be rejected");
        };
        assert_eq!(verdict.errors.len(), 2);
    }

    #[test]
    fn missing_form_does_not_bind() {
        let doc = form_doc(FormKind::Login);
        assert!(FormController::bind(&doc, FormKind::Register, &FormsConfig::default()).is_none());
    }
}
