//! Rule-driven form validation.
//!
//! Every form is described by a [`RuleSet`]: an ordered list of fields, each
//! with an ordered list of [`Rule`]s. A rule pairs a [`Check`] with the
//! message shown when it fails.
//!
//! Evaluation visits every field so all invalid fields are reported together.
//! Within a field, rules run in order and stop at the first failure, which is
//! how "required" messages take precedence over format messages.
//!
//! ## Built-in rule sets
//!
//! | Form | Field | Rules |
//! |------|-------|-------|
//! | contact | `name` | required, ≥ 2 chars trimmed |
//! | contact | `phone` | required, mobile number |
//! | contact | `email` | email shape when non-empty |
//! | contact | `subject` | required |
//! | contact | `message` | required, ≥ 10 chars trimmed |
//! | login | `username`, `password` | required |
//! | register | `regUsername` | required, 4–16 chars trimmed |
//! | register | `regPhone` | required, mobile number |
//! | register | `regEmail` | email shape when non-empty |
//! | register | `regPassword` | required, 6–20 chars untrimmed |
//! | register | `regConfirmPassword` | required, equals `regPassword` exactly |
//!
//! Lengths count characters, not bytes.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// `1`, then a digit in 3..=9, then nine more digits.
static MOBILE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1[3-9][0-9]{9}$").expect("mobile number pattern compiles"));

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub fn is_mobile_number(value: &str) -> bool {
    MOBILE_NUMBER.is_match(value)
}

/// Loose `local@domain.tld` shape.
pub fn is_email_shape(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

/// Which value a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Trimmed,
    Raw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// Non-empty after trimming, regardless of [`Input`].
    Required,
    MinChars(usize),
    CharsBetween(usize, usize),
    MobileNumber,
    /// Passes on an empty value, so the field stays optional.
    EmailShape,
    /// Equal to another field's raw value.
    SameAs(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub check: Check,
    pub input: Input,
    pub message: String,
}

impl Rule {
    fn new(check: Check, message: impl Into<String>) -> Self {
        Self {
            check,
            input: Input::Trimmed,
            message: message.into(),
        }
    }

    pub fn required(message: impl Into<String>) -> Self {
        Self::new(Check::Required, message)
    }

    pub fn min_chars(min: usize, message: impl Into<String>) -> Self {
        Self::new(Check::MinChars(min), message)
    }

    pub fn chars_between(min: usize, max: usize, message: impl Into<String>) -> Self {
        Self::new(Check::CharsBetween(min, max), message)
    }

    pub fn mobile_number(message: impl Into<String>) -> Self {
        Self::new(Check::MobileNumber, message)
    }

    pub fn email(message: impl Into<String>) -> Self {
        Self::new(Check::EmailShape, message)
    }

    pub fn same_as(field: &str, message: impl Into<String>) -> Self {
        Self::new(Check::SameAs(field.to_string()), message).raw()
    }

    /// Inspect the value as typed instead of trimmed.
    pub fn raw(mut self) -> Self {
        self.input = Input::Raw;
        self
    }

    fn passes(&self, value: &str, lookup: &dyn Fn(&str) -> String) -> bool {
        let subject = match self.input {
            Input::Trimmed => value.trim(),
            Input::Raw => value,
        };
        match &self.check {
            Check::Required => !value.trim().is_empty(),
            Check::MinChars(min) => subject.chars().count() >= *min,
            Check::CharsBetween(min, max) => (*min..=*max).contains(&subject.chars().count()),
            Check::MobileNumber => is_mobile_number(subject),
            Check::EmailShape => subject.is_empty() || is_email_shape(subject),
            Check::SameAs(other) => subject == lookup(other),
        }
    }
}

/// Rules for one field, identified by its element id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRules {
    pub field: String,
    pub rules: Vec<Rule>,
}

impl FieldRules {
    /// Id of the element that displays this field's error.
    pub fn error_id(&self) -> String {
        error_id_for(&self.field)
    }
}

/// `<field>Error`, the error element naming convention.
pub fn error_id_for(field: &str) -> String {
    format!("{field}Error")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn error_id(&self) -> String {
        error_id_for(&self.field)
    }
}

/// Outcome of evaluating a rule set. Errors are in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdict {
    pub errors: Vec<FieldError>,
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub fields: Vec<FieldRules>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: &str, rules: Vec<Rule>) -> Self {
        self.fields.push(FieldRules {
            field: field.to_string(),
            rules,
        });
        self
    }

    /// Evaluate every field. `lookup` returns the current raw value of a field
    /// by id (empty when the field does not exist).
    pub fn evaluate(&self, lookup: impl Fn(&str) -> String) -> Verdict {
        let errors = self
            .fields
            .iter()
            .filter_map(|field| {
                let value = lookup(&field.field);
                field
                    .rules
                    .iter()
                    .find(|rule| !rule.passes(&value, &lookup))
                    .map(|rule| FieldError {
                        field: field.field.clone(),
                        message: rule.message.clone(),
                    })
            })
            .collect();
        Verdict { errors }
    }
}

/// The three forms on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Contact,
    Login,
    Register,
}

impl FormKind {
    pub const ALL: [FormKind; 3] = [FormKind::Contact, FormKind::Login, FormKind::Register];

    /// Element id of the form.
    pub fn form_id(self) -> &'static str {
        match self {
            FormKind::Contact => "contactForm",
            FormKind::Login => "loginForm",
            FormKind::Register => "registerForm",
        }
    }

    pub fn rules(self) -> RuleSet {
        match self {
            FormKind::Contact => contact_rules(),
            FormKind::Login => login_rules(),
            FormKind::Register => register_rules(),
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormKind::Contact => "contact",
            FormKind::Login => "login",
            FormKind::Register => "register",
        })
    }
}

impl FromStr for FormKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contact" => Ok(FormKind::Contact),
            "login" => Ok(FormKind::Login),
            "register" => Ok(FormKind::Register),
            other => Err(format!(
                "unknown form '{other}' (expected contact, login or register)"
            )),
        }
    }
}

const INVALID_MOBILE: &str = "Please enter a valid mobile number";
const INVALID_EMAIL: &str = "Please enter a valid email address";

pub fn contact_rules() -> RuleSet {
    RuleSet::new()
        .field(
            "name",
            vec![
                Rule::required("Please enter your name"),
                Rule::min_chars(2, "Name must be at least 2 characters"),
            ],
        )
        .field(
            "phone",
            vec![
                Rule::required("Please enter your phone number"),
                Rule::mobile_number(INVALID_MOBILE),
            ],
        )
        .field("email", vec![Rule::email(INVALID_EMAIL)])
        .field("subject", vec![Rule::required("Please enter a subject")])
        .field(
            "message",
            vec![
                Rule::required("Please enter your message"),
                Rule::min_chars(10, "Message must be at least 10 characters"),
            ],
        )
}

pub fn login_rules() -> RuleSet {
    RuleSet::new()
        .field(
            "username",
            vec![Rule::required("Please enter your username or phone number")],
        )
        .field("password", vec![Rule::required("Please enter your password")])
}

pub fn register_rules() -> RuleSet {
    RuleSet::new()
        .field(
            "regUsername",
            vec![
                Rule::required("Please choose a username"),
                Rule::chars_between(4, 16, "Username must be 4-16 characters"),
            ],
        )
        .field(
            "regPhone",
            vec![
                Rule::required("Please enter your phone number"),
                Rule::mobile_number(INVALID_MOBILE),
            ],
        )
        .field("regEmail", vec![Rule::email(INVALID_EMAIL)])
        .field(
            "regPassword",
            vec![
                Rule::required("Please enter a password"),
                Rule::chars_between(6, 20, "Password must be 6-20 characters").raw(),
            ],
        )
        .field(
            "regConfirmPassword",
            vec![
                Rule::required("Please enter your password again"),
                Rule::same_as("regPassword", "The passwords do not match"),
            ],
        )
}
