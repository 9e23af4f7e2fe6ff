//! Site content and the page structure built from it.
//!
//! [`SiteContent`] describes what the showcase page holds: banner slides,
//! gallery categories and works, and the in-page navigation. It can be loaded
//! from a TOML file or taken from [`SiteContent::default`], a small sample
//! site.
//!
//! [`build_document`] turns content into a [`MemoryDocument`] with exactly the
//! markup the controllers bind to. [`crate::render`] renders the same
//! structure as HTML; both walk the same content and [`form_fields`] tables so
//! ids and classes stay in step.

use crate::carousel::{ARROW_CLASS, CONTAINER_CLASS, INDICATOR_CLASS, SLIDE_CLASS};
use crate::config::SiteConfig;
use crate::dom::{Document, ElementId, MemoryDocument};
use crate::forms::ERROR_CLASS;
use crate::gallery::{CATEGORY_ATTR, FILTER_ATTR, FILTER_CLASS, ITEM_CLASS};
use crate::scroll::BACK_TO_TOP_ID;
use crate::validate::{FormKind, error_id_for};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteContent {
    pub title: String,
    pub nav: Vec<NavLink>,
    pub slides: Vec<Slide>,
    pub categories: Vec<Category>,
    pub works: Vec<Work>,
    pub about: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Slide {
    pub title: String,
    pub caption: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    pub tag: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Work {
    pub title: String,
    pub category: String,
    pub image: String,
}

fn nav(label: &str, href: &str) -> NavLink {
    NavLink {
        label: label.into(),
        href: href.into(),
    }
}

fn slide(title: &str, caption: &str, image: &str) -> Slide {
    Slide {
        title: title.into(),
        caption: caption.into(),
        image: image.into(),
    }
}

fn category(tag: &str, label: &str) -> Category {
    Category {
        tag: tag.into(),
        label: label.into(),
    }
}

fn work(title: &str, category: &str, image: &str) -> Work {
    Work {
        title: title.into(),
        category: category.into(),
        image: image.into(),
    }
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            title: "Ru Kiln".into(),
            nav: vec![
                nav("Home", "#"),
                nav("Works", "#gallery"),
                nav("About", "#about"),
                nav("Contact", "#contact"),
            ],
            slides: vec![
                slide("Sky Blue After Rain", "Celadon glazes fired in the old way", "images/banner-1.jpg"),
                slide("Crackle", "Every piece carries its own ice-crack pattern", "images/banner-2.jpg"),
                slide("The Kiln", "Wood-fired at 1200°C for three days", "images/banner-3.jpg"),
            ],
            categories: vec![
                category("ceramics", "Ceramics"),
                category("tea-sets", "Tea sets"),
                category("vases", "Vases"),
            ],
            works: vec![
                work("Lotus bowl", "ceramics", "images/works/lotus-bowl.jpg"),
                work("Washer", "ceramics", "images/works/washer.jpg"),
                work("Gongfu set", "tea-sets", "images/works/gongfu.jpg"),
                work("Travel teapot", "tea-sets", "images/works/travel-teapot.jpg"),
                work("Goose-neck vase", "vases", "images/works/goose-neck.jpg"),
                work("Plum vase", "vases", "images/works/plum.jpg"),
            ],
            about: "A family workshop keeping the celadon tradition alive.".into(),
        }
    }
}

/// Load content from a TOML file.
pub fn load_content(path: &Path) -> Result<SiteContent, ContentError> {
    let text = fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}

/// How a form field is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Text,
    Tel,
    Email,
    Password,
    TextArea,
}

impl Control {
    /// `type` attribute for `input` controls.
    pub fn input_type(self) -> Option<&'static str> {
        match self {
            Control::Text => Some("text"),
            Control::Tel => Some("tel"),
            Control::Email => Some("email"),
            Control::Password => Some("password"),
            Control::TextArea => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub control: Control,
}

const fn field(id: &'static str, label: &'static str, control: Control) -> FieldSpec {
    FieldSpec { id, label, control }
}

const CONTACT_FIELDS: &[FieldSpec] = &[
    field("name", "Name", Control::Text),
    field("phone", "Phone", Control::Tel),
    field("email", "Email (optional)", Control::Email),
    field("subject", "Subject", Control::Text),
    field("message", "Message", Control::TextArea),
];

const LOGIN_FIELDS: &[FieldSpec] = &[
    field("username", "Username or phone", Control::Text),
    field("password", "Password", Control::Password),
];

const REGISTER_FIELDS: &[FieldSpec] = &[
    field("regUsername", "Username", Control::Text),
    field("regPhone", "Phone", Control::Tel),
    field("regEmail", "Email (optional)", Control::Email),
    field("regPassword", "Password", Control::Password),
    field("regConfirmPassword", "Confirm password", Control::Password),
];

/// Fields of each form, in page order.
pub fn form_fields(kind: FormKind) -> &'static [FieldSpec] {
    match kind {
        FormKind::Contact => CONTACT_FIELDS,
        FormKind::Login => LOGIN_FIELDS,
        FormKind::Register => REGISTER_FIELDS,
    }
}

/// Section id hosting each form.
pub fn form_section(kind: FormKind) -> &'static str {
    match kind {
        FormKind::Contact => "contact",
        FormKind::Login => "login",
        FormKind::Register => "register",
    }
}

/// Build the page structure for `content` in memory. The "All" filter
/// carries `config.gallery.all_category`, the tag the gallery binds with.
pub fn build_document(content: &SiteContent, config: &SiteConfig) -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let body = doc.append(root, "body");

    let header = doc.append_with(body, "header", &[("class", "site-header")]);
    let menu = doc.append(header, "nav");
    for link in &content.nav {
        let a = doc.append_with(menu, "a", &[("href", link.href.as_str())]);
        doc.set_text(a, &link.label);
    }

    build_carousel(&mut doc, body, content);
    build_gallery(&mut doc, body, content, &config.gallery.all_category);

    let about = doc.append_with(body, "section", &[("id", "about")]);
    let p = doc.append(about, "p");
    doc.set_text(p, &content.about);

    for kind in FormKind::ALL {
        build_form(&mut doc, body, kind);
    }

    let top = doc.append_with(
        body,
        "button",
        &[("id", BACK_TO_TOP_ID), ("class", "back-to-top"), ("type", "button")],
    );
    doc.set_text(top, "↑");
    doc
}

fn build_carousel(doc: &mut MemoryDocument, body: ElementId, content: &SiteContent) {
    if content.slides.is_empty() {
        return;
    }
    let section = doc.append_with(body, "section", &[("id", "home")]);
    let slider = doc.append_with(section, "div", &[("class", CONTAINER_CLASS)]);
    for s in &content.slides {
        let slide = doc.append_with(slider, "div", &[("class", SLIDE_CLASS)]);
        doc.append_with(slide, "img", &[("src", s.image.as_str()), ("alt", s.title.as_str())]);
        let h2 = doc.append(slide, "h2");
        doc.set_text(h2, &s.title);
        let p = doc.append(slide, "p");
        doc.set_text(p, &s.caption);
    }
    let prev_class = format!("{ARROW_CLASS} prev");
    let next_class = format!("{ARROW_CLASS} next");
    let prev = doc.append_with(slider, "button", &[("class", prev_class.as_str()), ("type", "button")]);
    doc.set_text(prev, "‹");
    let next = doc.append_with(slider, "button", &[("class", next_class.as_str()), ("type", "button")]);
    doc.set_text(next, "›");
    let dots = doc.append_with(slider, "div", &[("class", "slider-dots")]);
    for _ in &content.slides {
        doc.append_with(dots, "span", &[("class", INDICATOR_CLASS)]);
    }
}

fn build_gallery(doc: &mut MemoryDocument, body: ElementId, content: &SiteContent, all: &str) {
    let section = doc.append_with(body, "section", &[("id", "gallery")]);
    let bar = doc.append_with(section, "div", &[("class", "gallery-filter")]);
    let all_class = format!("{FILTER_CLASS} active");
    let all = doc.append_with(
        bar,
        "button",
        &[("class", all_class.as_str()), (FILTER_ATTR, all)],
    );
    doc.set_text(all, "All");
    for c in &content.categories {
        let button = doc.append_with(
            bar,
            "button",
            &[("class", FILTER_CLASS), (FILTER_ATTR, c.tag.as_str())],
        );
        doc.set_text(button, &c.label);
    }

    let grid = doc.append_with(section, "div", &[("class", "gallery-grid")]);
    for w in &content.works {
        let item = doc.append_with(
            grid,
            "div",
            &[("class", ITEM_CLASS), (CATEGORY_ATTR, w.category.as_str())],
        );
        doc.append_with(item, "img", &[("src", w.image.as_str()), ("alt", w.title.as_str())]);
        let h3 = doc.append(item, "h3");
        doc.set_text(h3, &w.title);
    }
}

fn build_form(doc: &mut MemoryDocument, body: ElementId, kind: FormKind) {
    let section = doc.append_with(body, "section", &[("id", form_section(kind))]);
    let form = doc.append_with(section, "form", &[("id", kind.form_id()), ("novalidate", "")]);
    for spec in form_fields(kind) {
        let group = doc.append_with(form, "div", &[("class", "form-group")]);
        let label = doc.append_with(group, "label", &[("for", spec.id)]);
        doc.set_text(label, spec.label);
        match spec.control.input_type() {
            Some(ty) => doc.append_with(group, "input", &[("id", spec.id), ("name", spec.id), ("type", ty)]),
            None => doc.append_with(group, "textarea", &[("id", spec.id), ("name", spec.id)]),
        };
        let error_id = error_id_for(spec.id);
        doc.append_with(group, "span", &[("id", error_id.as_str()), ("class", ERROR_CLASS)]);
    }
    let submit = doc.append_with(form, "button", &[("type", "submit")]);
    doc.set_text(submit, "Submit");
}
