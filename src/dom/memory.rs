//! Arena-backed in-memory document.
//!
//! Nodes live in a flat `Vec` indexed by [`ElementId`]; parents and children are
//! index links, and an `id` index is kept current as attributes change. Only
//! element nodes exist: text content is a field on the element, which is all
//! the controllers ever read or write.
//!
//! Window-level effects are recorded rather than performed so callers can
//! inspect them: alerts are appended to a log, navigation stores the target,
//! and scroll requests are kept in order.

use super::{Document, ElementId, ScrollBehavior};
use std::collections::{BTreeMap, HashMap};

const ROOT: ElementId = ElementId(0);

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    text: String,
    value: String,
}

impl Node {
    fn new(tag: &str, parent: Option<ElementId>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            parent,
            children: Vec::new(),
            attrs: BTreeMap::new(),
            classes: Vec::new(),
            styles: BTreeMap::new(),
            text: String::new(),
            value: String::new(),
        }
    }

    fn is_control(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea")
    }

    /// Value a control returns to on form reset.
    fn initial_value(&self) -> String {
        if self.tag == "textarea" {
            self.text.clone()
        } else {
            self.attrs.get("value").cloned().unwrap_or_default()
        }
    }
}

/// A scroll the page asked the viewport to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollRequest {
    To { top: f64, behavior: ScrollBehavior },
    IntoView { element: ElementId, behavior: ScrollBehavior },
}

#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    id_index: HashMap<String, ElementId>,
    scroll_y: f64,
    scroll_requests: Vec<ScrollRequest>,
    alerts: Vec<String>,
    location: Option<String>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("#document", None)],
            id_index: HashMap::new(),
            scroll_y: 0.0,
            scroll_requests: Vec::new(),
            alerts: Vec::new(),
            location: None,
        }
    }

    /// The document node every top-level element hangs off.
    pub fn root(&self) -> ElementId {
        ROOT
    }

    /// Create a `tag` element as the last child of `parent`.
    pub fn append(&mut self, parent: ElementId, tag: &str) -> ElementId {
        let id = ElementId(self.nodes.len());
        self.nodes.push(Node::new(tag, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Create an element and apply `attrs` in order.
    pub fn append_with(
        &mut self,
        parent: ElementId,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> ElementId {
        let id = self.append(parent, tag);
        for (name, value) in attrs {
            self.set_attribute(id, name, value);
        }
        id
    }

    /// Set an attribute. `id`, `class` and a control's `value` also update
    /// the derived state they drive.
    pub fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        match name {
            "id" => {
                if let Some(old) = self.nodes[element.0].attrs.get("id") {
                    if self.id_index.get(old) == Some(&element) {
                        self.id_index.remove(old);
                    }
                }
                // First element wins, like getElementById.
                self.id_index.entry(value.to_string()).or_insert(element);
            }
            "class" => {
                self.nodes[element.0].classes =
                    value.split_whitespace().map(str::to_string).collect();
                return;
            }
            "value" if self.nodes[element.0].is_control() => {
                self.nodes[element.0].value = value.to_string();
            }
            _ => {}
        }
        self.nodes[element.0]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    pub fn tag(&self, element: ElementId) -> &str {
        &self.nodes[element.0].tag
    }

    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.nodes[element.0].parent
    }

    pub fn children(&self, element: ElementId) -> &[ElementId] {
        &self.nodes[element.0].children
    }

    pub fn classes(&self, element: ElementId) -> &[String] {
        &self.nodes[element.0].classes
    }

    /// All explicitly set attributes except `class`, sorted by name.
    pub fn attributes(&self, element: ElementId) -> impl Iterator<Item = (&str, &str)> {
        self.nodes[element.0]
            .attrs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Inline style declarations in `prop: value; ...` form, sorted by property.
    pub fn style_text(&self, element: ElementId) -> String {
        self.nodes[element.0]
            .styles
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// False only when an inline `display: none` is set.
    pub fn is_displayed(&self, element: ElementId) -> bool {
        self.style(element, "display").as_deref() != Some("none")
    }

    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y;
    }

    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.scroll_requests
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Navigation target of the most recent `navigate`, if any.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Descendants of `scope` in document order, excluding `scope` itself.
    pub fn descendants(&self, scope: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.nodes[scope.0].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        out
    }
}

impl Document for MemoryDocument {
    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.id_index.get(id).copied()
    }

    fn elements_by_class(&self, scope: Option<ElementId>, class: &str) -> Vec<ElementId> {
        self.descendants(scope.unwrap_or(ROOT))
            .into_iter()
            .filter(|id| self.has_class(*id, class))
            .collect()
    }

    fn elements_by_tag(&self, scope: Option<ElementId>, tags: &[&str]) -> Vec<ElementId> {
        self.descendants(scope.unwrap_or(ROOT))
            .into_iter()
            .filter(|id| tags.iter().any(|t| self.nodes[id.0].tag.eq_ignore_ascii_case(t)))
            .collect()
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        let node = &self.nodes[element.0];
        match name {
            "class" if !node.classes.is_empty() => Some(node.classes.join(" ")),
            "class" => None,
            _ => node.attrs.get(name).cloned(),
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.nodes[element.0].classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if !self.has_class(element, class) {
            self.nodes[element.0].classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        self.nodes[element.0].classes.retain(|c| c != class);
    }

    fn style(&self, element: ElementId, property: &str) -> Option<String> {
        self.nodes[element.0].styles.get(property).cloned()
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        self.nodes[element.0]
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn text(&self, element: ElementId) -> String {
        self.nodes[element.0].text.clone()
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        self.nodes[element.0].text = text.to_string();
    }

    fn value(&self, element: ElementId) -> String {
        let node = &self.nodes[element.0];
        if node.is_control() {
            node.value.clone()
        } else {
            String::new()
        }
    }

    fn set_value(&mut self, element: ElementId, value: &str) {
        let node = &mut self.nodes[element.0];
        if node.is_control() {
            node.value = value.to_string();
        }
    }

    fn reset_form(&mut self, form: ElementId) {
        for id in self.descendants(form) {
            let node = &mut self.nodes[id.0];
            if node.is_control() {
                node.value = node.initial_value();
            }
        }
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        // No layout here, so a smooth scroll lands immediately.
        self.scroll_y = top.max(0.0);
        self.scroll_requests.push(ScrollRequest::To { top, behavior });
    }

    fn scroll_into_view(&mut self, element: ElementId, behavior: ScrollBehavior) {
        self.scroll_requests
            .push(ScrollRequest::IntoView { element, behavior });
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn navigate(&mut self, href: &str) {
        self.location = Some(href.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (MemoryDocument, ElementId, ElementId, ElementId) {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let form = doc.append_with(root, "form", &[("id", "f"), ("class", "card wide")]);
        let input = doc.append_with(form, "input", &[("id", "name"), ("value", "init")]);
        let area = doc.append_with(form, "textarea", &[("id", "msg")]);
        doc.set_text(area, "hello");
        (doc, form, input, area)
    }

    #[test]
    fn lookup_by_id_and_class() {
        let (doc, form, input, _) = sample();
        assert_eq!(doc.element_by_id("f"), Some(form));
        assert_eq!(doc.element_by_id("name"), Some(input));
        assert_eq!(doc.element_by_id("missing"), None);
        assert_eq!(doc.elements_by_class(None, "wide"), vec![form]);
        assert_eq!(doc.attribute(form, "class").as_deref(), Some("card wide"));
    }

    #[test]
    fn descendants_are_in_document_order() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let a = doc.append(root, "div");
        let a1 = doc.append(a, "span");
        let a2 = doc.append(a, "span");
        let b = doc.append(root, "div");
        let a1x = doc.append(a1, "em");
        assert_eq!(doc.descendants(root), vec![a, a1, a1x, a2, b]);
        assert_eq!(doc.elements_by_tag(Some(a), &["span"]), vec![a1, a2]);
    }

    #[test]
    fn first_duplicate_id_wins() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let first = doc.append_with(root, "div", &[("id", "dup")]);
        doc.append_with(root, "div", &[("id", "dup")]);
        assert_eq!(doc.element_by_id("dup"), Some(first));
    }

    #[test]
    fn class_mutation_is_idempotent() {
        let (mut doc, form, _, _) = sample();
        doc.add_class(form, "active");
        doc.add_class(form, "active");
        assert_eq!(doc.classes(form), &["card", "wide", "active"]);
        doc.remove_class(form, "active");
        doc.remove_class(form, "active");
        assert!(!doc.has_class(form, "active"));
    }

    #[test]
    fn value_only_applies_to_controls() {
        let (mut doc, form, input, _) = sample();
        doc.set_value(form, "ignored");
        assert_eq!(doc.value(form), "");
        doc.set_value(input, "typed");
        assert_eq!(doc.value(input), "typed");
    }

    #[test]
    fn reset_restores_initial_values() {
        let (mut doc, form, input, area) = sample();
        doc.set_value(input, "changed");
        doc.set_value(area, "changed too");
        doc.reset_form(form);
        assert_eq!(doc.value(input), "init");
        assert_eq!(doc.value(area), "hello");
    }

    #[test]
    fn window_effects_are_recorded() {
        let (mut doc, form, _, _) = sample();
        doc.set_scroll_y(900.0);
        doc.scroll_to(0.0, ScrollBehavior::Smooth);
        doc.scroll_into_view(form, ScrollBehavior::Smooth);
        doc.alert("hi");
        doc.navigate("login.html");

        assert_eq!(doc.scroll_y(), 0.0);
        assert_eq!(doc.scroll_requests().len(), 2);
        assert_eq!(doc.alerts(), &["hi".to_string()]);
        assert_eq!(doc.location(), Some("login.html"));
    }

    #[test]
    fn display_none_hides() {
        let (mut doc, form, _, _) = sample();
        assert!(doc.is_displayed(form));
        doc.set_style(form, "display", "none");
        assert!(!doc.is_displayed(form));
        doc.set_style(form, "opacity", "0");
        assert_eq!(doc.style_text(form), "display: none; opacity: 0");
    }
}
