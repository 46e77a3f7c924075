use std::collections::{BTreeMap, HashMap};

use tracing::{error, info};

use crate::error::UiError;

/// Handle to an element owned by a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementKey(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    /// No inline display set; the element shows unless CSS hides it.
    #[default]
    Unset,
    Block,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub dataset: BTreeMap<String, String>,
    pub value: String,
    pub text: String,
    pub checked: bool,
    pub required: bool,
    pub disabled: bool,
    pub display: Display,
    pub options: Vec<SelectOption>,
    parent: Option<ElementKey>,
    children: Vec<ElementKey>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_data(mut self, name: &str, value: &str) -> Self {
        self.dataset.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn with_option(mut self, value: &str, text: &str) -> Self {
        self.options.push(SelectOption {
            value: value.to_string(),
            text: text.to_string(),
        });
        self
    }

    pub fn hidden(mut self) -> Self {
        self.display = Display::None;
        self
    }

    pub fn checkbox(value: &str) -> Self {
        Element::new("input").with_attr("type", "checkbox").with_value(value)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn data(&self, name: &str) -> Option<&str> {
        self.dataset.get(name).map(String::as_str)
    }

    pub fn is_checkbox(&self) -> bool {
        self.tag == "input" && self.attr("type") == Some("checkbox")
    }

    pub fn is_displayed(&self) -> bool {
        self.display != Display::None
    }
}

/// Headless page: the element tree plus the window-level state scripts touch
/// (document style variables, local storage, alerts and console output).
#[derive(Debug)]
pub struct Document {
    elements: Vec<Element>,
    ids: HashMap<String, ElementKey>,
    root: ElementKey,
    body: ElementKey,
    style: BTreeMap<String, String>,
    local_storage: HashMap<String, String>,
    alerts: Vec<String>,
    console: Vec<String>,
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            elements: vec![Element::new("html")],
            ids: HashMap::new(),
            root: ElementKey(0),
            body: ElementKey(0),
            style: BTreeMap::new(),
            local_storage: HashMap::new(),
            alerts: Vec::new(),
            console: Vec::new(),
        };
        doc.body = doc.append(doc.root, Element::new("body"));
        doc
    }

    pub fn root(&self) -> ElementKey {
        self.root
    }

    pub fn body(&self) -> ElementKey {
        self.body
    }

    pub fn append(&mut self, parent: ElementKey, mut element: Element) -> ElementKey {
        let key = ElementKey(self.elements.len());
        element.parent = Some(parent);
        element.children.clear();
        if let Some(id) = &element.id {
            self.ids.insert(id.clone(), key);
        }
        self.elements.push(element);
        self.elements[parent.0].children.push(key);
        key
    }

    pub fn get(&self, key: ElementKey) -> &Element {
        &self.elements[key.0]
    }

    pub fn get_mut(&mut self, key: ElementKey) -> &mut Element {
        &mut self.elements[key.0]
    }

    pub fn by_id(&self, id: &str) -> Option<ElementKey> {
        self.ids.get(id).copied()
    }

    /// Elements under `scope` (excluding it) in document order.
    pub fn descendants(&self, scope: ElementKey) -> Vec<ElementKey> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementKey> = self.get(scope).children.iter().rev().copied().collect();
        while let Some(key) = stack.pop() {
            out.push(key);
            stack.extend(self.get(key).children.iter().rev().copied());
        }
        out
    }

    pub fn by_class(&self, class: &str) -> Vec<ElementKey> {
        self.class_in(self.root, class)
    }

    pub fn first_by_class(&self, class: &str) -> Option<ElementKey> {
        self.by_class(class).into_iter().next()
    }

    pub fn class_in(&self, scope: ElementKey, class: &str) -> Vec<ElementKey> {
        self.descendants(scope)
            .into_iter()
            .filter(|&k| self.get(k).has_class(class))
            .collect()
    }

    /// Nearest ancestor (or the element itself) carrying `class`.
    pub fn closest(&self, key: ElementKey, class: &str) -> Option<ElementKey> {
        let mut current = Some(key);
        while let Some(k) = current {
            if self.get(k).has_class(class) {
                return Some(k);
            }
            current = self.get(k).parent;
        }
        None
    }

    pub fn contains(&self, ancestor: ElementKey, key: ElementKey) -> bool {
        let mut current = Some(key);
        while let Some(k) = current {
            if k == ancestor {
                return true;
            }
            current = self.get(k).parent;
        }
        false
    }

    /// Precondition check for a control a component was bound to. A missing
    /// element is logged and recorded on the console before the error is returned.
    pub fn require(&mut self, key: Option<ElementKey>, what: &str) -> Result<ElementKey, UiError> {
        key.ok_or_else(|| self.report(UiError::MissingElement(what.to_string())))
    }

    pub fn report(&mut self, err: UiError) -> UiError {
        error!("{}", err);
        self.console.push(err.to_string());
        err
    }

    pub fn value(&self, key: ElementKey) -> &str {
        &self.get(key).value
    }

    pub fn set_value(&mut self, key: ElementKey, value: &str) {
        self.get_mut(key).value = value.to_string();
    }

    pub fn set_display(&mut self, key: ElementKey, display: Display) {
        self.get_mut(key).display = display;
    }

    pub fn add_option(&mut self, select: ElementKey, value: &str, text: &str) {
        self.get_mut(select).options.push(SelectOption {
            value: value.to_string(),
            text: text.to_string(),
        });
    }

    pub fn set_style_var(&mut self, name: &str, value: &str) {
        self.style.insert(name.to_string(), value.to_string());
    }

    pub fn style_var(&self, name: &str) -> Option<&str> {
        self.style.get(name).map(String::as_str)
    }

    pub fn storage_set(&mut self, key: &str, value: &str) {
        self.local_storage.insert(key.to_string(), value.to_string());
    }

    pub fn storage_get(&self, key: &str) -> Option<&str> {
        self.local_storage.get(key).map(String::as_str)
    }

    /// Blocking user notification.
    pub fn alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("alert: {}", message);
        self.alerts.push(message);
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    pub fn console(&self) -> &[String] {
        &self.console
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
