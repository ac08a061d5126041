use crate::{
    logging::{LogLevel, LogSink},
    ui::{Bounds, ContactForm, Element, FieldSlot, InputKind, Notifier, Viewport},
};
use std::{
    cell::{Cell, RefCell},
    collections::{BTreeSet, HashMap},
    rc::Rc,
};

#[derive(Default)]
struct ElementState {
    classes: BTreeSet<String>,
    styles: HashMap<String, String>,
    attributes: HashMap<String, String>,
    text: String,
    client_rect: Bounds,
    layout_box: Bounds,
}

/// Shared-handle element double; clones observe the same state.
#[derive(Clone, Default)]
pub struct FakeElement(Rc<RefCell<ElementState>>);

impl FakeElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_layout(self, top: f64, height: f64) -> Self {
        self.0.borrow_mut().layout_box = Bounds::new(top, height);
        self
    }

    pub fn with_rect(self, top: f64, height: f64) -> Self {
        self.set_rect(top, height);
        self
    }

    pub fn set_rect(&self, top: f64, height: f64) {
        self.0.borrow_mut().client_rect = Bounds::new(top, height);
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }

    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }
}

impl Element for FakeElement {
    fn add_class(&self, class: &str) {
        self.0.borrow_mut().classes.insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.contains(class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0
            .borrow_mut()
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn set_text(&self, text: &str) {
        self.0.borrow_mut().text = text.to_string();
    }

    fn client_rect(&self) -> Bounds {
        self.0.borrow().client_rect
    }

    fn layout_box(&self) -> Bounds {
        self.0.borrow().layout_box
    }
}

#[derive(Clone)]
pub struct FakeViewport {
    offset: Rc<Cell<f64>>,
    height: Rc<Cell<f64>>,
    scrolled_to_top: Rc<Cell<u32>>,
}

impl FakeViewport {
    pub fn new(height: f64) -> Self {
        Self {
            offset: Rc::new(Cell::new(0.0)),
            height: Rc::new(Cell::new(height)),
            scrolled_to_top: Rc::new(Cell::new(0)),
        }
    }

    pub fn set_offset(&self, offset: f64) {
        self.offset.set(offset);
    }

    pub fn scroll_to_top_calls(&self) -> u32 {
        self.scrolled_to_top.get()
    }
}

impl Viewport for FakeViewport {
    fn scroll_offset(&self) -> f64 {
        self.offset.get()
    }

    fn height(&self) -> f64 {
        self.height.get()
    }

    fn scroll_to_top(&self) {
        self.scrolled_to_top.set(self.scrolled_to_top.get() + 1);
        self.offset.set(0.0);
    }
}

/// Form double: named fields plus positional inputs grouped by kind.
#[derive(Clone, Default)]
pub struct FakeForm {
    named: Rc<RefCell<HashMap<String, String>>>,
    positional: Rc<RefCell<Vec<(InputKind, String)>>>,
}

impl FakeForm {
    pub fn named(fields: &[(&str, &str)]) -> Self {
        let form = Self::default();
        for (name, value) in fields {
            form.named
                .borrow_mut()
                .insert(name.to_string(), value.to_string());
        }
        form
    }

    pub fn with_input(self, kind: InputKind, value: &str) -> Self {
        self.positional.borrow_mut().push((kind, value.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.named.borrow().values().all(String::is_empty)
            && self.positional.borrow().iter().all(|(_, value)| value.is_empty())
    }
}

impl ContactForm for FakeForm {
    fn named_value(&self, name: &str) -> Option<String> {
        self.named.borrow().get(name).cloned()
    }

    fn positional_value(&self, slot: FieldSlot) -> Option<String> {
        self.positional
            .borrow()
            .iter()
            .filter(|(kind, _)| *kind == slot.kind)
            .nth(slot.nth)
            .map(|(_, value)| value.clone())
    }

    fn reset(&self) {
        for value in self.named.borrow_mut().values_mut() {
            value.clear();
        }
        for (_, value) in self.positional.borrow_mut().iter_mut() {
            value.clear();
        }
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifier(Rc<RefCell<Vec<String>>>);

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn acknowledge(&self, message: &str) {
        self.0.borrow_mut().push(message.to_string());
    }
}

#[derive(Default)]
pub struct MemorySink(RefCell<Vec<String>>);

impl MemorySink {
    pub fn lines(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn events(&self) -> Vec<String> {
        self.lines()
            .iter()
            .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
            .filter_map(|value| value["event"].as_str().map(str::to_string))
            .collect()
    }
}

impl LogSink for MemorySink {
    fn write(&self, _level: LogLevel, line: &str) {
        self.0.borrow_mut().push(line.to_string());
    }
}
