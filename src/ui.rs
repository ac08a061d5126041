//! Capability interface between the controller and whatever renders the page.
//!
//! The controller only ever flips classes, writes a handful of style
//! properties and reads geometry. Anything able to do that (the browser DOM,
//! or an in-memory fake) can host it.

pub mod selectors {
    pub const NAV_TOGGLE: &str = "#navToggle";
    pub const NAV_TOGGLE_BARS: &str = "#navToggle span";
    pub const NAV_MENU: &str = ".nav-menu";
    pub const NAV_LINKS: &str = ".nav-link";
    pub const BACK_TO_TOP: &str = "#backToTop";
    pub const FILTER_BUTTONS: &str = ".filter-btn";
    pub const PORTFOLIO_ITEMS: &str = ".portfolio-item";
    pub const PROGRESS_BARS: &str = ".progress-bar";
    pub const CONTACT_FORM: &str = "#contactForm";
    pub const TYPING_TEXT: &str = ".typing-text";
    pub const SECTIONS: &str = "section";
    pub const HERO: &str = ".hero";
    pub const HERO_CONTENT: &str = ".hero-content";
    pub const HERO_IMAGE: &str = ".hero-image";
    pub const SKILL_CARDS: &str = ".skill-card";
    pub const REVEAL_TARGETS: &str = ".about-content, .skills-grid, .portfolio-grid, .contact-content";
    pub const CONFIG_DOCUMENT: &str = "controller-config";
}

pub mod attributes {
    pub const FILTER: &str = "data-filter";
    pub const CATEGORY: &str = "data-category";
    pub const TARGET_WIDTH: &str = "data-width";
    pub const HREF: &str = "href";
    pub const ID: &str = "id";
}

pub mod classes {
    pub const ACTIVE: &str = "active";
    pub const VISIBLE: &str = "visible";
    pub const ANIMATED: &str = "animated";
}

/// Vertical extent of an element, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Half-open containment: `top <= y < bottom`.
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }
}

pub trait Element {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_style(&self, property: &str, value: &str);
    fn set_text(&self, text: &str);
    /// Position relative to the viewport (`getBoundingClientRect`).
    fn client_rect(&self) -> Bounds;
    /// Position within the document (`offsetTop` / `clientHeight`).
    fn layout_box(&self) -> Bounds;

    fn toggle_class(&self, class: &str, present: bool) {
        if present {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }
}

pub trait Viewport {
    fn scroll_offset(&self) -> f64;
    fn height(&self) -> f64;
    fn scroll_to_top(&self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    TextArea,
}

/// Positional lookup used when a field cannot be found by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSlot {
    pub kind: InputKind,
    pub nth: usize,
}

pub trait ContactForm {
    fn named_value(&self, name: &str) -> Option<String>;
    fn positional_value(&self, slot: FieldSlot) -> Option<String>;
    fn reset(&self);
}

pub trait Notifier {
    fn acknowledge(&self, message: &str);
}
