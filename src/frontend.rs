use crate::{
    config::ControllerConfig,
    controller::{Host, PageBindings, PageEvent, PresentationController},
    logging::Logger,
    schedule::{Scheduler, Task, TimerId},
    ui::{selectors, Bounds, ContactForm, Element, FieldSlot, InputKind, Notifier, Viewport},
};
use js_sys::Array;
use serde_json::json;
use std::{cell::RefCell, rc::Rc, time::Duration};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Event, EventTarget, FormData, HtmlElement, HtmlFormElement,
    HtmlInputElement, HtmlTextAreaElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollToOptions, Window,
};

type SharedController = Rc<RefCell<PresentationController<DomElement, WindowScheduler>>>;

#[derive(Clone)]
pub struct DomElement(HtmlElement);

impl DomElement {
    fn target(&self) -> &EventTarget {
        &self.0
    }

    fn js(&self) -> &JsValue {
        self.0.as_ref()
    }
}

impl Element for DomElement {
    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_style(&self, property: &str, value: &str) {
        let _ = self.0.style().set_property(property, value);
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn client_rect(&self) -> Bounds {
        let rect = self.0.get_bounding_client_rect();
        Bounds::new(rect.top(), rect.height())
    }

    fn layout_box(&self) -> Bounds {
        Bounds::new(f64::from(self.0.offset_top()), f64::from(self.0.client_height()))
    }
}

struct DomViewport(Window);

impl Viewport for DomViewport {
    fn scroll_offset(&self) -> f64 {
        self.0.scroll_y().unwrap_or(0.0)
    }

    fn height(&self) -> f64 {
        self.0
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(720.0)
    }

    fn scroll_to_top(&self) {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        self.0.scroll_to_with_scroll_to_options(&options);
    }
}

struct AlertNotifier(Window);

impl Notifier for AlertNotifier {
    fn acknowledge(&self, message: &str) {
        let _ = self.0.alert_with_message(message);
    }
}

struct DomForm(HtmlFormElement);

impl ContactForm for DomForm {
    fn named_value(&self, name: &str) -> Option<String> {
        FormData::new_with_form(&self.0).ok()?.get(name).as_string()
    }

    fn positional_value(&self, slot: FieldSlot) -> Option<String> {
        let selector = match slot.kind {
            InputKind::Text => r#"input[type="text"]"#,
            InputKind::Email => r#"input[type="email"]"#,
            InputKind::TextArea => "textarea",
        };
        let node = self
            .0
            .query_selector_all(selector)
            .ok()?
            .get(u32::try_from(slot.nth).ok()?)?;

        match slot.kind {
            InputKind::TextArea => node.dyn_into::<HtmlTextAreaElement>().ok().map(|area| area.value()),
            _ => node.dyn_into::<HtmlInputElement>().ok().map(|input| input.value()),
        }
    }

    fn reset(&self) {
        self.0.reset();
    }
}

/// Routes events into the controller. Events raised while the controller is
/// already handling one are dropped.
#[derive(Clone, Default)]
struct Dispatcher(Rc<RefCell<Option<SharedController>>>);

impl Dispatcher {
    // The controller lives as long as the page, so the cycle through the
    // scheduler is never broken.
    fn attach(&self, controller: SharedController) {
        *self.0.borrow_mut() = Some(controller);
    }

    fn send(&self, event: PageEvent) {
        let Some(controller) = self.0.borrow().clone() else {
            return;
        };
        if let Ok(mut controller) = controller.try_borrow_mut() {
            controller.handle(event);
        }
    }

    fn is_revealed(&self, target: usize) -> bool {
        self.0
            .borrow()
            .as_ref()
            .and_then(|controller| controller.try_borrow().ok().map(|c| c.is_revealed(target)))
            .unwrap_or(false)
    }
}

pub struct WindowScheduler {
    window: Window,
    dispatcher: Dispatcher,
}

impl Scheduler for WindowScheduler {
    fn schedule(&mut self, delay: Duration, task: Task) -> TimerId {
        let dispatcher = self.dispatcher.clone();
        let callback = Closure::once_into_js(move || dispatcher.send(PageEvent::Timer(task)));
        let timeout = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), timeout)
            .unwrap_or(0);

        TimerId(handle as u64)
    }

    fn cancel(&mut self, id: TimerId) {
        self.window.clear_timeout_with_handle(id.0 as i32);
    }
}

fn query(document: &Document, selector: &str) -> Option<DomElement> {
    query_as::<HtmlElement>(document, selector).map(DomElement)
}

fn query_as<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    document
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<T>()
        .ok()
}

fn query_all(document: &Document, selector: &str) -> Vec<DomElement> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .map(DomElement)
        .collect()
}

fn bind_page(document: &Document) -> PageBindings<DomElement> {
    PageBindings {
        typing_text: query(document, selectors::TYPING_TEXT),
        nav_toggle: query(document, selectors::NAV_TOGGLE),
        nav_toggle_bars: query_all(document, selectors::NAV_TOGGLE_BARS),
        nav_menu: query(document, selectors::NAV_MENU),
        nav_links: query_all(document, selectors::NAV_LINKS),
        back_to_top: query(document, selectors::BACK_TO_TOP),
        sections: query_all(document, selectors::SECTIONS),
        progress_bars: query_all(document, selectors::PROGRESS_BARS),
        hero: query(document, selectors::HERO),
        hero_content: query(document, selectors::HERO_CONTENT),
        hero_image: query(document, selectors::HERO_IMAGE),
        filter_buttons: query_all(document, selectors::FILTER_BUTTONS),
        portfolio_items: query_all(document, selectors::PORTFOLIO_ITEMS),
        skill_cards: query_all(document, selectors::SKILL_CARDS),
        reveal_targets: query_all(document, selectors::REVEAL_TARGETS),
    }
}

fn listen(
    target: &EventTarget,
    name: &str,
    dispatcher: &Dispatcher,
    event: PageEvent,
    prevent_default: bool,
) {
    let dispatcher = dispatcher.clone();
    let callback = Closure::<dyn FnMut(Event)>::new(move |dom_event: Event| {
        if prevent_default {
            dom_event.prevent_default();
        }
        dispatcher.send(event);
    });

    let _ = target.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref());
    callback.forget();
}

/// Returns false when the browser has no `IntersectionObserver`.
fn observe_reveal_targets(
    targets: Vec<DomElement>,
    config: &ControllerConfig,
    dispatcher: &Dispatcher,
) -> bool {
    if targets.is_empty() {
        return true;
    }

    let observed = targets.clone();
    let dispatcher = dispatcher.clone();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let node = entry.target();
                let node_js: &JsValue = node.as_ref();
                let Some(index) = observed.iter().position(|target| target.js() == node_js) else {
                    continue;
                };

                dispatcher.send(PageEvent::Intersection {
                    target: index,
                    intersecting: entry.is_intersecting(),
                });
                if dispatcher.is_revealed(index) {
                    observer.unobserve(&node);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.reveal_threshold));
    options.set_root_margin(&config.reveal_root_margin());

    let Ok(observer) =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
    else {
        return false;
    };
    for target in &targets {
        observer.observe(&target.0);
    }
    callback.forget();
    true
}

fn read_config(document: &Document, on_error: impl FnOnce(String)) -> ControllerConfig {
    let text = document
        .get_element_by_id(selectors::CONFIG_DOCUMENT)
        .and_then(|node| node.text_content())
        .unwrap_or_default();

    ControllerConfig::from_json(&text).unwrap_or_else(|err| {
        on_error(err.to_string());
        ControllerConfig::default()
    })
}

pub fn run() {
    let Some(window) = window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let mut config_error = None;
    let config = read_config(&document, |err| config_error = Some(err));
    let logger = Logger::console(config.log_level);
    if let Some(error) = config_error {
        logger.warn("config_rejected", json!({ "error": error }));
    }

    let page = bind_page(&document);
    let nav_toggle = page.nav_toggle.clone();
    let nav_links = page.nav_links.clone();
    let back_to_top = page.back_to_top.clone();
    let filter_buttons = page.filter_buttons.clone();
    let reveal_targets = page.reveal_targets.clone();
    let form = query_as::<HtmlFormElement>(&document, selectors::CONTACT_FORM);

    let host = Host {
        viewport: Box::new(DomViewport(window.clone())),
        notifier: Box::new(AlertNotifier(window.clone())),
        form: form
            .clone()
            .map(|form| Box::new(DomForm(form)) as Box<dyn ContactForm>),
    };
    let dispatcher = Dispatcher::default();
    let scheduler = WindowScheduler {
        window: window.clone(),
        dispatcher: dispatcher.clone(),
    };
    let controller = Rc::new(RefCell::new(PresentationController::new(
        config.clone(),
        page,
        host,
        scheduler,
        logger,
    )));
    dispatcher.attach(controller.clone());

    if let Some(toggle) = &nav_toggle {
        listen(toggle.target(), "click", &dispatcher, PageEvent::MenuToggled, false);
    }
    for (index, link) in nav_links.iter().enumerate() {
        listen(link.target(), "click", &dispatcher, PageEvent::LinkSelected(index), false);
    }
    if let Some(control) = &back_to_top {
        listen(control.target(), "click", &dispatcher, PageEvent::BackToTopClicked, false);
    }
    for (index, button) in filter_buttons.iter().enumerate() {
        listen(button.target(), "click", &dispatcher, PageEvent::FilterSelected(index), false);
    }
    if let Some(form) = &form {
        listen(form, "submit", &dispatcher, PageEvent::FormSubmitted, true);
    }
    listen(&window, "scroll", &dispatcher, PageEvent::Scroll, false);

    if !observe_reveal_targets(reveal_targets, &config, &dispatcher) {
        controller.borrow_mut().use_geometric_reveal();
    }

    if document.ready_state() == "loading" {
        listen(&document, "DOMContentLoaded", &dispatcher, PageEvent::Ready, false);
    } else {
        dispatcher.send(PageEvent::Ready);
    }
}
