use crate::{
    config::ControllerConfig,
    contact,
    error::{BindingError, FilterError},
    filter::{self, FilterState, Transition},
    logging::Logger,
    navigation::{MenuParts, NavigationState},
    reveal::{self, RevealOutcome, RevealWatcher},
    schedule::{ManualScheduler, Scheduler, Task, TimerId},
    scroll::{self, ProgressIndicator},
    typing::{TypingTimings, Typewriter},
    ui::{attributes, classes, selectors, ContactForm, Element, Notifier, Viewport},
};
use serde_json::json;
use std::time::Duration;

/// Everything the page can tell the controller about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageEvent {
    Ready,
    Scroll,
    MenuToggled,
    LinkSelected(usize),
    BackToTopClicked,
    FilterSelected(usize),
    FormSubmitted,
    Intersection { target: usize, intersecting: bool },
    Timer(Task),
}

/// Elements the controller drives. Absent entries disable the behaviour
/// that needs them; they never stop the rest of the page from working.
pub struct PageBindings<E> {
    pub typing_text: Option<E>,
    pub nav_toggle: Option<E>,
    pub nav_toggle_bars: Vec<E>,
    pub nav_menu: Option<E>,
    pub nav_links: Vec<E>,
    pub back_to_top: Option<E>,
    pub sections: Vec<E>,
    pub progress_bars: Vec<E>,
    pub hero: Option<E>,
    pub hero_content: Option<E>,
    pub hero_image: Option<E>,
    pub filter_buttons: Vec<E>,
    pub portfolio_items: Vec<E>,
    pub skill_cards: Vec<E>,
    pub reveal_targets: Vec<E>,
}

impl<E> Default for PageBindings<E> {
    fn default() -> Self {
        Self {
            typing_text: None,
            nav_toggle: None,
            nav_toggle_bars: Vec::new(),
            nav_menu: None,
            nav_links: Vec::new(),
            back_to_top: None,
            sections: Vec::new(),
            progress_bars: Vec::new(),
            hero: None,
            hero_content: None,
            hero_image: None,
            filter_buttons: Vec::new(),
            portfolio_items: Vec::new(),
            skill_cards: Vec::new(),
            reveal_targets: Vec::new(),
        }
    }
}

impl<E> PageBindings<E> {
    pub fn missing(&self) -> Vec<BindingError> {
        let singles = [
            (self.typing_text.is_none(), selectors::TYPING_TEXT),
            (self.nav_toggle.is_none(), selectors::NAV_TOGGLE),
            (self.nav_menu.is_none(), selectors::NAV_MENU),
            (self.back_to_top.is_none(), selectors::BACK_TO_TOP),
            (self.hero.is_none(), selectors::HERO),
            (self.hero_content.is_none(), selectors::HERO_CONTENT),
            (self.hero_image.is_none(), selectors::HERO_IMAGE),
        ];
        let collections = [
            (self.nav_links.is_empty(), selectors::NAV_LINKS),
            (self.filter_buttons.is_empty(), selectors::FILTER_BUTTONS),
            (self.portfolio_items.is_empty(), selectors::PORTFOLIO_ITEMS),
            (self.progress_bars.is_empty(), selectors::PROGRESS_BARS),
            (self.nav_toggle_bars.is_empty(), selectors::NAV_TOGGLE_BARS),
            (self.sections.is_empty(), selectors::SECTIONS),
            (self.skill_cards.is_empty(), selectors::SKILL_CARDS),
            (self.reveal_targets.is_empty(), selectors::REVEAL_TARGETS),
        ];

        singles
            .into_iter()
            .filter(|(missing, _)| *missing)
            .map(|(_, selector)| BindingError::MissingElement { selector })
            .chain(
                collections
                    .into_iter()
                    .filter(|(missing, _)| *missing)
                    .map(|(_, selector)| BindingError::MissingCollection { selector }),
            )
            .collect()
    }
}

/// Window-level capabilities the controller borrows from its host.
pub struct Host {
    pub viewport: Box<dyn Viewport>,
    pub notifier: Box<dyn Notifier>,
    pub form: Option<Box<dyn ContactForm>>,
}

pub struct PresentationController<E, S> {
    config: ControllerConfig,
    logger: Logger,
    page: PageBindings<E>,
    host: Host,
    scheduler: S,
    typewriter: Option<Typewriter>,
    typing_timer: Option<TimerId>,
    navigation: NavigationState,
    filter: FilterState,
    progress: Vec<ProgressIndicator<E>>,
    reveal: RevealWatcher,
    geometric_reveal: bool,
}

impl<E: Element, S: Scheduler> PresentationController<E, S> {
    pub fn new(
        config: ControllerConfig,
        mut page: PageBindings<E>,
        host: Host,
        scheduler: S,
        logger: Logger,
    ) -> Self {
        for missing in page.missing() {
            logger.warn(
                "binding_missing",
                json!({ "selector": missing.selector(), "error": missing.to_string() }),
            );
        }
        if host.form.is_none() {
            let missing = BindingError::MissingElement {
                selector: selectors::CONTACT_FORM,
            };
            logger.warn(
                "binding_missing",
                json!({ "selector": missing.selector(), "error": missing.to_string() }),
            );
        }

        let progress = std::mem::take(&mut page.progress_bars)
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                let (indicator, check) = ProgressIndicator::bind(element);
                if let Err(raw) = check {
                    logger.warn(
                        "progress_target_invalid",
                        json!({ "index": index, "value": raw }),
                    );
                }
                indicator
            })
            .collect();

        let typewriter = Typewriter::new(
            config.roles.clone(),
            TypingTimings {
                type_interval: config.type_interval,
                delete_interval: config.delete_interval,
                settle_delay: config.settle_delay,
            },
        );
        let filter = FilterState::new(&page.filter_buttons);
        let reveal = RevealWatcher::new(page.reveal_targets.len());

        Self {
            config,
            logger,
            page,
            host,
            scheduler,
            typewriter,
            typing_timer: None,
            navigation: NavigationState::default(),
            filter,
            progress,
            reveal,
            geometric_reveal: false,
        }
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn typewriter(&self) -> Option<&Typewriter> {
        self.typewriter.as_ref()
    }

    pub fn is_typing(&self) -> bool {
        self.typing_timer.is_some()
    }

    pub fn is_revealed(&self, target: usize) -> bool {
        self.reveal.is_revealed(target)
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Reveal containers from scroll geometry instead of visibility events,
    /// for hosts without `IntersectionObserver`.
    pub fn use_geometric_reveal(&mut self) {
        self.geometric_reveal = true;
    }

    pub fn handle(&mut self, event: PageEvent) {
        match event {
            PageEvent::Ready => self.on_ready(),
            PageEvent::Scroll => self.on_scroll(),
            PageEvent::MenuToggled => self.toggle_menu(),
            PageEvent::LinkSelected(index) => self.select_link(index),
            PageEvent::BackToTopClicked => self.back_to_top(),
            PageEvent::FilterSelected(index) => self.select_filter_button(index),
            PageEvent::FormSubmitted => self.submit_contact(),
            PageEvent::Intersection {
                target,
                intersecting,
            } => self.on_intersection(target, intersecting),
            PageEvent::Timer(task) => self.on_timer(task),
        }
    }

    fn on_ready(&mut self) {
        self.reveal_progress();
        reveal::stagger_skill_cards(&self.page.skill_cards, self.config.skill_stagger);
        if self.geometric_reveal {
            self.reveal_by_geometry();
        }
        self.start_typing();

        self.logger.info(
            "controller_ready",
            json!({
                "navLinks": self.page.nav_links.len(),
                "sections": self.page.sections.len(),
                "portfolioItems": self.page.portfolio_items.len(),
                "progressBars": self.progress.len(),
                "revealTargets": self.page.reveal_targets.len(),
            }),
        );
    }

    fn on_scroll(&mut self) {
        let offset = self.host.viewport.scroll_offset();

        if let Some(control) = &self.page.back_to_top {
            scroll::update_back_to_top(control, offset, self.config.back_to_top_threshold_px);
        }

        self.navigation.highlight_section(
            &self.page.sections,
            &self.page.nav_links,
            offset,
            self.config.section_probe_offset_px,
        );

        self.reveal_progress();
        self.apply_parallax(offset);

        if self.geometric_reveal {
            self.reveal_by_geometry();
        }
    }

    fn menu_parts(page: &PageBindings<E>) -> MenuParts<'_, E> {
        MenuParts {
            menu: page.nav_menu.as_ref(),
            toggle: page.nav_toggle.as_ref(),
            bars: &page.nav_toggle_bars,
        }
    }

    fn toggle_menu(&mut self) {
        if self.page.nav_toggle.is_none() && self.page.nav_menu.is_none() {
            return;
        }

        let open = self
            .navigation
            .toggle_menu(&Self::menu_parts(&self.page));
        self.logger.debug("menu_toggled", json!({ "open": open }));
    }

    fn select_link(&mut self, index: usize) {
        if index >= self.page.nav_links.len() {
            return;
        }

        self.navigation
            .select_link(index, &self.page.nav_links, &Self::menu_parts(&self.page));
        let href = self.page.nav_links[index].attribute(attributes::HREF);
        self.logger.debug("link_selected", json!({ "index": index, "href": href }));
    }

    fn back_to_top(&mut self) {
        self.host.viewport.scroll_to_top();
        self.logger.debug("back_to_top", json!({}));
    }

    fn select_filter_button(&mut self, index: usize) {
        let Some(category) = self
            .page
            .filter_buttons
            .get(index)
            .and_then(|button| button.attribute(attributes::FILTER))
        else {
            return;
        };

        let _ = self.select_category(&category);
    }

    /// Switches the portfolio to `category` (or `all`), marking its filter
    /// button active and starting the fade transitions.
    pub fn select_category(&mut self, category: &str) -> Result<(), FilterError> {
        let transitions = match self.filter.apply(category, &self.page.portfolio_items) {
            Ok(transitions) => transitions,
            Err(err) => {
                self.logger.warn(
                    "filter_rejected",
                    json!({ "category": category, "error": err.to_string() }),
                );
                return Err(err);
            }
        };

        for button in &self.page.filter_buttons {
            let selected = button.attribute(attributes::FILTER).as_deref() == Some(category);
            button.toggle_class(classes::ACTIVE, selected);
        }

        let mut shown = 0;
        for (item, (element, transition)) in self
            .page
            .portfolio_items
            .iter()
            .zip(transitions)
            .enumerate()
        {
            match transition {
                Transition::Show => {
                    shown += 1;
                    filter::begin_show(element);
                    self.scheduler
                        .schedule(self.config.filter_fade_in_delay, Task::FilterFadeIn { item });
                }
                Transition::Hide => {
                    filter::begin_hide(element);
                    self.scheduler.schedule(
                        self.config.filter_collapse_delay,
                        Task::FilterCollapse { item },
                    );
                }
            }
        }

        self.logger.info(
            "filter_applied",
            json!({ "category": category, "shown": shown, "total": self.page.portfolio_items.len() }),
        );
        Ok(())
    }

    fn submit_contact(&mut self) {
        let Some(form) = self.host.form.as_deref() else {
            return;
        };

        let submission = contact::submit(form, &*self.host.notifier);
        self.logger.info(
            "contact_submitted",
            json!({
                "hasName": !submission.name.is_empty(),
                "hasEmail": !submission.email.is_empty(),
                "hasSubject": !submission.subject.is_empty(),
                "hasMessage": !submission.message.is_empty(),
            }),
        );
    }

    fn on_intersection(&mut self, target: usize, intersecting: bool) {
        let Some(element) = self.page.reveal_targets.get(target) else {
            return;
        };

        if self.reveal.observe(target, element, intersecting) == RevealOutcome::Revealed {
            self.logger.debug("section_revealed", json!({ "target": target }));
        }
    }

    fn reveal_by_geometry(&mut self) {
        let height = self.host.viewport.height();
        let pending: Vec<usize> = self.reveal.pending().collect();

        for target in pending {
            let rect = self.page.reveal_targets[target].client_rect();
            let intersecting = reveal::is_intersecting(
                rect,
                height,
                self.config.reveal_bottom_margin_px,
                self.config.reveal_threshold,
            );
            self.on_intersection(target, intersecting);
        }
    }

    fn reveal_progress(&mut self) {
        let height = self.host.viewport.height();
        for (index, indicator) in self.progress.iter_mut().enumerate() {
            if indicator.reveal(height, self.config.progress_reveal_divisor) {
                self.logger.debug(
                    "progress_revealed",
                    json!({ "index": index, "percent": indicator.target_percent() }),
                );
            }
        }
    }

    fn apply_parallax(&self, offset: f64) {
        let (Some(_), Some(content), Some(image)) = (
            &self.page.hero,
            &self.page.hero_content,
            &self.page.hero_image,
        ) else {
            return;
        };

        let (content_shift, image_shift) = scroll::parallax_offsets(
            offset,
            self.config.hero_content_parallax,
            self.config.hero_image_parallax,
        );
        content.set_style("transform", &scroll::translate_y(content_shift));
        image.set_style("transform", &scroll::translate_y(image_shift));
    }

    /// Schedules the first typing tick after the startup delay, replacing any
    /// animation already running.
    pub fn start_typing(&mut self) {
        if self.page.typing_text.is_none() || self.typewriter.is_none() {
            return;
        }

        if let Some(id) = self.typing_timer.take() {
            self.scheduler.cancel(id);
        }
        self.typing_timer = Some(
            self.scheduler
                .schedule(self.config.startup_delay, Task::TypingTick),
        );
        self.logger.debug(
            "typing_started",
            json!({ "roles": self.config.roles.len() }),
        );
    }

    pub fn cancel_typing(&mut self) {
        if let Some(id) = self.typing_timer.take() {
            self.scheduler.cancel(id);
            self.logger.debug("typing_cancelled", json!({}));
        }
    }

    fn on_timer(&mut self, task: Task) {
        match task {
            Task::TypingTick => self.typing_tick(),
            Task::FilterFadeIn { item } => {
                if let Some(element) = self.page.portfolio_items.get(item) {
                    if self.filter.item_visible(element) {
                        filter::finish_show(element);
                    }
                }
            }
            Task::FilterCollapse { item } => {
                if let Some(element) = self.page.portfolio_items.get(item) {
                    if !self.filter.item_visible(element) {
                        filter::finish_hide(element);
                    }
                }
            }
        }
    }

    fn typing_tick(&mut self) {
        if self.typing_timer.is_none() {
            return;
        }
        let (Some(writer), Some(target)) = (self.typewriter.as_mut(), self.page.typing_text.as_ref())
        else {
            return;
        };

        let delay = writer.step();
        target.set_text(writer.visible_text());
        self.typing_timer = Some(self.scheduler.schedule(delay, Task::TypingTick));
    }
}

impl<E: Element> PresentationController<E, ManualScheduler> {
    /// Moves the virtual clock forward, delivering every timer that falls due.
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.handle(PageEvent::Timer(task));
        }
    }
}
