use crate::ui::{attributes, classes, Bounds, Element};

const OPEN_BAR_STYLES: [(&str, &str); 3] = [
    ("transform", "rotate(45deg) translate(5px, 5px)"),
    ("opacity", "0"),
    ("transform", "rotate(-45deg) translate(7px, -6px)"),
];
const CLOSED_BAR_STYLES: [(&str, &str); 3] = [
    ("transform", "none"),
    ("opacity", "1"),
    ("transform", "none"),
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub menu_open: bool,
    pub active_section: Option<String>,
}

/// Elements making up the collapsible menu. Any of them may be missing.
pub struct MenuParts<'a, E> {
    pub menu: Option<&'a E>,
    pub toggle: Option<&'a E>,
    pub bars: &'a [E],
}

impl NavigationState {
    pub fn toggle_menu<E: Element>(&mut self, parts: &MenuParts<'_, E>) -> bool {
        self.set_menu_open(!self.menu_open, parts);
        self.menu_open
    }

    pub fn close_menu<E: Element>(&mut self, parts: &MenuParts<'_, E>) {
        self.set_menu_open(false, parts);
    }

    fn set_menu_open<E: Element>(&mut self, open: bool, parts: &MenuParts<'_, E>) {
        self.menu_open = open;

        if let Some(menu) = parts.menu {
            menu.toggle_class(classes::ACTIVE, open);
        }
        if let Some(toggle) = parts.toggle {
            toggle.toggle_class(classes::ACTIVE, open);
        }

        let styles = if open { &OPEN_BAR_STYLES } else { &CLOSED_BAR_STYLES };
        for (bar, (property, value)) in parts.bars.iter().zip(styles.iter()) {
            bar.set_style(property, value);
        }
    }

    /// Closes the menu and marks `links[index]` as the only active link.
    pub fn select_link<E: Element>(&mut self, index: usize, links: &[E], parts: &MenuParts<'_, E>) {
        self.close_menu(parts);
        mark_exclusive(links, index);
    }

    /// Recomputes the highlighted section from the scroll position. Leaves the
    /// current highlight alone when the probe falls outside every section; a
    /// matched section without an `id` clears every link.
    pub fn highlight_section<E: Element>(
        &mut self,
        sections: &[E],
        links: &[E],
        scroll_offset: f64,
        probe_offset: f64,
    ) -> Option<&str> {
        let boxes: Vec<(Option<String>, Bounds)> = sections
            .iter()
            .map(|section| (section.attribute(attributes::ID), section.layout_box()))
            .collect();
        let geometry: Vec<Bounds> = boxes.iter().map(|(_, bounds)| *bounds).collect();

        let index = locate_section(&geometry, scroll_offset + probe_offset)?;
        let id = boxes[index].0.clone();

        let target = id.as_ref().map(|id| format!("#{id}"));
        for link in links {
            let matches = target.is_some() && link.attribute(attributes::HREF) == target;
            link.toggle_class(classes::ACTIVE, matches);
        }

        self.active_section = id;
        self.active_section.as_deref()
    }
}

/// First section, in document order, whose box contains `probe`.
pub fn locate_section(sections: &[Bounds], probe: f64) -> Option<usize> {
    sections.iter().position(|bounds| bounds.contains(probe))
}

pub(crate) fn mark_exclusive<E: Element>(elements: &[E], index: usize) {
    for (position, element) in elements.iter().enumerate() {
        element.toggle_class(classes::ACTIVE, position == index);
    }
}
