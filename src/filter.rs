use crate::{
    error::FilterError,
    ui::{attributes, Element},
};

pub const ALL: &str = "all";

/// Whether an item of `category` is shown while `selected` is active.
pub fn is_visible(selected: &str, category: &str) -> bool {
    selected == ALL || selected == category
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Put back into layout now, fade in shortly after.
    Show,
    /// Fade out now, drop out of layout once the fade has played.
    Hide,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterState {
    selected: String,
    categories: Vec<String>,
}

impl FilterState {
    /// The selectable set is `all` plus whatever the filter buttons offer.
    pub fn new<E: Element>(buttons: &[E]) -> Self {
        let mut categories = vec![ALL.to_string()];
        for category in buttons.iter().filter_map(|button| button.attribute(attributes::FILTER)) {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }

        Self {
            selected: ALL.to_string(),
            categories,
        }
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Selects `category` and returns the transition each item needs, in
    /// item order.
    pub fn apply<E: Element>(
        &mut self,
        category: &str,
        items: &[E],
    ) -> Result<Vec<Transition>, FilterError> {
        if !self.categories.iter().any(|known| known == category) {
            return Err(FilterError::UnknownCategory(category.to_string()));
        }

        self.selected = category.to_string();
        Ok(items
            .iter()
            .map(|item| {
                if self.item_visible(item) {
                    Transition::Show
                } else {
                    Transition::Hide
                }
            })
            .collect())
    }

    pub fn item_visible<E: Element>(&self, item: &E) -> bool {
        let category = item.attribute(attributes::CATEGORY).unwrap_or_default();
        is_visible(&self.selected, &category)
    }
}

pub fn begin_show<E: Element>(item: &E) {
    item.set_style("display", "block");
}

pub fn finish_show<E: Element>(item: &E) {
    item.set_style("opacity", "1");
    item.set_style("transform", "scale(1)");
}

pub fn begin_hide<E: Element>(item: &E) {
    item.set_style("opacity", "0");
    item.set_style("transform", "scale(0.8)");
}

pub fn finish_hide<E: Element>(item: &E) {
    item.set_style("display", "none");
}
