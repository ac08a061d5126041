use crate::ui::{attributes, classes, Element};

/// Back-to-top control is shown strictly past the threshold.
pub fn back_to_top_visible(scroll_offset: f64, threshold: f64) -> bool {
    scroll_offset > threshold
}

pub fn update_back_to_top<E: Element>(control: &E, scroll_offset: f64, threshold: f64) -> bool {
    let visible = back_to_top_visible(scroll_offset, threshold);
    control.toggle_class(classes::VISIBLE, visible);
    visible
}

/// A skill bar that fills to its target width once, the first time it
/// scrolls far enough into view.
pub struct ProgressIndicator<E> {
    element: E,
    target_percent: u8,
    animated: bool,
}

impl<E: Element> ProgressIndicator<E> {
    /// Reads the target from `data-width`. Unparsable targets become 0 and
    /// are reported through the `Err` side so the caller can log them.
    pub fn bind(element: E) -> (Self, Result<(), String>) {
        let raw = element.attribute(attributes::TARGET_WIDTH);
        let parsed = raw.as_deref().and_then(parse_percent);
        let check = match (&raw, parsed) {
            (_, Some(_)) => Ok(()),
            (Some(raw), None) => Err(raw.clone()),
            (None, None) => Err(String::new()),
        };

        let indicator = Self {
            element,
            target_percent: parsed.unwrap_or(0),
            animated: false,
        };
        (indicator, check)
    }

    pub fn target_percent(&self) -> u8 {
        self.target_percent
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    /// Fills the bar when its top edge is above `viewport_height / divisor`.
    /// Returns true only on the pass that triggers it.
    pub fn reveal(&mut self, viewport_height: f64, divisor: f64) -> bool {
        if self.animated {
            return false;
        }

        if self.element.client_rect().top < viewport_height / divisor {
            self.element
                .set_style("width", &format!("{}%", self.target_percent));
            self.animated = true;
            return true;
        }

        false
    }
}

fn parse_percent(value: &str) -> Option<u8> {
    let value = value.trim().trim_end_matches('%');
    let parsed = value.parse::<f64>().ok().filter(|value| value.is_finite())?;
    Some(parsed.round().clamp(0.0, 100.0) as u8)
}

/// Vertical shift for hero content and hero image at the given scroll offset.
pub fn parallax_offsets(scroll_offset: f64, content_factor: f64, image_factor: f64) -> (f64, f64) {
    (scroll_offset * content_factor, scroll_offset * image_factor)
}

pub fn translate_y(pixels: f64) -> String {
    format!("translateY({pixels}px)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeElement;

    #[test]
    fn back_to_top_threshold_is_exclusive() {
        assert!(!back_to_top_visible(299.0, 300.0));
        assert!(!back_to_top_visible(300.0, 300.0));
        assert!(back_to_top_visible(301.0, 300.0));
    }

    #[test]
    fn back_to_top_class_follows_offset() {
        let control = FakeElement::new();

        assert!(update_back_to_top(&control, 301.0, 300.0));
        assert!(control.has_class("visible"));
        assert!(!update_back_to_top(&control, 299.0, 300.0));
        assert!(!control.has_class("visible"));
    }

    #[test]
    fn progress_bar_fills_once_in_view_and_stays_filled() {
        let element = FakeElement::new().with_attr("data-width", "80").with_rect(900.0, 20.0);
        let (mut bar, check) = ProgressIndicator::bind(element.clone());
        assert!(check.is_ok());

        // 800 / 1.3 ≈ 615
        assert!(!bar.reveal(800.0, 1.3));
        assert_eq!(element.style("width"), None);

        element.set_rect(400.0, 20.0);
        assert!(bar.reveal(800.0, 1.3));
        assert_eq!(element.style("width").as_deref(), Some("80%"));

        element.set_rect(-2_000.0, 20.0);
        assert!(!bar.reveal(800.0, 1.3));
        assert!(bar.is_animated());
        assert_eq!(element.style("width").as_deref(), Some("80%"));
    }

    #[test]
    fn progress_targets_are_clamped_and_validated() {
        let (bar, check) = ProgressIndicator::bind(FakeElement::new().with_attr("data-width", "140"));
        assert_eq!(bar.target_percent(), 100);
        assert!(check.is_ok());

        let (bar, check) = ProgressIndicator::bind(FakeElement::new().with_attr("data-width", "lots"));
        assert_eq!(bar.target_percent(), 0);
        assert_eq!(check, Err("lots".to_string()));

        let (bar, check) = ProgressIndicator::bind(FakeElement::new().with_attr("data-width", "65%"));
        assert_eq!(bar.target_percent(), 65);
        assert!(check.is_ok());
    }

    #[test]
    fn parallax_scales_scroll_offset() {
        assert_eq!(parallax_offsets(200.0, 0.1, 0.05), (20.0, 10.0));
        assert_eq!(translate_y(20.0), "translateY(20px)");
        assert_eq!(translate_y(12.5), "translateY(12.5px)");
    }
}
