use crate::ui::{classes, Bounds, Element};
use std::time::Duration;

/// Offsets each skill card's entrance animation by `index * step`.
pub fn stagger_skill_cards<E: Element>(cards: &[E], step: Duration) {
    for (index, card) in cards.iter().enumerate() {
        card.set_style("animation-delay", &animation_delay(index, step));
    }
}

fn animation_delay(index: usize, step: Duration) -> String {
    let millis = step.as_millis() * index as u128;
    format!("{}s", millis as f64 / 1_000.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    Revealed,
    AlreadyRevealed,
    OutOfView,
}

/// One-way "has been seen" flags for the animate-on-scroll containers.
#[derive(Clone, Debug, Default)]
pub struct RevealWatcher {
    animated: Vec<bool>,
}

impl RevealWatcher {
    pub fn new(targets: usize) -> Self {
        Self {
            animated: vec![false; targets],
        }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.animated.get(index).copied().unwrap_or(false)
    }

    pub fn pending(&self) -> impl Iterator<Item = usize> + '_ {
        self.animated
            .iter()
            .enumerate()
            .filter(|(_, animated)| !**animated)
            .map(|(index, _)| index)
    }

    /// Marks `target` animated the first time it is reported visible.
    pub fn observe<E: Element>(
        &mut self,
        index: usize,
        target: &E,
        intersecting: bool,
    ) -> RevealOutcome {
        let Some(animated) = self.animated.get_mut(index) else {
            return RevealOutcome::OutOfView;
        };

        if *animated {
            return RevealOutcome::AlreadyRevealed;
        }
        if !intersecting {
            return RevealOutcome::OutOfView;
        }

        *animated = true;
        target.add_class(classes::ANIMATED);
        RevealOutcome::Revealed
    }
}

/// Share of `rect` inside a viewport whose bottom edge is pulled up by
/// `bottom_margin`, as `IntersectionObserver` would report it.
pub fn visible_fraction(rect: Bounds, viewport_height: f64, bottom_margin: f64) -> f64 {
    let visible_top = rect.top.max(0.0);
    let visible_bottom = rect.bottom().min(viewport_height - bottom_margin);
    let visible = (visible_bottom - visible_top).max(0.0);

    if rect.height <= 0.0 {
        return if rect.top >= 0.0 && rect.top <= viewport_height - bottom_margin {
            1.0
        } else {
            0.0
        };
    }

    (visible / rect.height).min(1.0)
}

/// Threshold check with the observer's semantics: any overlap counts when the
/// threshold is zero.
pub fn is_intersecting(
    rect: Bounds,
    viewport_height: f64,
    bottom_margin: f64,
    threshold: f64,
) -> bool {
    let fraction = visible_fraction(rect, viewport_height, bottom_margin);
    if threshold <= 0.0 {
        fraction > 0.0
    } else {
        fraction >= threshold
    }
}
