use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingPhase {
    Typing,
    PausedAfterComplete,
    Deleting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingTimings {
    pub type_interval: Duration,
    pub delete_interval: Duration,
    pub settle_delay: Duration,
}

/// Types each role out one character at a time, holds it, erases it, and
/// moves on to the next role forever.
#[derive(Clone, Debug)]
pub struct Typewriter {
    roles: Vec<String>,
    role_index: usize,
    char_count: usize,
    phase: TypingPhase,
    timings: TypingTimings,
}

impl Typewriter {
    /// Returns `None` for an empty role cycle, which has nothing to type.
    pub fn new(roles: Vec<String>, timings: TypingTimings) -> Option<Self> {
        if roles.is_empty() {
            return None;
        }

        Some(Self {
            roles,
            role_index: 0,
            char_count: 0,
            phase: TypingPhase::Typing,
            timings,
        })
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    pub fn role_index(&self) -> usize {
        self.role_index
    }

    pub fn char_count(&self) -> usize {
        self.char_count
    }

    fn current_len(&self) -> usize {
        self.roles[self.role_index].chars().count()
    }

    pub fn visible_text(&self) -> &str {
        let role = &self.roles[self.role_index];
        let end = role
            .char_indices()
            .nth(self.char_count)
            .map(|(index, _)| index)
            .unwrap_or(role.len());
        &role[..end]
    }

    /// Advances one tick and returns how long to wait before the next one.
    pub fn step(&mut self) -> Duration {
        match self.phase {
            TypingPhase::Typing => {
                let len = self.current_len();
                if self.char_count < len {
                    self.char_count += 1;
                }

                if self.char_count >= len {
                    self.phase = TypingPhase::PausedAfterComplete;
                    self.timings.settle_delay
                } else {
                    self.timings.type_interval
                }
            }
            TypingPhase::PausedAfterComplete => {
                self.phase = TypingPhase::Deleting;
                self.erase()
            }
            TypingPhase::Deleting => self.erase(),
        }
    }

    fn erase(&mut self) -> Duration {
        self.char_count = self.char_count.saturating_sub(1);

        if self.char_count == 0 {
            self.role_index = (self.role_index + 1) % self.roles.len();
            self.phase = TypingPhase::Typing;
            self.timings.type_interval
        } else {
            self.timings.delete_interval
        }
    }
}
