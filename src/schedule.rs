use std::{collections::BTreeMap, time::Duration};

/// Timed follow-ups the controller asks its host to deliver later.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    TypingTick,
    FilterFadeIn { item: usize },
    FilterCollapse { item: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, task: Task) -> TimerId;
    fn cancel(&mut self, id: TimerId);
}

/// Virtual-clock scheduler for headless hosts and tests.
///
/// Tasks fire in due-time order; ties keep insertion order.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, u64), Task>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_pending(&self, task: Task) -> bool {
        self.queue.values().any(|queued| *queued == task)
    }

    /// Removes the earliest task due at or before `until`, moving the clock
    /// to its due time. Once nothing is due the clock settles on `until`.
    pub fn pop_due(&mut self, until: Duration) -> Option<Task> {
        let key = self
            .queue
            .keys()
            .next()
            .copied()
            .filter(|(due, _)| *due <= until);

        match key {
            Some(key) => {
                self.now = self.now.max(key.0);
                self.queue.remove(&key)
            }
            None => {
                self.now = self.now.max(until);
                None
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, task: Task) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.queue.insert((self.now + delay, id), task);
        TimerId(id)
    }

    fn cancel(&mut self, id: TimerId) {
        self.queue.retain(|(_, queued_id), _| *queued_id != id.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_fire_in_due_order() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(Duration::from_millis(300), Task::FilterCollapse { item: 0 });
        scheduler.schedule(Duration::from_millis(10), Task::FilterFadeIn { item: 1 });

        let until = Duration::from_millis(500);
        assert_eq!(scheduler.pop_due(until), Some(Task::FilterFadeIn { item: 1 }));
        assert_eq!(scheduler.now(), Duration::from_millis(10));
        assert_eq!(scheduler.pop_due(until), Some(Task::FilterCollapse { item: 0 }));
        assert_eq!(scheduler.pop_due(until), None);
        assert_eq!(scheduler.now(), until);
    }

    #[test]
    fn tasks_not_yet_due_stay_queued() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(Duration::from_millis(100), Task::TypingTick);

        assert_eq!(scheduler.pop_due(Duration::from_millis(99)), None);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.pop_due(Duration::from_millis(100)), Some(Task::TypingTick));
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut scheduler = ManualScheduler::new();
        let id = scheduler.schedule(Duration::from_millis(5), Task::TypingTick);
        scheduler.cancel(id);

        assert_eq!(scheduler.pop_due(Duration::from_secs(1)), None);
        assert!(!scheduler.is_pending(Task::TypingTick));
    }

    #[test]
    fn delays_are_relative_to_current_time() {
        let mut scheduler = ManualScheduler::new();
        scheduler.pop_due(Duration::from_millis(1_000));
        scheduler.schedule(Duration::from_millis(50), Task::TypingTick);

        assert_eq!(scheduler.pop_due(Duration::from_millis(1_049)), None);
        assert_eq!(scheduler.pop_due(Duration::from_millis(1_050)), Some(Task::TypingTick));
    }
}
