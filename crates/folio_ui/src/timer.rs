//! One-shot delayed payloads.
//!
//! Stands in for `setTimeout`: schedule a payload, advance time with
//! [`Timers::update`], collect whatever fell due.

/// Handle for cancelling a scheduled payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Pending<T> {
    id: TimerId,
    remaining: f32,
    payload: T,
}

/// A set of pending one-shot timers.
#[derive(Debug)]
pub struct Timers<T> {
    pending: Vec<Pending<T>>,
    next_id: u64,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> Timers<T> {
    /// No timers pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `payload` after `delay` seconds. A non-positive delay is
    /// delivered by the next update.
    pub fn schedule(&mut self, delay: f32, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            remaining: delay.max(0.0),
            payload,
        });
        id
    }

    /// Drops a pending timer. Returns its payload if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let index = self.pending.iter().position(|p| p.id == id)?;
        Some(self.pending.remove(index).payload)
    }

    /// Number of timers still pending.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advances by `dt` seconds and returns every payload that fell due,
    /// earliest deadline first (ties in scheduling order).
    pub fn update(&mut self, dt: f32) -> Vec<T> {
        for timer in &mut self.pending {
            timer.remaining -= dt;
        }

        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.remaining <= 0.0);
        self.pending = pending;

        due.sort_by(|a, b| a.remaining.total_cmp(&b.remaining).then(a.id.0.cmp(&b.id.0)));
        due.into_iter().map(|p| p.payload).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let mut timers = Timers::new();
        timers.schedule(0.5, "navbar");
        timers.schedule(1.0, "hero");

        assert!(timers.update(0.4).is_empty());
        assert_eq!(timers.update(0.2), vec!["navbar"]);
        assert_eq!(timers.update(0.5), vec!["hero"]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_due_in_deadline_order() {
        let mut timers = Timers::new();
        timers.schedule(0.3, 3);
        timers.schedule(0.1, 1);
        timers.schedule(0.2, 2);
        timers.schedule(0.1, 4);
        assert_eq!(timers.update(1.0), vec![1, 4, 2, 3]);
    }

    #[test]
    fn test_cancel() {
        let mut timers = Timers::new();
        let id = timers.schedule(0.1, 'a');
        assert_eq!(timers.cancel(id), Some('a'));
        assert_eq!(timers.cancel(id), None);
        assert!(timers.update(1.0).is_empty());
    }

    #[test]
    fn test_zero_delay_fires_next_update() {
        let mut timers = Timers::new();
        timers.schedule(0.0, ());
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.update(0.0).len(), 1);
    }
}
