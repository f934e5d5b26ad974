//! Cancellable single-slot timer for keystroke searches.
//!
//! At most one execution is pending. Scheduling again supersedes it, and a
//! superseded or cancelled ticket never fires. Time is a caller-supplied
//! offset from any fixed origin; hosts with real timers can ignore it and
//! hand tickets back through [`Debounce::fire`].

use std::time::Duration;

/// Identifies one scheduled execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    /// Raw ticket number, for passing through host timer callbacks.
    pub fn get(self) -> u64 {
        self.0
    }

    /// Rebuilds a ticket from [`Ticket::get`].
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Result of [`Debounce::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    /// The new pending execution.
    pub ticket: Ticket,
    /// The execution it replaced, if one was pending.
    pub superseded: Option<Ticket>,
    /// How long the host should wait before firing.
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    ticket: Ticket,
    due: Duration,
}

/// Debounce state machine.
#[derive(Debug, Clone)]
pub struct Debounce {
    quiet: Duration,
    next: u64,
    pending: Option<Pending>,
}

impl Debounce {
    /// A debounce that fires after `quiet` without new input.
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            next: 0,
            pending: None,
        }
    }

    /// The quiet period.
    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Schedules an execution at `now + quiet`, replacing any pending one.
    pub fn schedule(&mut self, now: Duration) -> Scheduled {
        self.next += 1;
        let ticket = Ticket(self.next);
        let superseded = self
            .pending
            .replace(Pending {
                ticket,
                due: now + self.quiet,
            })
            .map(|p| p.ticket);
        Scheduled {
            ticket,
            superseded,
            delay: self.quiet,
        }
    }

    /// Drops the pending execution, returning its ticket.
    pub fn cancel(&mut self) -> Option<Ticket> {
        self.pending.take().map(|p| p.ticket)
    }

    /// Consumes `ticket` if it is the pending one.
    ///
    /// Returns true if the caller should run the search now; false for a
    /// ticket that was superseded, cancelled, or already fired.
    pub fn fire(&mut self, ticket: Ticket) -> bool {
        match self.pending {
            Some(p) if p.ticket == ticket => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Fires the pending execution if it is due at `now`.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.pending {
            Some(p) if p.due <= now => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Returns true if an execution is pending.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fires_after_quiet_period() {
        let mut d = Debounce::new(ms(300));
        d.schedule(ms(0));
        assert!(!d.poll(ms(299)));
        assert!(d.poll(ms(300)));
        assert!(!d.is_pending());
        assert!(!d.poll(ms(600)), "fired twice");
    }

    #[test]
    fn new_keystroke_restarts_timer() {
        let mut d = Debounce::new(ms(300));
        let first = d.schedule(ms(0));
        let second = d.schedule(ms(200));
        assert_eq!(second.superseded, Some(first.ticket));
        assert!(!d.poll(ms(300)));
        assert!(d.poll(ms(500)));
    }

    #[test]
    fn superseded_ticket_is_a_no_op() {
        let mut d = Debounce::new(ms(300));
        let first = d.schedule(ms(0));
        let second = d.schedule(ms(10));
        assert!(!d.fire(first.ticket));
        assert!(d.fire(second.ticket));
        assert!(!d.fire(second.ticket));
    }

    #[test]
    fn cancel_after_fire_is_a_no_op() {
        let mut d = Debounce::new(ms(300));
        let s = d.schedule(ms(0));
        assert!(d.fire(s.ticket));
        assert_eq!(d.cancel(), None);
    }

    #[test]
    fn cancelled_ticket_never_fires() {
        let mut d = Debounce::new(ms(300));
        let s = d.schedule(ms(0));
        assert_eq!(d.cancel(), Some(s.ticket));
        assert!(!d.fire(s.ticket));
        assert!(!d.poll(ms(1000)));
    }

    #[test]
    fn ticket_round_trips_through_raw() {
        let mut d = Debounce::new(ms(1));
        let s = d.schedule(ms(0));
        assert!(d.fire(Ticket::from_raw(s.ticket.get())));
    }
}
