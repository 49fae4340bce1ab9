//! Mount-lifetime guard for asynchronous operations.
//!
//! Every gateway call is started with an [`OperationTicket`] issued by the
//! [`LifecycleGuard`]. The feedback action carrying the response presents the ticket
//! again right before it writes to state. After [`LifecycleGuard::teardown`] no ticket
//! is admitted, so responses that arrive late are dropped instead of corrupting a view
//! that is gone. Requests already in flight are not aborted.

use eventdesk_core::gateway::Operation;
use std::collections::BTreeMap;

/// Proof that an operation was started while the view was mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationTicket {
    id: u64,
    operation: Operation,
}

impl OperationTicket {
    /// Operation the ticket was issued for
    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    /// Sequence number, unique per guard
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }
}

/// Issues and admits [`OperationTicket`]s for one mounted view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleGuard {
    mounted: bool,
    next_id: u64,
    in_flight: BTreeMap<u64, Operation>,
}

impl LifecycleGuard {
    /// Guard for a freshly mounted view
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mounted: true,
            next_id: 0,
            in_flight: BTreeMap::new(),
        }
    }

    /// Start tracking `operation`; `None` once torn down.
    pub fn issue(&mut self, operation: Operation) -> Option<OperationTicket> {
        if !self.mounted {
            return None;
        }

        self.next_id += 1;
        let ticket = OperationTicket {
            id: self.next_id,
            operation,
        };
        self.in_flight.insert(ticket.id, operation);
        Some(ticket)
    }

    /// Whether `ticket` would be admitted, without consuming it
    #[must_use]
    pub fn is_valid(&self, ticket: &OperationTicket) -> bool {
        self.mounted && self.in_flight.get(&ticket.id) == Some(&ticket.operation)
    }

    /// Consume `ticket`; true if its response may be written.
    ///
    /// A ticket is admitted at most once.
    pub fn admit(&mut self, ticket: OperationTicket) -> bool {
        if !self.is_valid(&ticket) {
            return false;
        }
        self.in_flight.remove(&ticket.id);
        true
    }

    /// Unmount: every outstanding ticket becomes invalid and no new ones are issued.
    ///
    /// Returns the number of operations that were still in flight.
    pub fn teardown(&mut self) -> usize {
        self.mounted = false;
        let outstanding = self.in_flight.len();
        self.in_flight.clear();
        outstanding
    }

    /// False after teardown
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Operations issued but not yet admitted
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}

impl Default for LifecycleGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn ticket_is_admitted_once() {
        let mut guard = LifecycleGuard::new();
        let ticket = guard.issue(Operation::ListEvents).unwrap();

        assert_eq!(guard.in_flight(), 1);
        assert!(guard.admit(ticket));
        assert!(!guard.admit(ticket));
        assert_eq!(guard.in_flight(), 0);
    }

    #[test]
    fn teardown_invalidates_outstanding_tickets() {
        let mut guard = LifecycleGuard::new();
        let load = guard.issue(Operation::ListEvents).unwrap();
        let book = guard.issue(Operation::BookEvent).unwrap();

        assert_eq!(guard.teardown(), 2);
        assert!(!guard.is_mounted());
        assert!(!guard.admit(load));
        assert!(!guard.is_valid(&book));
        assert!(guard.issue(Operation::ListBookings).is_none());
    }

    #[test]
    fn tickets_are_distinct() {
        let mut guard = LifecycleGuard::new();
        let first = guard.issue(Operation::ListBookings).unwrap();
        let second = guard.issue(Operation::ListBookings).unwrap();

        assert_ne!(first, second);
        assert!(second.id() > first.id());
        assert_eq!(first.operation(), Operation::ListBookings);
    }
}
