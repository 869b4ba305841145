//! FIFO ticket queue for callers blocked on an exhausted pool.

use std::collections::VecDeque;

/// Arrival-ordered queue of waiting callers.
///
/// Only the caller at the front may take a free resource, so a waiter is
/// never overtaken by one that arrived later.
#[derive(Debug, Default)]
pub(crate) struct WaitQueue {
    next_ticket: u64,
    queue: VecDeque<u64>,
}

impl WaitQueue {
    /// Join the back of the queue and get a ticket.
    pub(crate) fn enqueue(&mut self) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.queue.push_back(ticket);
        ticket
    }

    /// Whether `ticket` is next in line.
    pub(crate) fn is_front(&self, ticket: u64) -> bool {
        self.queue.front() == Some(&ticket)
    }

    /// Leave the queue, whether served, timed out or shut down.
    pub(crate) fn remove(&mut self, ticket: u64) {
        self.queue.retain(|t| *t != ticket);
    }

    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_served_in_arrival_order() {
        let mut queue = WaitQueue::default();
        let first = queue.enqueue();
        let second = queue.enqueue();
        let third = queue.enqueue();

        assert!(queue.is_front(first));
        assert!(!queue.is_front(second));

        queue.remove(first);
        assert!(queue.is_front(second));
        assert_eq!(queue.len(), 2);

        // A waiter leaving from the middle does not reorder the rest.
        queue.remove(third);
        assert!(queue.is_front(second));
        queue.remove(second);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_tickets_are_unique() {
        let mut queue = WaitQueue::default();
        let a = queue.enqueue();
        queue.remove(a);
        let b = queue.enqueue();
        assert_ne!(a, b);
    }
}
