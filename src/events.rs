//! Timeline notifications and a small subscription list.

use std::sync::mpsc::{channel, Receiver};

/// Notifications produced by the timeline core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineEvent {
    /// A selection was added or deleted, or all selections were cleared
    SelectionsChanged,
    /// The time under the pointer changed (`None` when the pointer left)
    HoverPositionChanged(Option<i64>),
    /// The user asked to move the playhead to this position
    PositionChangeRequested(i64),
}

/// Handle returned by [`Observers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<E> = Box<dyn FnMut(&E)>;

/// Ordered list of listeners. Listeners run synchronously, in subscription
/// order, on the thread that emits the event.
pub struct Observers<E> {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Callback<E>)>,
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }
}

impl<E> std::fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<E: Clone + 'static> Observers<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Subscribes a channel sender and returns the receiving end.
    ///
    /// Useful when the receiver needs to mutate the object that emits the
    /// events: drain the receiver after the emitting call returns.
    /// A listener whose receiver was dropped just stops delivering.
    pub fn channel(&mut self) -> Receiver<E> {
        let (sender, receiver) = channel();
        self.subscribe(move |event: &E| {
            let _ = sender.send(event.clone());
        });
        receiver
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn notify(&mut self, event: &E) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_notify_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();

        let first = Rc::clone(&seen);
        observers.subscribe(move |e: &TimelineEvent| first.borrow_mut().push((1, *e)));
        let second = Rc::clone(&seen);
        observers.subscribe(move |e: &TimelineEvent| second.borrow_mut().push((2, *e)));

        observers.notify(&TimelineEvent::SelectionsChanged);
        assert_eq!(
            *seen.borrow(),
            vec![(1, TimelineEvent::SelectionsChanged), (2, TimelineEvent::SelectionsChanged)]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut observers = Observers::new();
        let counter = Rc::clone(&count);
        let id = observers.subscribe(move |_: &TimelineEvent| *counter.borrow_mut() += 1);

        observers.notify(&TimelineEvent::PositionChangeRequested(5));
        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        observers.notify(&TimelineEvent::PositionChangeRequested(6));

        assert_eq!(*count.borrow(), 1);
        assert!(observers.is_empty());
    }

    #[test]
    fn test_channel_delivery() {
        let mut observers = Observers::new();
        let receiver = observers.channel();
        observers.notify(&TimelineEvent::HoverPositionChanged(Some(42)));
        observers.notify(&TimelineEvent::HoverPositionChanged(None));

        let received: Vec<_> = receiver.try_iter().collect();
        assert_eq!(
            received,
            vec![
                TimelineEvent::HoverPositionChanged(Some(42)),
                TimelineEvent::HoverPositionChanged(None)
            ]
        );
    }

    #[test]
    fn test_channel_with_dropped_receiver() {
        let mut observers = Observers::new();
        drop(observers.channel());
        observers.notify(&TimelineEvent::SelectionsChanged);
        assert_eq!(observers.len(), 1);
    }
}
