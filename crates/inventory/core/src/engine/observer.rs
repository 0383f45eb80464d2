use super::InventoryEvent;

/// Receives events the host forwards from applied commands.
pub trait InventoryObserver {
    fn on_event(&mut self, event: &InventoryEvent);
}

impl<F> InventoryObserver for F
where
    F: FnMut(&InventoryEvent),
{
    fn on_event(&mut self, event: &InventoryEvent) {
        self(event)
    }
}

/// Handle returned by [`ObserverList::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u32);

/// Caller-owned list of observers.
///
/// The engine never stores observers; the host owns this list, feeds it the
/// events of each tick, and drops subscribers explicitly.
#[derive(Default)]
pub struct ObserverList<'a> {
    observers: Vec<(ObserverId, Box<dyn InventoryObserver + 'a>)>,
    next: u32,
}

impl<'a> ObserverList<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl InventoryObserver + 'a) -> ObserverId {
        let id = ObserverId(self.next);
        self.next += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer, _)| *observer != id);
        self.observers.len() != before
    }

    pub fn notify(&mut self, events: &[InventoryEvent]) {
        for event in events {
            for (_, observer) in &mut self.observers {
                observer.on_event(event);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{GridKind, ItemLocation};
    use crate::state::InstanceId;

    #[test]
    fn notifies_until_unsubscribed() {
        let mut seen = Vec::new();
        {
            let mut observers = ObserverList::new();
            let id = observers.subscribe(|event: &InventoryEvent| seen.push(event.clone()));
            let event = InventoryEvent::PickedUp {
                location: ItemLocation::new(GridKind::Primary, InstanceId(3)),
            };

            observers.notify(std::slice::from_ref(&event));
            assert!(observers.unsubscribe(id));
            assert!(!observers.unsubscribe(id));
            observers.notify(&[event]);
            assert!(observers.is_empty());
        }
        assert_eq!(seen.len(), 1);
    }
}
