//! Listener bookkeeping for spring lifecycle events.
//!
//! Listeners are stored in registration order together with the event they
//! were registered for. Dispatch works on a snapshot so a listener can add or
//! remove listeners (or stop the spring) while an event is being delivered.

use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::spring::Spring;

/// Callback invoked with the spring that fired the event.
///
/// Listeners are identified by their allocation: pass a clone of the same
/// `Rc` to [`Spring::remove_listener`] to unregister it.
pub type Listener = Rc<dyn Fn(&Spring)>;

/// Wraps a closure as a [`Listener`].
pub fn listener(callback: impl Fn(&Spring) + 'static) -> Listener { Rc::new(callback) }

/// Listeners captured for a single dispatch.
pub(crate) type ListenerSnapshot = SmallVec<[Listener; 4]>;

/// Lifecycle event a listener is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// The spring started animating.
    Start,
    /// The spring computed a new value.
    Update,
    /// The spring stopped, either at rest or because it was stopped.
    Stop,
}

/// Insertion-ordered listener registry.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    entries: Vec<(ListenerKind, Listener)>,
}

impl ListenerRegistry {
    /// Registers `listener` for `kind`. Duplicates are allowed.
    pub fn add(&mut self, kind: ListenerKind, listener: Listener) {
        self.entries.push((kind, listener));
    }

    /// Removes the first registration of `listener`, whatever its kind.
    ///
    /// Returns whether a registration was removed.
    pub fn remove(&mut self, listener: &Listener) -> bool {
        let position = self.entries.iter().position(|(_, existing)| Rc::ptr_eq(existing, listener));

        position.is_some_and(|index| {
            self.entries.remove(index);
            true
        })
    }

    /// Removes every registration.
    pub fn clear(&mut self) { self.entries.clear(); }

    /// Returns the listeners registered for `kind`, in registration order.
    pub fn snapshot(&self, kind: ListenerKind) -> ListenerSnapshot {
        self.entries
            .iter()
            .filter(|(entry_kind, _)| *entry_kind == kind)
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }

    /// Returns the number of registrations for `kind`.
    pub fn count(&self, kind: ListenerKind) -> usize {
        self.entries.iter().filter(|(entry_kind, _)| *entry_kind == kind).count()
    }

    /// Returns the total number of registrations.
    #[cfg(test)]
    pub fn len(&self) -> usize { self.entries.len() }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("start", &self.count(ListenerKind::Start))
            .field("update", &self.count(ListenerKind::Update))
            .field("stop", &self.count(ListenerKind::Stop))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Listener { Rc::new(|_: &Spring| {}) }

    #[test]
    fn test_snapshot_preserves_registration_order() {
        let first = noop();
        let second = noop();
        let mut registry = ListenerRegistry::default();
        registry.add(ListenerKind::Update, Rc::clone(&first));
        registry.add(ListenerKind::Stop, noop());
        registry.add(ListenerKind::Update, Rc::clone(&second));

        let snapshot = registry.snapshot(ListenerKind::Update);
        assert_eq!(snapshot.len(), 2);
        assert!(Rc::ptr_eq(&snapshot[0], &first));
        assert!(Rc::ptr_eq(&snapshot[1], &second));
    }

    #[test]
    fn test_remove_only_first_match() {
        let listener = noop();
        let mut registry = ListenerRegistry::default();
        registry.add(ListenerKind::Update, Rc::clone(&listener));
        registry.add(ListenerKind::Update, Rc::clone(&listener));
        registry.add(ListenerKind::Start, noop());

        assert!(registry.remove(&listener));
        assert_eq!(registry.count(ListenerKind::Update), 1);
        assert_eq!(registry.count(ListenerKind::Start), 1);

        assert!(registry.remove(&listener));
        assert!(!registry.remove(&listener));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_searches_every_kind() {
        let listener = noop();
        let mut registry = ListenerRegistry::default();
        registry.add(ListenerKind::Update, noop());
        registry.add(ListenerKind::Stop, Rc::clone(&listener));

        assert!(registry.remove(&listener));
        assert_eq!(registry.count(ListenerKind::Stop), 0);
        assert_eq!(registry.count(ListenerKind::Update), 1);
    }

    #[test]
    fn test_clear_empties_registry() {
        let mut registry = ListenerRegistry::default();
        registry.add(ListenerKind::Start, noop());
        registry.add(ListenerKind::Update, noop());
        registry.add(ListenerKind::Stop, noop());

        registry.clear();
        assert_eq!(registry.len(), 0);
        assert!(registry.snapshot(ListenerKind::Update).is_empty());
    }

    #[test]
    fn test_debug_reports_counts() {
        let mut registry = ListenerRegistry::default();
        registry.add(ListenerKind::Update, noop());
        let debug = format!("{registry:?}");
        assert!(debug.contains("update: 1"));
    }
}
