//! Window-wide pointer release listeners.
//!
//! A drag that starts on the timeline must end even if the pointer is
//! released somewhere else entirely. The controller subscribes here when a
//! drag begins; the host reports every release it sees, wherever it lands.

use std::cell::Cell;
use std::rc::{Rc, Weak};

#[derive(Debug, Default)]
struct ListenerSlot {
    released: Cell<bool>,
}

/// Host-wide registry of release listeners. One per window.
#[derive(Debug, Default)]
pub struct PointerDocument {
    listeners: Vec<Weak<ListenerSlot>>,
}

/// A live listener. Dropping it detaches it from the document.
#[derive(Debug)]
pub struct ReleaseSubscription {
    slot: Rc<ListenerSlot>,
}

impl ReleaseSubscription {
    /// True once the document has seen a release since subscribing.
    pub fn fired(&self) -> bool {
        self.slot.released.get()
    }
}

impl PointerDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> ReleaseSubscription {
        self.prune();
        let slot = Rc::new(ListenerSlot::default());
        self.listeners.push(Rc::downgrade(&slot));
        ReleaseSubscription { slot }
    }

    /// A pointer button was released anywhere in the window.
    pub fn pointer_up(&mut self) {
        self.prune();
        for slot in self.listeners.iter().filter_map(Weak::upgrade) {
            slot.released.set(true);
        }
    }

    /// The pointer left the window; treated as a release.
    pub fn pointer_left(&mut self) {
        self.pointer_up();
    }

    /// Number of listeners still attached.
    pub fn active_listeners(&self) -> usize {
        self.listeners
            .iter()
            .filter(|slot| slot.strong_count() > 0)
            .count()
    }

    fn prune(&mut self) {
        self.listeners.retain(|slot| slot.strong_count() > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_reaches_every_live_listener() {
        let mut doc = PointerDocument::new();
        let a = doc.subscribe();
        let b = doc.subscribe();
        assert!(!a.fired());
        doc.pointer_up();
        assert!(a.fired() && b.fired());
    }

    #[test]
    fn test_dropping_subscription_detaches() {
        let mut doc = PointerDocument::new();
        let a = doc.subscribe();
        assert_eq!(doc.active_listeners(), 1);
        drop(a);
        assert_eq!(doc.active_listeners(), 0);
        doc.pointer_up();
        assert_eq!(doc.listeners.len(), 0);
    }

    #[test]
    fn test_later_subscription_not_fired_by_earlier_release() {
        let mut doc = PointerDocument::new();
        doc.pointer_left();
        let a = doc.subscribe();
        assert!(!a.fired());
    }
}
