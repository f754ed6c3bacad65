// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Listener traits and the ordered registry that fans events out to them.
//!
//! Listeners take `&self`; implementations that record state use interior
//! mutability. Events are dispatched to a snapshot of the registry, so a
//! listener may add or remove listeners while being notified.

use crate::models::{chapter::Chapter, segment::Segment};
use std::rc::Rc;

/// Scrub gesture lifecycle.
///
/// Applying the final position to the media player on
/// [`on_scrub_stop`](ScrubListener::on_scrub_stop) is the listener's job;
/// the bar never seeks by itself.
pub trait ScrubListener {
    fn on_scrub_start(&self, _position_ms: i64) {}
    fn on_scrub_move(&self, _position_ms: i64) {}
    fn on_scrub_stop(&self, _position_ms: i64, _canceled: bool) {}
}

/// Chapter and segment transitions.
pub trait SegmentListener {
    /// The segment under the playback position changed (`None` when it left
    /// every segment).
    fn on_segment_changed(&self, _segment: Option<&Segment>) {}

    /// The chapter under the playback position (`drag == false`) or under
    /// the scrub position (`drag == true`) changed.
    fn on_chapter_changed(&self, _chapter: &Chapter, _drag: bool) {}
}

/// Ordered collection of shared listeners.
pub struct Listeners<L: ?Sized> {
    entries: Vec<Rc<L>>,
}

impl<L: ?Sized> Default for Listeners<L> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<L: ?Sized> Listeners<L> {
    /// Register a listener; notification order is registration order.
    pub fn add(&mut self, listener: Rc<L>) {
        self.entries.push(listener);
    }

    /// Remove a previously registered listener. Returns whether it was found.
    pub fn remove(&mut self, listener: &Rc<L>) -> bool {
        let target = Rc::as_ptr(listener).cast::<()>();
        let before = self.entries.len();
        self.entries
            .retain(|entry| Rc::as_ptr(entry).cast::<()>() != target);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy of the current registrations, safe to iterate while the
    /// registry itself changes.
    pub fn snapshot(&self) -> Vec<Rc<L>> {
        self.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl ScrubListener for Recorder {
        fn on_scrub_start(&self, position_ms: i64) {
            self.log
                .borrow_mut()
                .push(format!("{}:{}", self.name, position_ms));
        }
    }

    #[test]
    fn test_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners: Listeners<dyn ScrubListener> = Listeners::default();
        listeners.add(Rc::new(Recorder { name: "a", log: log.clone() }));
        listeners.add(Rc::new(Recorder { name: "b", log: log.clone() }));

        for l in listeners.snapshot() {
            l.on_scrub_start(5);
        }
        assert_eq!(*log.borrow(), vec!["a:5", "b:5"]);
    }

    #[test]
    fn test_remove_by_identity() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners: Listeners<dyn ScrubListener> = Listeners::default();
        let a: Rc<dyn ScrubListener> = Rc::new(Recorder { name: "a", log: log.clone() });
        let b: Rc<dyn ScrubListener> = Rc::new(Recorder { name: "b", log });
        listeners.add(a.clone());
        listeners.add(b);

        assert!(listeners.remove(&a));
        assert!(!listeners.remove(&a));
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn test_snapshot_survives_removal() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners: Listeners<dyn ScrubListener> = Listeners::default();
        let a: Rc<dyn ScrubListener> = Rc::new(Recorder { name: "a", log: log.clone() });
        listeners.add(a.clone());

        let snapshot = listeners.snapshot();
        listeners.remove(&a);
        for l in snapshot {
            l.on_scrub_start(1);
        }
        assert_eq!(*log.borrow(), vec!["a:1"]);
        assert!(listeners.is_empty());
    }
}
