//! Visibility-gated scheduling of recolor work.
//!
//! Candidates move `Unseen -> Observed -> Processed`. Discovery registers an
//! element with the host's viewport tracker when one exists; without a
//! tracker the element is processed immediately. The processed marker on the
//! element itself is the durable witness of the terminal state, so the
//! scheduler only has to remember what is currently observed.
//!
//! Scroll activity is collapsed by a trailing-edge [`Debouncer`]: each event
//! pushes the deadline out, and only the last event of a burst fires once
//! the quiet window elapses.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::dom::ElementHandle;

/// Host facility that reports viewport intersection for observed elements.
///
/// Owned by the scheduler for its whole life; `disconnect` is called exactly
/// once, at teardown, after which no notification may be delivered.
pub trait VisibilityTracker<H> {
    /// Start watching an element.
    fn observe(&mut self, element: &H);

    /// Stop watching everything.
    fn disconnect(&mut self);
}

/// One entry of a visibility notification batch.
#[derive(Debug, Clone)]
pub struct VisibilityEvent<H> {
    pub element: H,
    pub intersecting: bool,
    /// Fraction of the element inside the viewport.
    pub ratio: f32,
}

/// Outcome of registering a discovered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// Registered with the tracker; a visibility event will follow.
    Observed,
    /// No tracker available; the caller processes the element now.
    ProcessNow,
    /// Already observed earlier; nothing to do.
    AlreadyTracked,
}

/// Trailing-edge debouncer with an explicit, cancellable deadline.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Note an event; the pending deadline moves to `now + quiet`.
    pub fn poke(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// True once per burst, when the deadline has elapsed.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Tracks which elements are observed and owns the visibility tracker and
/// the scroll debouncer.
pub struct Scheduler<H, T> {
    tracker: Option<T>,
    observed: HashSet<H>,
    debounce: Debouncer,
}

impl<H: ElementHandle, T: VisibilityTracker<H>> Scheduler<H, T> {
    /// `tracker = None` means visibility tracking is unavailable and every
    /// discovered element is processed immediately.
    pub fn new(tracker: Option<T>, scroll_quiet: Duration) -> Self {
        Self {
            tracker,
            observed: HashSet::new(),
            debounce: Debouncer::new(scroll_quiet),
        }
    }

    /// Register a discovered, unprocessed element.
    ///
    /// Callers check the processed marker first; a marked element must never
    /// reach this point.
    pub fn register(&mut self, element: &H) -> Registration {
        match &mut self.tracker {
            Some(tracker) => {
                if !self.observed.insert(element.clone()) {
                    return Registration::AlreadyTracked;
                }
                tracker.observe(element);
                Registration::Observed
            }
            None => Registration::ProcessNow,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.tracker.is_some()
    }

    /// Note scroll activity (trailing-edge debounced).
    pub fn note_scroll(&mut self, now: Instant) {
        self.debounce.poke(now);
    }

    /// True when the debounced rescan is due; clears the deadline.
    pub fn scroll_due(&mut self, now: Instant) -> bool {
        self.debounce.fire_due(now)
    }

    pub fn scroll_pending(&self) -> bool {
        self.debounce.pending()
    }

    /// Disconnect and drop the tracker, forget observations, cancel any
    /// pending debounce. No notification may fire past this point.
    pub fn teardown(&mut self) {
        if let Some(mut tracker) = self.tracker.take() {
            tracker.disconnect();
        }
        self.observed.clear();
        self.debounce.cancel();
    }
}
