//! Bounded resource pool.
//!
//! The pool depletes actively (action costs, penalties) and passively
//! (symptom drain over time) and can be restored. `current` never leaves
//! `[0, max]`: every mutation clamps instead of failing.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// Resource pool with clamped depletion and restoration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceBar {
    current: f64,
    max: f64,
    passive_drain_rate: f64,
}

impl ResourceBar {
    /// Create a bar with `current` clamped into `[0, max]`.
    #[must_use]
    pub fn new(current: f64, max: f64) -> Self {
        let max = max.max(0.0);
        Self {
            current: current.clamp(0.0, max),
            max,
            passive_drain_rate: 0.0,
        }
    }

    /// Create a full bar.
    #[must_use]
    pub fn full(max: f64) -> Self {
        Self::new(max, max)
    }

    #[must_use]
    pub fn current(&self) -> f64 {
        self.current
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Resource units drained per second.
    #[must_use]
    pub fn passive_drain_rate(&self) -> f64 {
        self.passive_drain_rate
    }

    /// Spend `amount`, clamping at zero.
    ///
    /// Returns whether any resources remain. Over-consumption is not an
    /// error: the bar just empties. Negative amounts are treated as zero.
    pub fn consume(&mut self, amount: f64) -> bool {
        self.current = (self.current - amount.max(0.0)).max(0.0);
        self.current > 0.0
    }

    /// Apply passive drain for `dt` milliseconds.
    pub fn passive_drain(&mut self, dt: f64) {
        let drained = self.passive_drain_rate * dt.max(0.0) / 1000.0;
        self.current = (self.current - drained).max(0.0);
    }

    /// Add `amount`, clamping at `max`.
    pub fn restore(&mut self, amount: f64) {
        self.current = (self.current + amount.max(0.0)).min(self.max);
    }

    /// Replace the passive drain rate. Negative rates clamp to zero.
    pub fn set_drain_rate(&mut self, rate: f64) {
        self.passive_drain_rate = rate.max(0.0);
    }

    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Fill level in percent (0 when `max` is not positive).
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.max <= 0.0 {
            0.0
        } else {
            100.0 * self.current / self.max
        }
    }
}

/// Shared handle to the session's single resource pool.
///
/// The level manager mutates the pool and the defeat checker reads it; both
/// hold clones of this handle so they always observe the same value.
/// Borrows are short and never held across calls.
#[derive(Clone, Debug)]
pub struct SharedResourceBar(Rc<RefCell<ResourceBar>>);

impl SharedResourceBar {
    #[must_use]
    pub fn new(bar: ResourceBar) -> Self {
        Self(Rc::new(RefCell::new(bar)))
    }

    /// Immutable view of the pool.
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, ResourceBar> {
        self.0.borrow()
    }

    /// Mutable view of the pool.
    #[must_use]
    pub fn borrow_mut(&self) -> RefMut<'_, ResourceBar> {
        self.0.borrow_mut()
    }

    /// Do two handles point at the same pool?
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Copy of the current pool state.
    #[must_use]
    pub fn snapshot(&self) -> ResourceBar {
        self.0.borrow().clone()
    }
}
