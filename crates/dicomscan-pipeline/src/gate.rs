//! Counting gate bounding in-flight file processing
//!
//! The worker pool already caps parallelism, but the pool size can be tuned
//! independently of the processing ceiling. The gate enforces the ceiling
//! system-wide on its own: acquire before work, release after, success or
//! failure. Release happens in `Drop` so a panicking worker cannot leak a
//! slot.

use std::sync::{Condvar, Mutex};

/// A counting gate with a fixed number of slots
#[derive(Debug)]
pub struct Gate {
    slots: Mutex<usize>,
    freed: Condvar,
}

/// An acquired gate slot, returned on drop
#[derive(Debug)]
#[must_use = "dropping the permit immediately releases the slot"]
pub struct GatePermit<'a> {
    gate: &'a Gate,
}

impl Gate {
    /// Create a gate with `slots` concurrent permits (at least one)
    #[must_use]
    pub fn new(slots: usize) -> Self {
        Self {
            slots: Mutex::new(slots.max(1)),
            freed: Condvar::new(),
        }
    }

    /// Block until a slot is free and take it
    ///
    /// # Panics
    ///
    /// Panics if the gate lock is poisoned, which can only happen after a
    /// panic inside this module.
    pub fn acquire(&self) -> GatePermit<'_> {
        let mut slots = self.slots.lock().expect("gate lock poisoned");
        while *slots == 0 {
            slots = self.freed.wait(slots).expect("gate lock poisoned");
        }
        *slots -= 1;
        GatePermit { gate: self }
    }
}

impl Drop for GatePermit<'_> {
    fn drop(&mut self) {
        let mut slots = self.gate.slots.lock().expect("gate lock poisoned");
        *slots += 1;
        drop(slots);
        self.gate.freed.notify_one();
    }
}
