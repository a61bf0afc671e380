//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - RNG seeding from the host clock
//! - Canvas mounting, animation frames and resize events (web)
//! - Callback targets that do not outlive teardown

use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Milliseconds since the Unix epoch, used to seed the RNG
#[cfg(target_arch = "wasm32")]
pub fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Milliseconds since the Unix epoch, used to seed the RNG
#[cfg(not(target_arch = "wasm32"))]
pub fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Host callback target that does not keep its owner alive
///
/// Frame and resize callbacks hold one of these instead of an `Rc`, so a
/// callback the host never fires (a cancelled animation frame) cannot pin the
/// owner after teardown.
pub struct CallbackTarget<T>(Weak<RefCell<T>>);

impl<T> CallbackTarget<T> {
    pub fn new(owner: &Rc<RefCell<T>>) -> Self {
        Self(Rc::downgrade(owner))
    }

    /// Run `f` with the owner if it is still alive
    pub fn with<R>(&self, f: impl FnOnce(&Rc<RefCell<T>>) -> R) -> Option<R> {
        self.0.upgrade().map(|owner| f(&owner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_callback_does_not_pin_owner() {
        let owner = Rc::new(RefCell::new(0u32));
        let pending = CallbackTarget::new(&owner);
        assert_eq!(Rc::strong_count(&owner), 1);

        assert_eq!(pending.with(|o| { *o.borrow_mut() += 1; *o.borrow() }), Some(1));

        // Owner released while the callback is still queued
        let weak = Rc::downgrade(&owner);
        drop(owner);
        assert!(weak.upgrade().is_none());
        assert_eq!(pending.with(|o| *o.borrow()), None);
    }
}
