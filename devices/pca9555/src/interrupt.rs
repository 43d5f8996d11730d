use core::sync::atomic::{AtomicBool, Ordering};

/// Change notification from the expander INT line
///
/// Raised from interrupt context, polled and cleared by the main loop once
/// the new input value has been processed. Meant to be used as a `static`.
#[derive(Debug, Default)]
pub struct InterruptFlag {
    pending: AtomicBool,
}

impl InterruptFlag {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// Mark a change, called from the interrupt handler
    pub fn raise(&self) {
        self.pending.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Acknowledge the change once it has been processed
    pub fn clear(&self) {
        self.pending.store(false, Ordering::Release);
    }

    /// Return whether the flag was raised, clearing it
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}
