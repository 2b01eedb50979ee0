use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// The two user-triggerable operations. Each kind owns an independent
/// latch, so a calibration can run while a measurement is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Measure,
    Calibrate,
}

impl OperationKind {
    /// Prefix used when surfacing a service-reported failure for this kind.
    pub fn failure_prefix(&self) -> &'static str {
        match self {
            OperationKind::Measure => "Measurement",
            OperationKind::Calibrate => "Calibration",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Measure => write!(f, "measure"),
            OperationKind::Calibrate => write!(f, "calibrate"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationState {
    Idle,
    InFlight,
}

/// Per-kind mutual-exclusion latch. A second trigger of a kind that is
/// already in flight is rejected, never queued; the rejected trigger is
/// simply dropped by the caller.
#[derive(Debug, Default)]
pub struct OperationGuard {
    measure: AtomicBool,
    calibrate: AtomicBool,
}

impl OperationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    fn latch(&self, kind: OperationKind) -> &AtomicBool {
        match kind {
            OperationKind::Measure => &self.measure,
            OperationKind::Calibrate => &self.calibrate,
        }
    }

    /// Atomically move `kind` from Idle to InFlight. Returns false without
    /// any mutation if the kind is already in flight.
    pub fn try_acquire(&self, kind: OperationKind) -> bool {
        self.latch(kind)
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Unconditionally reset `kind` to Idle. Must be called exactly once
    /// per successful acquire, on every exit path, or the kind stays
    /// locked out for good.
    pub fn release(&self, kind: OperationKind) {
        self.latch(kind).store(false, Ordering::Release);
    }

    pub fn state(&self, kind: OperationKind) -> OperationState {
        if self.latch(kind).load(Ordering::Acquire) {
            OperationState::InFlight
        } else {
            OperationState::Idle
        }
    }

    pub fn is_idle(&self, kind: OperationKind) -> bool {
        self.state(kind) == OperationState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_then_release() {
        let guard = OperationGuard::new();
        assert!(guard.is_idle(OperationKind::Measure));

        assert!(guard.try_acquire(OperationKind::Measure));
        assert_eq!(guard.state(OperationKind::Measure), OperationState::InFlight);

        guard.release(OperationKind::Measure);
        assert!(guard.is_idle(OperationKind::Measure));
    }

    #[test]
    fn test_second_acquire_rejected() {
        let guard = OperationGuard::new();
        assert!(guard.try_acquire(OperationKind::Measure));
        assert!(!guard.try_acquire(OperationKind::Measure));

        // Still held by the first acquire.
        assert_eq!(guard.state(OperationKind::Measure), OperationState::InFlight);
    }

    #[test]
    fn test_kinds_are_independent() {
        let guard = OperationGuard::new();
        assert!(guard.try_acquire(OperationKind::Measure));
        assert!(guard.try_acquire(OperationKind::Calibrate));

        guard.release(OperationKind::Calibrate);
        assert!(guard.is_idle(OperationKind::Calibrate));
        assert_eq!(guard.state(OperationKind::Measure), OperationState::InFlight);
    }

    #[test]
    fn test_release_reenables_kind() {
        let guard = OperationGuard::new();
        assert!(guard.try_acquire(OperationKind::Calibrate));
        guard.release(OperationKind::Calibrate);
        assert!(guard.try_acquire(OperationKind::Calibrate));
    }

    #[test]
    fn test_concurrent_acquire_admits_exactly_one() {
        use std::sync::Arc;
        use std::thread;

        let guard = Arc::new(OperationGuard::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let guard = Arc::clone(&guard);
            handles.push(thread::spawn(move || {
                guard.try_acquire(OperationKind::Measure)
            }));
        }

        let admitted = handles
            .into_iter()
            .map(|handle| handle.join())
            .filter(|outcome| matches!(outcome, Ok(true)))
            .count();
        assert_eq!(admitted, 1);
    }
}
