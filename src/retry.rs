//! Retry-with-reset harness (spec.md §4.6).
//!
//! Wraps a mutating vtable call: while it returns failure, ask the
//! transport to reset the device and retry; if the reset itself fails,
//! the line aborts with `DispatchError::DeviceLost`. The loop is otherwise
//! unbounded — per spec, "every iteration requires a successful reset
//! between attempts" is the only thing that lets it continue.

use crate::error::DispatchError;
use crate::vtable::DeviceOps;

/// Run `call` under the retry-with-reset protocol. `call` returns `true` on
/// success. `reset` is invoked between failed attempts and must itself
/// return `true` for the retry to continue; a failed reset aborts with
/// `DeviceLost`.
///
/// Both closures take the vtable handle as a parameter rather than
/// capturing it, so only one `&mut dyn DeviceOps` borrow is live at a time
/// — capturing `ops` in both closures would hold two simultaneous mutable
/// borrows of the same value.
pub fn with_reset(
    ops: &mut dyn DeviceOps,
    mut call: impl FnMut(&mut dyn DeviceOps) -> bool,
    mut reset: impl FnMut(&mut dyn DeviceOps) -> bool,
) -> Result<(), DispatchError> {
    loop {
        if call(ops) {
            return Ok(());
        }
        if !reset(ops) {
            return Err(DispatchError::DeviceLost);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vtable::test_support::FakeDevice;

    #[test]
    fn succeeds_immediately_without_reset() {
        let mut ops = FakeDevice::default();
        let result = with_reset(&mut ops, |o| o.active(), |o| o.reset());
        assert!(result.is_ok());
        assert_eq!(*ops.reset_calls.borrow(), 0);
    }

    #[test]
    fn retries_after_successful_reset() {
        // `fail_next` is popped once per vtable call regardless of which
        // method makes it, so one scripted failure fails the first
        // `active()`; the following `reset()` and retried `active()` both
        // find the stack empty and default to success.
        let mut ops = FakeDevice::default();
        ops.fail_next.borrow_mut().push(true);
        let result = with_reset(&mut ops, |o| o.active(), |o| o.reset());
        assert!(result.is_ok());
        assert_eq!(
            ops.calls.borrow().iter().filter(|c| *c == "active").count(),
            2
        );
        assert_eq!(*ops.reset_calls.borrow(), 1);
    }

    #[test]
    fn failed_reset_aborts_with_device_lost() {
        let mut ops = FakeDevice::default();
        ops.fail_next.borrow_mut().push(true);
        ops.fail_next.borrow_mut().push(true);
        let result = with_reset(&mut ops, |o| o.active(), |o| o.reset());
        assert!(matches!(result, Err(DispatchError::DeviceLost)));
    }
}
