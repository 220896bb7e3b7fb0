//! Typed errors for the dispatcher core.
//!
//! Most of the failure kinds enumerated in the protocol's error design are
//! deliberately *not* represented here (syntax errors, capability mismatch,
//! the firmware-brick gate, and out-of-range parameters are absorbed
//! silently by design — see `gate.rs` and `dispatch/`). Only the two kinds
//! that actually abort a line get a typed variant.

use thiserror::Error;

/// Errors that can terminate processing of a command line.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A mutating vtable call failed and the subsequent device reset also
    /// failed. The owning control thread should tear the device down.
    #[error("device lost: reset failed after a transient USB failure")]
    DeviceLost,

    /// `FWUPDATE` returned non-zero. Not retried, per spec.
    #[error("firmware update failed")]
    FirmwareUpdateFailed,
}
