//! Post-line flush and RGB rate limiter (spec.md §4.7).
//!
//! Runs once at the end of every line, unless the device needs a firmware
//! update. Grounded in the teacher crate's frame-pacing logic in `hid.rs`,
//! which also measures elapsed time against a fixed budget before issuing
//! the next USB write; this module generalizes it to `Instant`/`Duration`
//! instead of raw `timespec` math, which sidesteps the overflow spec.md §9
//! calls out by construction (`Duration` subtraction saturates rather than
//! wrapping).

use std::thread;
use std::time::{Duration, Instant};

use crate::config::HERTZ_LIM_NS;
use crate::device::Device;
use crate::error::DispatchError;
use crate::retry;
use crate::vocabulary::Command;
use crate::vtable::DeviceOps;

pub fn run(
    device: &mut Device,
    ops: &mut dyn DeviceOps,
    last_verb: Option<Command>,
) -> Result<(), DispatchError> {
    if device.needs_fw_update {
        return Ok(());
    }

    let was_rgb = last_verb == Some(Command::Rgb);
    if was_rgb {
        pace_rgb(device);
    }

    retry::with_reset(ops, |o| o.updatergb(false), |o| o.reset())?;
    retry::with_reset(ops, |o| o.updatedpi(false), |o| o.reset())?;

    #[cfg(debug_assertions)]
    if was_rgb {
        device.clear_encountered_leds();
    }

    Ok(())
}

/// Sleep out the remainder of the rate-limit window if the last RGB flush
/// was too recent, then stamp `last_rgb` to the post-sleep instant.
fn pace_rgb(device: &mut Device) {
    let now = Instant::now();
    if let Some(last) = device.last_rgb {
        let diff = now.saturating_duration_since(last).as_nanos();
        if diff > 0 && diff < HERTZ_LIM_NS {
            let remaining = (HERTZ_LIM_NS - diff) as u64;
            thread::sleep(Duration::from_nanos(remaining));
        }
    }
    device.last_rgb = Some(Instant::now());
}
