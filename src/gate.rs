//! Admission gate (spec.md §4.4): decides whether a matched verb may cause
//! a side effect, given capability flags, firmware-brick status, and the
//! active/idle lifecycle. Grounded in the teacher crate's
//! `profile::traits` precondition checks, generalized from a single
//! capability test to the three-way admission spec.md requires.

use crate::device::Device;
use crate::vocabulary::Command;

/// Why a verb was rejected. Carried only for logging; the dispatcher's
/// observable behavior for every variant is identical — drop the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    UnknownVerb,
    MissingCapability,
    FirmwareBricked,
    DeviceIdle,
}

/// Admit `verb` against `device`'s current state (spec.md §4.4 + §4.5's
/// activation-gate note). `ACTIVE` is special-cased: it is the one verb
/// that runs while the device is idle precisely so it can make the device
/// active.
pub fn admit(verb: Command, device: &Device) -> Result<(), Rejection> {
    if verb == Command::None {
        return Err(Rejection::UnknownVerb);
    }
    if let Some(required) = verb.required_feature() {
        if !device.features.contains(required) {
            return Err(Rejection::MissingCapability);
        }
    }
    if device.needs_fw_update && !verb.is_fwupdate_safe() {
        return Err(Rejection::FirmwareBricked);
    }
    if !device.active && verb.requires_active() && verb != Command::Active {
        return Err(Rejection::DeviceIdle);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlatformConfig;

    fn device() -> Device {
        Device::new(PlatformConfig::default(), true)
    }

    #[test]
    fn none_verb_always_rejected() {
        let dev = device();
        assert_eq!(admit(Command::None, &dev), Err(Rejection::UnknownVerb));
    }

    #[test]
    fn missing_capability_rejected() {
        let dev = device();
        assert_eq!(
            admit(Command::Notify, &dev),
            Err(Rejection::MissingCapability)
        );
    }

    #[test]
    fn always_family_admitted_while_idle() {
        let dev = device();
        assert!(!dev.active);
        assert_eq!(admit(Command::Get, &dev), Ok(()));
        assert_eq!(admit(Command::Mode, &dev), Ok(()));
    }

    #[test]
    fn active_verb_admitted_while_idle() {
        let dev = device();
        assert_eq!(admit(Command::Active, &dev), Ok(()));
    }

    #[test]
    fn active_only_verb_rejected_while_idle() {
        let dev = device();
        assert_eq!(admit(Command::Rgb, &dev), Err(Rejection::DeviceIdle));
    }

    #[test]
    fn active_only_verb_admitted_once_active() {
        let mut dev = device();
        dev.active = true;
        assert_eq!(admit(Command::Switch, &dev), Ok(()));
    }

    #[test]
    fn bricked_device_rejects_non_safe_verbs() {
        let mut dev = device();
        dev.active = true;
        dev.needs_fw_update = true;
        assert_eq!(admit(Command::Switch, &dev), Err(Rejection::FirmwareBricked));
        assert_eq!(admit(Command::Get, &dev), Err(Rejection::FirmwareBricked));
    }

    #[test]
    fn bricked_device_admits_fwupdate_safe_set() {
        let mut dev = device();
        dev.needs_fw_update = true;
        assert_eq!(admit(Command::Fwupdate, &dev), Ok(()));
        assert_eq!(admit(Command::Notifyon, &dev), Ok(()));
        assert_eq!(admit(Command::Notifyoff, &dev), Ok(()));
        assert_eq!(admit(Command::Reset, &dev), Ok(()));
    }
}
