//! Active-only family handlers (spec.md §4.5): admitted only once
//! `device.active` (checked upstream by `gate::admit`). Covers `IDLE`,
//! `SWITCH`, `HWLOAD`/`HWSAVE`, `FWUPDATE`, `POLLRATE`, `ERASEPROFILE`, and
//! the whole-word direct family.

use tracing::warn;

use crate::device::{Device, NotificationChannel, PollRate};
use crate::error::DispatchError;
use crate::retry;
use crate::vocabulary::Command;
use crate::vtable::DeviceOps;

pub fn dispatch(
    verb: Command,
    word: &str,
    channel: NotificationChannel,
    device: &mut Device,
    ops: &mut dyn DeviceOps,
) -> Result<(), DispatchError> {
    match verb {
        Command::Idle => {
            retry::with_reset(ops, |o| o.idle(), |o| o.reset())?;
            device.active = false;
            Ok(())
        }
        Command::Switch => {
            switch_mode(device, ops);
            Ok(())
        }
        Command::Hwload | Command::Hwsave => {
            let saved_delay = device.usb_delay();
            device.set_usb_delay(saved_delay.max(10));
            let result: Result<(), DispatchError> = (|| {
                retry::with_reset(ops, |o| o.do_io(verb, channel.0), |o| o.reset())?;
                retry::with_reset(ops, |o| o.updatergb(true), |o| o.reset())
            })();
            device.set_usb_delay(saved_delay);
            result
        }
        Command::Fwupdate => {
            if ops.fwupdate(word) {
                Ok(())
            } else {
                Err(DispatchError::FirmwareUpdateFailed)
            }
        }
        Command::Pollrate => {
            match PollRate::parse(word) {
                Some(rate) if rate <= device.max_pollrate => {
                    retry::with_reset(ops, |o| o.pollrate(rate), |o| o.reset())?;
                }
                Some(_) => warn!(requested = word, "pollrate above device max_pollrate"),
                None => {}
            }
            Ok(())
        }
        Command::Eraseprofile => {
            retry::with_reset(ops, |o| o.eraseprofile(), |o| o.reset())?;
            device.profile.erase(device.config.mode_count);
            device.pending_mode = None;
            Ok(())
        }
        Command::Erase
        | Command::Name
        | Command::Profilename
        | Command::Id
        | Command::Profileid
        | Command::Hwanim
        | Command::Ioff
        | Command::Ion
        | Command::Iauto
        | Command::Inotify
        | Command::Dpisel
        | Command::Lift
        | Command::Snap
        | Command::Notify => {
            ops.do_cmd(verb, channel.0, 0, word);
            Ok(())
        }
        _ => unreachable!("dispatch::active called with a non-active-only verb"),
    }
}

fn switch_mode(device: &mut Device, ops: &mut dyn DeviceOps) {
    let Some(pending) = device.pending_mode else {
        return;
    };
    if pending == device.profile.current_mode {
        return;
    }
    {
        let _guard = device.imutex.lock().unwrap();
        let current = device.profile.current_mode;
        device.profile.modes[current].binding.clear_triggered();
        device.profile.current_mode = pending;
    }
    ops.setmodeindex(pending);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlatformConfig;
    use crate::vtable::test_support::FakeDevice;

    fn setup() -> (Device, FakeDevice) {
        (Device::new(PlatformConfig::default(), true), FakeDevice::default())
    }

    #[test]
    fn idle_marks_device_inactive() {
        let (mut dev, mut ops) = setup();
        dev.active = true;
        dispatch(
            Command::Idle,
            "",
            NotificationChannel::PERMANENT,
            &mut dev,
            &mut ops,
        )
        .unwrap();
        assert!(!dev.active);
    }

    #[test]
    fn switch_same_mode_is_a_no_op() {
        let (mut dev, mut ops) = setup();
        dev.pending_mode = Some(dev.profile.current_mode);
        dispatch(
            Command::Switch,
            "",
            NotificationChannel::PERMANENT,
            &mut dev,
            &mut ops,
        )
        .unwrap();
        assert!(!ops.calls.borrow().contains(&"setmodeindex".to_string()));
    }

    #[test]
    fn switch_different_mode_clears_triggered_and_commits() {
        let (mut dev, mut ops) = setup();
        dev.profile.modes[0].binding.macros.push(crate::device::MacroSlot { triggered: true });
        dev.pending_mode = Some(2);
        dispatch(
            Command::Switch,
            "",
            NotificationChannel::PERMANENT,
            &mut dev,
            &mut ops,
        )
        .unwrap();
        assert_eq!(dev.profile.current_mode, 2);
        assert!(!dev.profile.modes[0].binding.macros[0].triggered);
        assert!(ops.calls.borrow().contains(&"setmodeindex".to_string()));
    }

    #[test]
    fn hwload_raises_then_restores_usb_delay() {
        let (mut dev, mut ops) = setup();
        dev.set_usb_delay(3);
        dispatch(
            Command::Hwload,
            "",
            NotificationChannel::PERMANENT,
            &mut dev,
            &mut ops,
        )
        .unwrap();
        assert_eq!(dev.usb_delay(), 3);
    }

    #[test]
    fn fwupdate_failure_aborts_without_retry() {
        let (mut dev, mut ops) = setup();
        ops.fail_next.borrow_mut().push(true);
        let result = dispatch(
            Command::Fwupdate,
            "blob",
            NotificationChannel::PERMANENT,
            &mut dev,
            &mut ops,
        );
        assert!(matches!(result, Err(DispatchError::FirmwareUpdateFailed)));
        assert_eq!(ops.calls.borrow().iter().filter(|c| *c == "fwupdate").count(), 1);
    }

    #[test]
    fn pollrate_above_max_is_rejected() {
        let (mut dev, mut ops) = setup();
        dev.max_pollrate = PollRate::Hz500;
        dispatch(
            Command::Pollrate,
            "0.1",
            NotificationChannel::PERMANENT,
            &mut dev,
            &mut ops,
        )
        .unwrap();
        assert!(ops.calls.borrow().is_empty());
    }

    #[test]
    fn pollrate_within_max_is_applied() {
        let (mut dev, mut ops) = setup();
        dev.max_pollrate = PollRate::Hz10000;
        dispatch(
            Command::Pollrate,
            "1",
            NotificationChannel::PERMANENT,
            &mut dev,
            &mut ops,
        )
        .unwrap();
        assert!(ops.calls.borrow().contains(&"pollrate".to_string()));
    }

    #[test]
    fn eraseprofile_rebinds_profile_and_clears_pending() {
        let (mut dev, mut ops) = setup();
        dev.profile.current_mode = 3;
        dev.pending_mode = Some(4);
        dispatch(
            Command::Eraseprofile,
            "",
            NotificationChannel::PERMANENT,
            &mut dev,
            &mut ops,
        )
        .unwrap();
        assert_eq!(dev.profile.current_mode, 0);
        assert_eq!(dev.pending_mode, None);
    }

    #[test]
    fn whole_word_direct_family_invokes_do_cmd_with_key_zero() {
        let (mut dev, mut ops) = setup();
        dispatch(
            Command::Name,
            "mykeyboard",
            NotificationChannel::PERMANENT,
            &mut dev,
            &mut ops,
        )
        .unwrap();
        assert!(ops
            .calls
            .borrow()
            .iter()
            .any(|c| c.starts_with("do_cmd:")));
    }
}
