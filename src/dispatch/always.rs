//! Always-available family handlers (spec.md §4.5): dispatched regardless
//! of `device.active`. Only `GET` and `RESET` touch the vtable; the rest
//! mutate local device state.

use crate::device::{Device, NotificationChannel};
use crate::notify::NotifyTable;
use crate::vocabulary::Command;
use crate::vtable::DeviceOps;

pub fn dispatch(
    verb: Command,
    word: &str,
    channel: NotificationChannel,
    device: &mut Device,
    notify: &mut NotifyTable,
    ops: &mut dyn DeviceOps,
) {
    match verb {
        Command::Notifyon => {
            if let Ok(n) = word.parse::<u16>() {
                if let Some(chan) = NotificationChannel::in_range(n, device.config.outfifo_max) {
                    notify.open(chan);
                }
            }
        }
        Command::Notifyoff => {
            if let Ok(n) = word.parse::<u16>() {
                if n > 0 {
                    if let Some(chan) = NotificationChannel::in_range(n, device.config.outfifo_max)
                    {
                        notify.close(chan);
                    }
                }
            }
        }
        Command::Get => {
            ops.get(channel.0, word);
        }
        Command::Layout => match word {
            "ansi" => device.features.set_layout(true),
            "iso" => device.features.set_layout(false),
            _ => {}
        },
        Command::Accel => match word {
            "on" => device.features.insert(crate::device::Features::MOUSEACCEL),
            "off" => device.features.remove(crate::device::Features::MOUSEACCEL),
            _ => {}
        },
        Command::Scrollspeed => {
            if let Ok(n) = word.parse::<i32>() {
                device.scroll_rate = device.config.clamp_scroll(n);
            }
        }
        Command::Mode => {
            if let Ok(n) = word.parse::<usize>() {
                if n >= 1 && n <= device.config.mode_count {
                    device.pending_mode = Some(n - 1);
                }
            }
        }
        Command::Fps => {
            if let Ok(f) = word.parse::<i32>() {
                let delay = device.config.fps_to_usb_delay(f);
                device.set_usb_delay(delay);
            }
        }
        Command::Dither => {
            let value = match word {
                "0" => Some(0),
                "1" => Some(1),
                _ => None,
            };
            if let Some(v) = value {
                device.dither = v;
                let current = device.profile.current_mode;
                device.profile.modes[current].light.forceupdate = true;
                if let Some(pending) = device.pending_mode {
                    device.profile.modes[pending].light.forceupdate = true;
                }
            }
        }
        Command::Delay => {
            // Accepted but has no effect (spec.md §4.5, §9 open question).
        }
        Command::Reset => {
            ops.reset();
        }
        _ => unreachable!("dispatch::always called with a non-always-family verb"),
    }
}
