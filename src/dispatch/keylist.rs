//! `RGB`/`MACRO` fast paths and the shared colon-split family (spec.md
//! §4.5). None of these vtable calls are retried (not in the §4.6 retry
//! set) — a transient failure here is simply dropped, same as the
//! reference behavior for non-critical per-key updates.

use crate::device::{Device, NotificationChannel};
use crate::keymap;
use crate::vocabulary::Command;
use crate::vtable::DeviceOps;

pub fn dispatch(
    verb: Command,
    word: &str,
    channel: NotificationChannel,
    device: &Device,
    ops: &mut dyn DeviceOps,
) {
    match verb {
        Command::Rgb => {
            if is_rgb_hex(word) {
                for i in 0..device.keymap.len() {
                    ops.rgb(-1, i, word);
                }
            } else {
                colon_split(verb, word, channel, device, ops);
            }
        }
        Command::Macro => {
            if word == "clear" {
                ops.r#macro(channel.0, 0, "0");
            } else {
                colon_split(verb, word, channel, device, ops);
            }
        }
        Command::Bind | Command::Unbind | Command::Rebind | Command::Dpi => {
            colon_split(verb, word, channel, device, ops)
        }
        _ => unreachable!("dispatch::keylist called with an unrelated verb"),
    }
}

/// `word` matches exactly `[0-9a-f]{6}` (spec.md §6): six lowercase hex
/// digits, no trailing content.
fn is_rgb_hex(word: &str) -> bool {
    word.len() == 6 && word.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

fn colon_split(
    verb: Command,
    word: &str,
    channel: NotificationChannel,
    device: &Device,
    ops: &mut dyn DeviceOps,
) {
    let (left, right) = match word.split_once(':') {
        Some((l, r)) => (l, r),
        None => (word, ""),
    };
    if left.is_empty() {
        return;
    }
    match verb {
        Command::Macro | Command::Dpi => {
            ops.do_macro(verb, channel.0, left, right);
        }
        _ => {
            for key in keymap::resolve_key_list(left, &device.keymap) {
                ops.do_cmd(verb, channel.0, key, right);
            }
        }
    }
}
