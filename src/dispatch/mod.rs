//! The dispatcher: resolves each (verb, argument word) pair produced by the
//! line state machine and routes it to one of the handler families (spec.md
//! §4.5). `dispatch_line` is the core's single public entry point per line.

mod active;
mod always;
mod keylist;

use tracing::debug;

use crate::channel;
use crate::device::Device;
use crate::error::DispatchError;
use crate::flush;
use crate::gate;
use crate::notify::NotifyTable;
use crate::retry;
use crate::tokenizer;
use crate::vocabulary::{Arity, Command};
use crate::vtable::DeviceOps;

/// Process one line end to end: tokenize, select the notification channel,
/// run the verb/argument state machine (spec.md §4.4's last paragraph), and
/// finish with the post-line flush (spec.md §4.7).
pub fn dispatch_line(
    line: &str,
    device: &mut Device,
    notify: &mut NotifyTable,
    ops: &mut dyn DeviceOps,
) -> Result<(), DispatchError> {
    let words = tokenizer::tokenize(line);
    let (chan, words) = channel::select_channel(&words, device.config.outfifo_max);

    let mut current_verb: Option<Command> = None;
    let mut last_verb: Option<Command> = None;

    for &word in words {
        let parsed = Command::parse(word, device.config.legacy_platform);
        if parsed != Command::None {
            // A recognized verb always wins: any verb still waiting for its
            // argument is dropped without being dispatched (spec.md §4.4).
            current_verb = None;
            match gate::admit(parsed, device) {
                Ok(()) => {
                    if parsed.arity() == Arity::Action {
                        dispatch_verb(parsed, "", chan, device, notify, ops)?;
                        last_verb = Some(parsed);
                    } else {
                        current_verb = Some(parsed);
                    }
                }
                Err(reason) => {
                    debug!(verb = ?parsed, ?reason, "verb rejected by gate");
                }
            }
        } else if let Some(verb) = current_verb.take() {
            dispatch_verb(verb, word, chan, device, notify, ops)?;
            last_verb = Some(verb);
        }
        // Else: a stray word with no pending verb. Ignored (spec.md §7).
    }

    flush::run(device, ops, last_verb)
}

fn dispatch_verb(
    verb: Command,
    word: &str,
    chan: crate::device::NotificationChannel,
    device: &mut Device,
    notify: &mut NotifyTable,
    ops: &mut dyn DeviceOps,
) -> Result<(), DispatchError> {
    use Command::*;
    match verb {
        Notifyon | Notifyoff | Get | Layout | Accel | Scrollspeed | Mode | Fps | Dither
        | Delay | Reset => {
            always::dispatch(verb, word, chan, device, notify, ops);
            Ok(())
        }
        Active => {
            retry::with_reset(ops, |o| o.active(), |o| o.reset())?;
            device.active = true;
            Ok(())
        }
        Idle | Switch | Hwload | Hwsave | Fwupdate | Pollrate | Eraseprofile | Erase | Name
        | Profilename | Id | Profileid | Hwanim | Ioff | Ion | Iauto | Inotify | Dpisel
        | Lift | Snap | Notify => active::dispatch(verb, word, chan, device, ops),
        Rgb | Macro | Bind | Unbind | Rebind | Dpi => {
            keylist::dispatch(verb, word, chan, device, ops);
            Ok(())
        }
        Command::None => unreachable!("gate::admit rejects Command::None upstream"),
    }
}
