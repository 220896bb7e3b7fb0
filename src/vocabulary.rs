//! The fixed command vocabulary (spec.md §4.1, §6): verbs, their arity kind,
//! active-gate requirement, and capability requirement. Mirrors the teacher
//! crate's
//! `protocol::cmd` module — a flat table of wire identifiers plus a
//! `name()`/lookup function — but keyed by an enum instead of raw bytes,
//! since this protocol's wire form is a string, not a byte opcode.

use crate::device::Features;

/// How a verb consumes the words that follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No argument; the verb itself triggers dispatch.
    Action,
    /// Consumes the next word as its argument.
    Arg,
    /// Consumes one word verbatim as an opaque parameter.
    WholeWord,
    /// The argument word is split at the first `:` into key-list/payload.
    ColonSplit,
}

/// The fixed vocabulary, stable identifiers starting at `CMD_FIRST`
/// (spec.md §4.1). `None` is the implicit "no verb matched" case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Delay,
    Mode,
    Switch,
    Layout,
    Accel,
    Scrollspeed,
    Notifyon,
    Notifyoff,
    Fps,
    Dither,
    Hwload,
    Hwsave,
    Fwupdate,
    Pollrate,
    Active,
    Idle,
    Erase,
    Eraseprofile,
    Name,
    Profilename,
    Id,
    Profileid,
    Rgb,
    Hwanim,
    Ioff,
    Ion,
    Iauto,
    Bind,
    Unbind,
    Rebind,
    Macro,
    Dpi,
    Dpisel,
    Lift,
    Snap,
    Notify,
    Inotify,
    Get,
    Reset,
    /// Implicit "not a recognized verb" value (spec.md §3).
    None,
}

impl Command {
    /// `CMD_FIRST` is `Delay`; identifiers are stable and ordered as listed
    /// in spec.md §6 (excluding the platform-demoted trio, which are handled
    /// by `parse`, and the implicit `None`).
    pub const FIRST: Command = Command::Delay;

    /// Parse a wire-level verb word. Unknown words yield `Command::None`
    /// (spec.md §7 kind 1: silently ignored).
    ///
    /// `Layout`/`Accel`/`Scrollspeed` only exist as real commands on the
    /// legacy host platform; `demote_legacy_only` controls whether they are
    /// recognized at all or silently demoted to `None` (spec.md §4.1).
    pub fn parse(word: &str, demote_legacy_only: bool) -> Command {
        let cmd = match word {
            "delay" => Command::Delay,
            "mode" => Command::Mode,
            "switch" => Command::Switch,
            "layout" => Command::Layout,
            "accel" => Command::Accel,
            "scrollspeed" => Command::Scrollspeed,
            "notifyon" => Command::Notifyon,
            "notifyoff" => Command::Notifyoff,
            "fps" => Command::Fps,
            "dither" => Command::Dither,
            "hwload" => Command::Hwload,
            "hwsave" => Command::Hwsave,
            "fwupdate" => Command::Fwupdate,
            "pollrate" => Command::Pollrate,
            "active" => Command::Active,
            "idle" => Command::Idle,
            "erase" => Command::Erase,
            "eraseprofile" => Command::Eraseprofile,
            "name" => Command::Name,
            "profilename" => Command::Profilename,
            "id" => Command::Id,
            "profileid" => Command::Profileid,
            "rgb" => Command::Rgb,
            "hwanim" => Command::Hwanim,
            "ioff" => Command::Ioff,
            "ion" => Command::Ion,
            "iauto" => Command::Iauto,
            "bind" => Command::Bind,
            "unbind" => Command::Unbind,
            "rebind" => Command::Rebind,
            "macro" => Command::Macro,
            "dpi" => Command::Dpi,
            "dpisel" => Command::Dpisel,
            "lift" => Command::Lift,
            "snap" => Command::Snap,
            "notify" => Command::Notify,
            "inotify" => Command::Inotify,
            "get" => Command::Get,
            "reset" => Command::Reset,
            _ => Command::None,
        };
        if demote_legacy_only
            && matches!(cmd, Command::Layout | Command::Accel | Command::Scrollspeed)
        {
            Command::None
        } else {
            cmd
        }
    }

    /// `ERASE` is listed as action-kind in spec.md §4.1's typology but as
    /// taking a `word` argument in §4.5's whole-word-direct family
    /// (`do_cmd[verb](device, mode, channel, 0, word)`) — an unresolved
    /// tension the spec itself flags only implicitly. We follow §4.5's
    /// concrete, testable behavior: `ERASE` is whole-word, not action. One
    /// consequence: a bare `erase` line with no following word never
    /// dispatches, the same as any other whole-word verb missing its word.
    pub fn arity(self) -> Arity {
        use Command::*;
        match self {
            Switch | Hwload | Hwsave | Active | Idle | Eraseprofile => Arity::Action,
            Rgb | Macro | Bind | Unbind | Rebind | Dpi => Arity::ColonSplit,
            Erase | Name | Profilename | Id | Profileid | Hwanim | Ioff | Ion | Iauto | Dpisel
            | Lift | Snap => Arity::WholeWord,
            None => Arity::Action,
            _ => Arity::Arg,
        }
    }

    /// The always-available family (spec.md §4.5): dispatched before the
    /// active-gate check, so these run whether or not `device.active`.
    /// `ACTIVE` itself is also exempt from the active check (it is the verb
    /// that sets `active`), but is handled separately in `gate.rs` rather
    /// than folded in here, since it is not part of the always-available
    /// family's *dispatch* list.
    pub fn requires_active(self) -> bool {
        !matches!(
            self,
            Command::Notifyon
                | Command::Notifyoff
                | Command::Get
                | Command::Layout
                | Command::Accel
                | Command::Scrollspeed
                | Command::Mode
                | Command::Fps
                | Command::Dither
                | Command::Delay
                | Command::Reset
        )
    }

    /// Capability bit required to admit this verb, if any (spec.md §4.1).
    pub fn required_feature(self) -> Option<Features> {
        use Command::*;
        match self {
            Bind | Unbind | Rebind | Macro | Delay => Some(Features::BIND),
            Notify => Some(Features::NOTIFY),
            Pollrate => Some(Features::ADJRATE),
            _ => None,
        }
    }

    /// Verbs admitted even when `device.needs_fw_update` is set
    /// (spec.md §3 invariant / §4.4).
    pub fn is_fwupdate_safe(self) -> bool {
        matches!(
            self,
            Command::Fwupdate | Command::Notifyon | Command::Notifyoff | Command::Reset
        )
    }
}
