//! The per-attached-device context: `Device`, `Profile`, `Mode`, and the
//! feature bitset. See spec.md §3 for the authoritative field list and
//! invariants; this module is the typed realization of that data model.

use std::sync::Mutex;
use std::time::Instant;

use bitflags::bitflags;

use crate::config::{PlatformConfig, USB_DELAY_MAX, USB_DELAY_MIN};

bitflags! {
    /// Device capability bitset. `ANSI`/`ISO` together form `LMASK`; exactly
    /// one of the two must be set at all times (spec.md §3 invariant).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Features: u16 {
        const BIND       = 0b0000_0001;
        const NOTIFY     = 0b0000_0010;
        const ADJRATE    = 0b0000_0100;
        const ANSI       = 0b0000_1000;
        const ISO        = 0b0001_0000;
        const MOUSEACCEL = 0b0010_0000;
    }
}

impl Features {
    /// Construct a feature set from `bits`, then normalize the layout mask:
    /// any ANSI/ISO bits already present in `bits` are cleared and replaced
    /// with exactly one of the two, chosen by `ansi`, so the result always
    /// satisfies `has_valid_layout_mask`.
    pub fn new(bits: Features, ansi: bool) -> Self {
        let mut f = bits - Features::ANSI - Features::ISO;
        f |= if ansi { Features::ANSI } else { Features::ISO };
        f
    }

    /// `LMASK` is exactly one of ANSI/ISO.
    pub fn has_valid_layout_mask(&self) -> bool {
        self.contains(Features::ANSI) != self.contains(Features::ISO)
    }

    pub fn set_layout(&mut self, ansi: bool) {
        self.remove(Features::ANSI | Features::ISO);
        self.insert(if ansi { Features::ANSI } else { Features::ISO });
    }
}

/// A single keymap slot: scancode index implicit in the surrounding `Vec`,
/// with an optional human-readable name used by the colon-split key-list
/// selector (see `keymap.rs`).
#[derive(Debug, Clone, Default)]
pub struct KeymapEntry {
    pub name: Option<String>,
}

/// One macro slot within a mode's binding table.
#[derive(Debug, Clone, Default)]
pub struct MacroSlot {
    pub triggered: bool,
}

/// A mode's key bindings: one macro slot per bound key. Index has no
/// required relation to scancode; this crate only needs to walk and reset
/// `triggered` flags on `SWITCH`.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    pub macros: Vec<MacroSlot>,
}

impl Binding {
    pub fn clear_triggered(&mut self) {
        for m in &mut self.macros {
            m.triggered = false;
        }
    }
}

/// A mode's lighting record.
#[derive(Debug, Clone, Default)]
pub struct Light {
    pub forceupdate: bool,
}

/// One of up to `MODE_COUNT` configurations within a `Profile`.
#[derive(Debug, Clone, Default)]
pub struct Mode {
    pub binding: Binding,
    pub light: Light,
}

/// Owns an ordered sequence of `MODE_COUNT` modes and a cursor into it.
///
/// `current_mode` is an index rather than a pointer: spec.md §9 flags the
/// original's pointer re-binding hazard after `ERASEPROFILE` ("the core must
/// re-read it"). Indexing into a freshly replaced `Vec<Mode>` sidesteps the
/// stale-reference class of bug entirely, while `generation` lets callers
/// detect "this Profile was replaced under me" the way the original's
/// pointer-identity comparison in `SWITCH` relied on (spec.md §9 open
/// question: if the pending mode is the *same object* as current, `SWITCH`
/// is a no-op — preserved here via index equality, which has the same
/// observable effect).
#[derive(Debug, Clone)]
pub struct Profile {
    pub modes: Vec<Mode>,
    pub current_mode: usize,
    generation: u64,
}

impl Profile {
    pub fn new(mode_count: usize) -> Self {
        Self {
            modes: (0..mode_count).map(|_| Mode::default()).collect(),
            current_mode: 0,
            generation: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the entire profile in place, as `ERASEPROFILE` does on the
    /// collaborator side; bumps `generation` so dispatch code that cached a
    /// generation can tell it must re-fetch `current_mode`.
    pub fn erase(&mut self, mode_count: usize) {
        self.modes = (0..mode_count).map(|_| Mode::default()).collect();
        self.current_mode = 0;
        self.generation += 1;
    }
}

/// A notification channel id, validated against `OUTFIFO_MAX` at
/// construction. Channel 0 is permanent and cannot be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationChannel(pub u16);

impl NotificationChannel {
    pub const PERMANENT: NotificationChannel = NotificationChannel(0);

    pub fn in_range(value: u16, outfifo_max: u16) -> Option<Self> {
        if value < outfifo_max {
            Some(NotificationChannel(value))
        } else {
            None
        }
    }
}

/// The per-attached-device context (spec.md §3).
pub struct Device {
    pub features: Features,
    pub active: bool,
    pub needs_fw_update: bool,
    usb_delay: u8,
    pub dither: u8,
    pub scroll_rate: i32,
    pub max_pollrate: PollRate,
    pub keymap: Vec<KeymapEntry>,
    pub last_rgb: Option<Instant>,
    #[cfg(debug_assertions)]
    pub encountered_leds: Vec<bool>,
    pub profile: Profile,
    /// Guards mutation of `profile.current_mode`, per spec.md §3/§5.
    pub imutex: Mutex<()>,
    pub config: PlatformConfig,
    /// Set by `MODE N`, committed by `SWITCH` (spec.md §4.5). Not part of
    /// spec.md §3's enumerated attribute list, but required to implement
    /// "select as the pending mode (not yet committed)" — it persists on
    /// the device rather than the current line, since `MODE` is
    /// always-available while `SWITCH` is active-only and the two may
    /// legitimately land on different lines.
    pub pending_mode: Option<usize>,
}

impl Device {
    pub fn new(config: PlatformConfig, ansi: bool) -> Self {
        let keymap = (0..config.n_keys_extended)
            .map(|_| KeymapEntry::default())
            .collect();
        #[cfg(debug_assertions)]
        let encountered_leds = vec![false; config.n_keys_extended];
        let profile = Profile::new(config.mode_count);
        Device {
            features: Features::new(Features::empty(), ansi),
            active: false,
            needs_fw_update: false,
            usb_delay: USB_DELAY_MIN,
            dither: 0,
            scroll_rate: config.scroll_max,
            max_pollrate: PollRate::Hz1000,
            keymap,
            last_rgb: None,
            #[cfg(debug_assertions)]
            encountered_leds,
            profile,
            imutex: Mutex::new(()),
            config,
            pending_mode: None,
        }
    }

    pub fn usb_delay(&self) -> u8 {
        self.usb_delay
    }

    /// The only way to change `usb_delay`; always clamps into `[2, 10]`.
    pub fn set_usb_delay(&mut self, value: u8) {
        self.usb_delay = value.clamp(USB_DELAY_MIN, USB_DELAY_MAX);
    }

    #[cfg(debug_assertions)]
    pub fn clear_encountered_leds(&mut self) {
        for seen in &mut self.encountered_leds {
            *seen = false;
        }
    }

    /// Testable invariant: exactly one of ANSI/ISO is set, `usb_delay` is in
    /// range, and `current_mode` indexes within `modes`.
    pub fn check_invariants(&self) -> bool {
        self.features.has_valid_layout_mask()
            && (USB_DELAY_MIN..=USB_DELAY_MAX).contains(&self.usb_delay)
            && self.profile.current_mode < self.profile.modes.len()
    }
}

/// Poll rate enumeration. The seven literal strings from spec.md §4.5/§6 are
/// USB polling *intervals* in milliseconds; the enum is declared in
/// ascending-frequency order so `rate > max_pollrate` (spec.md's rejection
/// test) is a plain enum comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PollRate {
    Hz125,
    Hz250,
    Hz500,
    Hz1000,
    Hz2000,
    Hz4000,
    Hz10000,
}

impl PollRate {
    /// Map the seven literal millisecond-interval strings to their enum
    /// value. Returns `None` for anything else (unrecognized argument is
    /// ignored, per spec.md §7 kind 1).
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "8" => Some(PollRate::Hz125),
            "4" => Some(PollRate::Hz250),
            "2" => Some(PollRate::Hz500),
            "1" => Some(PollRate::Hz1000),
            "0.5" => Some(PollRate::Hz2000),
            "0.25" => Some(PollRate::Hz4000),
            "0.1" => Some(PollRate::Hz10000),
            _ => None,
        }
    }
}
