//! Platform constants the dispatcher core treats as given by its collaborators.
//!
//! Mirrors the teacher crate's `profile::types::RangeConfig` pattern: numeric
//! bounds live in one small, serde-able struct instead of scattered literals,
//! so a device family can override them without recompiling the dispatcher.

use serde::{Deserialize, Serialize};

/// Minimum spacing between RGB flushes: ~60.5 Hz, bit-exact per spec.
pub const HERTZ_LIM_NS: u128 = 16_528_925;

/// `usb_delay` is always clamped into this range.
pub const USB_DELAY_MIN: u8 = 2;
pub const USB_DELAY_MAX: u8 = 10;

/// Determines the `per_frame` divisor used by `FPS` (spec.md §4.5). Not
/// named as a `Device` attribute in spec.md §3; grouped here with the other
/// collaborator-supplied platform facts since it is fixed per device family,
/// not per command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Mouse,
    FullRangeKeyboard,
    Other,
}

impl DeviceKind {
    pub fn per_frame(self) -> i32 {
        match self {
            DeviceKind::Mouse => 2,
            DeviceKind::FullRangeKeyboard => 14,
            DeviceKind::Other => 5,
        }
    }
}

/// Platform-tunable constants that spec.md §6 calls out as "defined by
/// collaborators". Defaults match the values used throughout spec.md's
/// worked examples and boundary cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub mode_count: usize,
    pub outfifo_max: u16,
    pub n_keys_extended: usize,
    pub scroll_min: i32,
    pub scroll_max: i32,
    pub scroll_accelerated: i32,
    pub device_kind: DeviceKind,
    /// Gates `LAYOUT`/`ACCEL`/`SCROLLSPEED`, which spec.md §4.1 calls out
    /// as legacy-host-platform-only verbs.
    pub legacy_platform: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            mode_count: 6,
            outfifo_max: 16,
            n_keys_extended: 144,
            scroll_min: 1,
            scroll_max: 40,
            scroll_accelerated: -1,
            device_kind: DeviceKind::Other,
            legacy_platform: false,
        }
    }
}

impl PlatformConfig {
    /// Parse a `PlatformConfig` from TOML text, falling back to defaults for
    /// any field the document omits.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn clamp_scroll(&self, value: i32) -> i32 {
        if value < self.scroll_min {
            self.scroll_accelerated
        } else {
            value.min(self.scroll_max)
        }
    }

    /// `FPS F`: `usb_delay = clamp(1000 / F / per_frame, 2, 10)` (spec.md
    /// §4.5). `F <= 0` would divide by zero or go negative; treated as the
    /// slowest rate, clamping straight to `USB_DELAY_MAX`.
    pub fn fps_to_usb_delay(&self, fps: i32) -> u8 {
        if fps <= 0 {
            return USB_DELAY_MAX;
        }
        let per_frame = self.device_kind.per_frame();
        let delay = 1000 / fps / per_frame;
        delay.clamp(USB_DELAY_MIN as i32, USB_DELAY_MAX as i32) as u8
    }
}
