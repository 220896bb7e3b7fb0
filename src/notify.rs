//! Notification channel table (spec.md §4.1/§4.3 support): which channels
//! are currently open. Channel 0 is permanent — it is always open and
//! `NOTIFYOFF` on it is a no-op, mirroring the teacher crate's
//! `notify::state` module's always-present default subscriber.

use std::collections::BTreeSet;

use crate::device::NotificationChannel;

/// Tracks which notification channels are open. Channel 0 is implicitly
/// open at all times and is never stored in `opened`.
#[derive(Debug, Default)]
pub struct NotifyTable {
    opened: BTreeSet<NotificationChannel>,
}

impl NotifyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, chan: NotificationChannel) -> bool {
        chan == NotificationChannel::PERMANENT || self.opened.contains(&chan)
    }

    /// `NOTIFYON`. Opening the permanent channel is a no-op: it is already
    /// always open.
    pub fn open(&mut self, chan: NotificationChannel) {
        if chan != NotificationChannel::PERMANENT {
            self.opened.insert(chan);
        }
    }

    /// `NOTIFYOFF`. Closing the permanent channel is silently ignored
    /// (spec.md §3: channel 0 cannot be removed).
    pub fn close(&mut self, chan: NotificationChannel) {
        if chan != NotificationChannel::PERMANENT {
            self.opened.remove(&chan);
        }
    }
}
