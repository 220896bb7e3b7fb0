//! Device vtable contract (spec.md §4.8).
//!
//! The core never inspects a concrete device implementation; it only calls
//! through this trait and looks at return codes. Grounded in the teacher
//! crate's `hal::interface::DeviceBackend` object-safe trait and in
//! `ratbagd`'s `DeviceDriver` trait (`other_examples/`), both of which put
//! the transport boundary behind a single object-safe trait rather than a
//! generic parameter, so a daemon can hold a `Box<dyn DeviceOps>` per
//! attached device without monomorphizing over device families.
//!
//! Every method returns `bool`: `true` on success, `false` on transient
//! failure — the retry-with-reset harness (`retry.rs`) treats `false` as
//! "ask the transport to reset, then retry once".

use crate::device::PollRate;
use crate::vocabulary::Command;

/// `(device, mode, channel, key_or_flag, word)` in spec.md §4.8 collapse to
/// method parameters here; `device`/`mode` are implicit (the trait is
/// implemented per attached device), so only the remaining, call-site
/// varying parameters are threaded through.
pub trait DeviceOps {
    fn active(&mut self) -> bool;
    fn idle(&mut self) -> bool;
    fn reset(&mut self) -> bool;
    fn get(&mut self, channel: u16, word: &str) -> bool;
    fn fwupdate(&mut self, word: &str) -> bool;
    fn eraseprofile(&mut self) -> bool;
    fn r#macro(&mut self, channel: u16, key: usize, word: &str) -> bool;
    fn rgb(&mut self, channel: i32, key: usize, word: &str) -> bool;

    /// Whole-word direct family and per-key family dispatch
    /// (`do_cmd[verb]` in spec.md §4.8).
    fn do_cmd(&mut self, verb: Command, channel: u16, key: usize, word: &str) -> bool;

    /// `HWLOAD`/`HWSAVE` (`do_io[verb]`).
    fn do_io(&mut self, verb: Command, channel: u16) -> bool;

    /// `MACRO`/`DPI` two-sided colon dispatch (`do_macro[verb]`).
    fn do_macro(&mut self, verb: Command, channel: u16, left: &str, right: &str) -> bool;

    fn pollrate(&mut self, rate: PollRate) -> bool;
    fn updatergb(&mut self, force: bool) -> bool;
    fn updatedpi(&mut self, force: bool) -> bool;
    fn setmodeindex(&mut self, index: usize) -> bool;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::cell::RefCell;

    /// A recording fake used throughout the dispatcher/retry test suites.
    /// `fail_next` pops one scripted result per call; once exhausted, calls
    /// succeed by default.
    #[derive(Default)]
    pub struct FakeDevice {
        pub calls: RefCell<Vec<String>>,
        pub fail_next: RefCell<Vec<bool>>,
        pub reset_calls: RefCell<usize>,
    }

    impl FakeDevice {
        fn next_result(&self, label: &str) -> bool {
            self.calls.borrow_mut().push(label.to_string());
            self.fail_next.borrow_mut().pop().map(|f| !f).unwrap_or(true)
        }
    }

    impl DeviceOps for FakeDevice {
        fn active(&mut self) -> bool {
            self.next_result("active")
        }
        fn idle(&mut self) -> bool {
            self.next_result("idle")
        }
        fn reset(&mut self) -> bool {
            *self.reset_calls.borrow_mut() += 1;
            self.next_result("reset")
        }
        fn get(&mut self, _channel: u16, _word: &str) -> bool {
            self.next_result("get")
        }
        fn fwupdate(&mut self, _word: &str) -> bool {
            self.next_result("fwupdate")
        }
        fn eraseprofile(&mut self) -> bool {
            self.next_result("eraseprofile")
        }
        fn r#macro(&mut self, _channel: u16, _key: usize, _word: &str) -> bool {
            self.next_result("macro")
        }
        fn rgb(&mut self, _channel: i32, _key: usize, _word: &str) -> bool {
            self.next_result("rgb")
        }
        fn do_cmd(&mut self, verb: Command, _channel: u16, _key: usize, _word: &str) -> bool {
            self.next_result(&format!("do_cmd:{:?}", verb))
        }
        fn do_io(&mut self, verb: Command, _channel: u16) -> bool {
            self.next_result(&format!("do_io:{:?}", verb))
        }
        fn do_macro(&mut self, verb: Command, _channel: u16, _left: &str, _right: &str) -> bool {
            self.next_result(&format!("do_macro:{:?}", verb))
        }
        fn pollrate(&mut self, _rate: PollRate) -> bool {
            self.next_result("pollrate")
        }
        fn updatergb(&mut self, _force: bool) -> bool {
            self.next_result("updatergb")
        }
        fn updatedpi(&mut self, _force: bool) -> bool {
            self.next_result("updatedpi")
        }
        fn setmodeindex(&mut self, _index: usize) -> bool {
            self.next_result("setmodeindex")
        }
    }
}
