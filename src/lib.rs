//! `keyboardd_core`: the per-device command dispatcher for a programmable
//! RGB keyboard/mouse daemon. A streaming tokenizer, notification-channel
//! selector, capability/lifecycle gate, polymorphic dispatcher,
//! retry-with-reset harness, and RGB-rate-limited flush — everything else
//! (USB transport, device enumeration, concrete per-model vtable
//! implementations, persistence) is an external collaborator the core only
//! talks to through [`vtable::DeviceOps`].

pub mod channel;
pub mod config;
pub mod device;
mod dispatch;
pub mod error;
pub mod flush;
pub mod gate;
pub mod keymap;
pub mod notify;
mod retry;
pub mod tokenizer;
pub mod vocabulary;
pub mod vtable;

pub use device::Device;
pub use dispatch::dispatch_line;
pub use error::DispatchError;
pub use notify::NotifyTable;
pub use vtable::DeviceOps;
