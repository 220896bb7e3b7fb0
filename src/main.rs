//! `keyboardd`: a demo front-end that feeds stdin lines through
//! `keyboardd_core`'s dispatcher against a logging-only device backend.
//! Real device transports are external collaborators (spec.md §1); this
//! binary exists to exercise the dispatcher end to end, not to drive real
//! hardware.

use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};

mod cli;

use cli::Cli;
use keyboardd_core::config::PlatformConfig;
use keyboardd_core::device::PollRate;
use keyboardd_core::{dispatch_line, Device, DeviceOps, NotifyTable};

/// A `DeviceOps` implementation that only logs what it was asked to do.
/// Stands in for a concrete per-model vtable (spec.md §4.8), which is
/// always supplied by an external collaborator.
struct LoggingDevice;

impl DeviceOps for LoggingDevice {
    fn active(&mut self) -> bool {
        info!("vtable.active");
        true
    }
    fn idle(&mut self) -> bool {
        info!("vtable.idle");
        true
    }
    fn reset(&mut self) -> bool {
        warn!("vtable.reset");
        true
    }
    fn get(&mut self, channel: u16, word: &str) -> bool {
        info!(channel, word, "vtable.get");
        true
    }
    fn fwupdate(&mut self, word: &str) -> bool {
        info!(word, "vtable.fwupdate");
        true
    }
    fn eraseprofile(&mut self) -> bool {
        info!("vtable.eraseprofile");
        true
    }
    fn r#macro(&mut self, channel: u16, key: usize, word: &str) -> bool {
        info!(channel, key, word, "vtable.macro");
        true
    }
    fn rgb(&mut self, channel: i32, key: usize, word: &str) -> bool {
        info!(channel, key, word, "vtable.rgb");
        true
    }
    fn do_cmd(
        &mut self,
        verb: keyboardd_core::vocabulary::Command,
        channel: u16,
        key: usize,
        word: &str,
    ) -> bool {
        info!(?verb, channel, key, word, "vtable.do_cmd");
        true
    }
    fn do_io(&mut self, verb: keyboardd_core::vocabulary::Command, channel: u16) -> bool {
        info!(?verb, channel, "vtable.do_io");
        true
    }
    fn do_macro(
        &mut self,
        verb: keyboardd_core::vocabulary::Command,
        channel: u16,
        left: &str,
        right: &str,
    ) -> bool {
        info!(?verb, channel, left, right, "vtable.do_macro");
        true
    }
    fn pollrate(&mut self, rate: PollRate) -> bool {
        info!(?rate, "vtable.pollrate");
        true
    }
    fn updatergb(&mut self, force: bool) -> bool {
        info!(force, "vtable.updatergb");
        true
    }
    fn updatedpi(&mut self, force: bool) -> bool {
        info!(force, "vtable.updatedpi");
        true
    }
    fn setmodeindex(&mut self, index: usize) -> bool {
        info!(index, "vtable.setmodeindex");
        true
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("keyboardd=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            PlatformConfig::from_toml(&text)?
        }
        None => PlatformConfig::default(),
    };

    let mut device = Device::new(config, !cli.iso);
    device.active = cli.active;
    let mut notify = NotifyTable::new();
    let mut ops = LoggingDevice;

    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = running.clone();
    ctrlc::set_handler(move || handler_flag.store(false, Ordering::SeqCst))?;

    info!("keyboardd dispatcher core demo: reading command lines from stdin");
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !running.load(Ordering::SeqCst) {
            break;
        }
        let line = line?;
        if let Err(err) = dispatch_line(&line, &mut device, &mut notify, &mut ops) {
            error!(%err, "line aborted");
        }
    }

    Ok(())
}
