// Copyright (c) Microsoft. All rights reserved.

#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

//! Tells the identity server to reload its configuration by signalling
//! every process running under its executable name.

use std::path::Path;
use std::str::FromStr;

use log::{info, warn};
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use registrar_config::ServerReloadConfig;

mod error;

#[cfg(feature = "tests")]
mod fake_notifier;

pub use error::Error;

#[cfg(feature = "tests")]
pub use fake_notifier::FakeNotifier;

#[async_trait::async_trait]
pub trait ReloadNotifier: Sync + Send {
    /// Deliver the reload signal to every matching server process.
    ///
    /// Zero matching processes is not an error, the server may be managed
    /// externally and reload through some other channel. Delivery is
    /// attempted for every match even when one of them fails.
    async fn notify(&self) -> Result<(), Error>;
}

/// Signals processes found by scanning `/proc` for the configured
/// executable name.
#[derive(Debug)]
pub struct SignalNotifier {
    process_name: String,
    signal: Signal,
}

impl SignalNotifier {
    pub fn new(config: &ServerReloadConfig) -> Result<Self, Error> {
        let signal = Signal::from_str(&config.signal)
            .map_err(|err| Error::UnknownSignal(config.signal.clone(), err))?;

        Ok(SignalNotifier {
            process_name: config.process_name.clone(),
            signal,
        })
    }
}

#[async_trait::async_trait]
impl ReloadNotifier for SignalNotifier {
    async fn notify(&self) -> Result<(), Error> {
        let pids = find_pids_by_name(&self.process_name)?;

        if pids.is_empty() {
            warn!("No {} process found", self.process_name);
            return Ok(());
        }

        let mut failures = Vec::new();

        for pid in pids {
            match kill(Pid::from_raw(pid), self.signal) {
                Ok(()) => info!(
                    "Sent {} to {} process with PID {}",
                    self.signal, self.process_name, pid
                ),
                Err(err) => failures.push(format!("pid {}: {}", pid, err)),
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::SignalDelivery(failures.join(", ")))
        }
    }
}

/// PIDs of every process whose executable name matches exactly. The name
/// is compared against `/proc/<pid>/comm`, which the kernel truncates to
/// 15 characters.
fn find_pids_by_name(name: &str) -> Result<Vec<i32>, Error> {
    let mut pids = Vec::new();

    for entry in std::fs::read_dir("/proc").map_err(Error::ListProcesses)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => continue,
        };

        let pid: i32 = match entry.file_name().to_string_lossy().parse() {
            Ok(pid) => pid,
            Err(_) => continue,
        };

        // The process may exit between the directory scan and this read.
        let comm = match std::fs::read_to_string(Path::new("/proc").join(pid.to_string()).join("comm"))
        {
            Ok(comm) => comm,
            Err(_) => continue,
        };

        if comm.trim_end() == name {
            pids.push(pid);
        }
    }

    Ok(pids)
}
