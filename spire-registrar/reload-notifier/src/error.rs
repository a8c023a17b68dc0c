// Copyright (c) Microsoft. All rights reserved.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown reload signal {0}: {1}")]
    UnknownSignal(String, nix::Error),
    #[error("Unable to enumerate processes: {0}")]
    ListProcesses(std::io::Error),
    #[error("Unable to deliver reload signal: {0}")]
    SignalDelivery(String),
}
