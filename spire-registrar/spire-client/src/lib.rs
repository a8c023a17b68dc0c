// Copyright (c) Microsoft. All rights reserved.

#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod grpc_client;
mod spire_connector;

#[cfg(feature = "tests")]
mod fake_connector;

pub use error::Error;
pub use grpc_client::SpireGrpcClient;
pub use spire_connector::SpireConnector;

#[cfg(feature = "tests")]
pub use fake_connector::SpireFakeConnector;
