// Copyright (c) Microsoft. All rights reserved.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid bind address {0}: {1}")]
    BindAddress(String, std::net::AddrParseError),
    #[error("Unable to bind the registrar API endpoint: {0}")]
    Bind(hyper::Error),
    #[error("Error while serving the registrar API: {0}")]
    Serve(hyper::Error),
}
