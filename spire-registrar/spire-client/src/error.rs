// Copyright (c) Microsoft. All rights reserved.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unable to read TLS credentials: {0}")]
    ReadTlsCredentials(std::io::Error),
    #[error("Invalid SPIRE server endpoint: {0}")]
    Endpoint(http::uri::InvalidUri),
    #[error("Unable to configure TLS: {0}")]
    TlsConfig(tonic::transport::Error),
    #[error("Unable to connect to SPIRE server: {0}")]
    Connect(tonic::transport::Error),
    #[error("Error while listing entries: {0}")]
    ListEntries(tonic::Status),
    #[error("Error while creating entry: {0}")]
    CreateEntry(tonic::Status),
    #[error("Entry creation was rejected: {0}")]
    CreateEntryRejected(String),
    #[error("Create response carried no entry")]
    CreateResponseMissingEntry,
    #[error("Error while deleting entries: {0}")]
    DeleteEntries(tonic::Status),
    #[error("Entry deletion was rejected for {0}: {1}")]
    DeleteEntryRejected(String, String),
}
