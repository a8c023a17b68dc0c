// Copyright (c) Microsoft. All rights reserved.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unable to read {0}: {1}")]
    ReadDocument(String, std::io::Error),
    #[error("Unable to parse {0}: {1}")]
    ParseDocument(String, serde_json::Error),
    #[error("Unable to serialize {0}: {1}")]
    SerializeDocument(String, serde_json::Error),
    #[error("Unable to write {0}: {1}")]
    WriteDocument(String, std::io::Error),
}

impl Error {
    /// True for errors raised while loading a document, false for errors
    /// raised while persisting one.
    #[must_use]
    pub fn is_read(&self) -> bool {
        matches!(self, Error::ReadDocument(_, _) | Error::ParseDocument(_, _))
    }
}
