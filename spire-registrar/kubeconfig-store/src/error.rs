// Copyright (c) Microsoft. All rights reserved.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid base64 kubeconfig payload: {0}")]
    InvalidEncoding(base64::DecodeError),
    #[error("Kubeconfig directory {0} does not exist")]
    DirectoryMissing(String),
    #[error("Unable to read kubeconfig {0}: {1}")]
    ReadFile(String, std::io::Error),
    #[error("Unable to write kubeconfig {0}: {1}")]
    WriteFile(String, std::io::Error),
    #[error("Unable to delete kubeconfig {0}: {1}")]
    DeleteFile(String, std::io::Error),
}
