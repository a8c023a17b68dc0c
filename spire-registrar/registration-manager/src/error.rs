// Copyright (c) Microsoft. All rights reserved.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Registration request failed: {0}")]
    Registration(spire_client::Error),
    #[error("Unable to update attestor configuration: {0}")]
    AttestorConfig(attestor_config::Error),
    #[error("Unable to sync kubeconfig: {0}")]
    Kubeconfig(kubeconfig_store::Error),
    #[error("Unable to signal identity server reload: {0}")]
    Reload(reload_notifier::Error),
}
