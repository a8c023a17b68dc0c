// Copyright (c) Microsoft. All rights reserved.

#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

//! Loads and persists the attestor plugin configuration documents kept
//! next to the identity server, `k8s_psat.json` for the PSAT node
//! attestor and `k8s_bundle.json` for the bundle publisher.
//!
//! The documents are provisioned together with the server. A missing
//! file is a hard error, never treated as an empty document.

use std::path::{Path, PathBuf};

use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;

mod bundle;
mod error;
mod psat;

pub use bundle::{BundleCluster, BundleDocument};
pub use error::Error;
pub use psat::{PsatCluster, PsatDocument};

pub const PSAT_CONFIG_FILE: &str = "k8s_psat.json";
pub const BUNDLE_CONFIG_FILE: &str = "k8s_bundle.json";

/// Reads and writes the attestor documents under one configuration root.
pub struct ConfigStore {
    config_dir: PathBuf,
}

impl ConfigStore {
    #[must_use]
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        ConfigStore {
            config_dir: config_dir.into(),
        }
    }

    pub fn load_psat(&self) -> Result<PsatDocument, Error> {
        load_inner(&self.config_dir.join(PSAT_CONFIG_FILE))
    }

    pub fn save_psat(&self, document: &PsatDocument) -> Result<(), Error> {
        save_inner(&self.config_dir.join(PSAT_CONFIG_FILE), document)
    }

    pub fn load_bundle(&self) -> Result<BundleDocument, Error> {
        load_inner(&self.config_dir.join(BUNDLE_CONFIG_FILE))
    }

    pub fn save_bundle(&self, document: &BundleDocument) -> Result<(), Error> {
        save_inner(&self.config_dir.join(BUNDLE_CONFIG_FILE), document)
    }
}

fn load_inner<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let name = path.display().to_string();

    let data = std::fs::read(path).map_err(|err| Error::ReadDocument(name.clone(), err))?;

    serde_json::from_slice(&data).map_err(|err| Error::ParseDocument(name, err))
}

// The documents are read by humans and diffed by provisioning tools, so
// they are written pretty printed with two space indentation.
fn save_inner<T: Serialize>(path: &Path, document: &T) -> Result<(), Error> {
    let name = path.display().to_string();

    let data = serde_json::to_vec_pretty(document)
        .map_err(|err| Error::SerializeDocument(name.clone(), err))?;

    std::fs::write(path, data).map_err(|err| Error::WriteDocument(name.clone(), err))?;

    info!("Updated {}", name);

    Ok(())
}
