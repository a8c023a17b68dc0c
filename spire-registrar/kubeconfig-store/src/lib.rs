// Copyright (c) Microsoft. All rights reserved.

#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

//! Keeps one kubeconfig file per cluster under the `kubeconfigs/`
//! directory of the configuration root. The directory itself is
//! provisioned together with the identity server and is never created
//! here.

use std::path::{Path, PathBuf};

use log::info;

mod error;

pub use error::Error;

pub const KUBECONFIG_DIR: &str = "kubeconfigs";
const KUBECONFIG_EXTENSION: &str = "yaml";

pub struct KubeconfigStore {
    kubeconfig_dir: PathBuf,
}

impl KubeconfigStore {
    #[must_use]
    pub fn new(config_dir: impl AsRef<Path>) -> Self {
        KubeconfigStore {
            kubeconfig_dir: config_dir.as_ref().join(KUBECONFIG_DIR),
        }
    }

    /// Path of the kubeconfig file for the cluster,
    /// `<config_dir>/kubeconfigs/<cluster>.yaml`.
    #[must_use]
    pub fn credential_path(&self, cluster: &str) -> PathBuf {
        self.kubeconfig_dir
            .join(format!("{}.{}", cluster, KUBECONFIG_EXTENSION))
    }

    #[must_use]
    pub fn exists(&self, cluster: &str) -> bool {
        self.credential_path(cluster).exists()
    }

    /// Decode the base64 payload and persist it for the cluster.
    ///
    /// When the file already holds the same content the write is skipped,
    /// so an unchanged kubeconfig never dirties the file's timestamps.
    /// New content replaces the file through a rename, a concurrently
    /// reloading server never observes a partial file.
    pub fn write(&self, cluster: &str, payload: &str) -> Result<(), Error> {
        if !self.kubeconfig_dir.is_dir() {
            return Err(Error::DirectoryMissing(
                self.kubeconfig_dir.display().to_string(),
            ));
        }

        let content = base64::decode(payload).map_err(Error::InvalidEncoding)?;

        let path = self.credential_path(cluster);
        let name = path.display().to_string();

        if path.exists() {
            let current =
                std::fs::read(&path).map_err(|err| Error::ReadFile(name.clone(), err))?;
            if base64::encode(&current) == payload {
                info!("Kubeconfig {} is unchanged, skipping write", name);
                return Ok(());
            }
        }

        let staging = self
            .kubeconfig_dir
            .join(format!("{}.{}.tmp", cluster, KUBECONFIG_EXTENSION));
        std::fs::write(&staging, &content).map_err(|err| Error::WriteFile(name.clone(), err))?;
        std::fs::rename(&staging, &path).map_err(|err| Error::WriteFile(name.clone(), err))?;

        info!("Wrote kubeconfig {}", name);

        Ok(())
    }

    /// Delete the kubeconfig for the cluster. A file that is already gone
    /// is not an error.
    pub fn remove(&self, cluster: &str) -> Result<(), Error> {
        let path = self.credential_path(cluster);

        if !path.exists() {
            info!(
                "Kubeconfig {} does not exist, skipping deletion",
                path.display()
            );
            return Ok(());
        }

        std::fs::remove_file(&path)
            .map_err(|err| Error::DeleteFile(path.display().to_string(), err))?;

        info!("Deleted kubeconfig {}", path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init(dir: &Path) -> KubeconfigStore {
        std::fs::create_dir(dir.join(KUBECONFIG_DIR)).unwrap();

        KubeconfigStore::new(dir)
    }

    #[test]
    fn credential_path_is_cluster_yaml() {
        let store = KubeconfigStore::new("/opt/spire/conf");

        assert_eq!(
            store.credential_path("prod-a"),
            PathBuf::from("/opt/spire/conf/kubeconfigs/prod-a.yaml")
        );
    }

    #[test]
    fn write_decodes_payload() {
        let dir = tempfile::tempdir().unwrap();
        let store = init(dir.path());

        store.write("prod-a", &base64::encode("apiVersion: v1")).unwrap();

        let written = std::fs::read_to_string(store.credential_path("prod-a")).unwrap();
        assert_eq!(written, "apiVersion: v1");
        assert!(store.exists("prod-a"));
    }

    #[test]
    fn unchanged_payload_skips_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = init(dir.path());

        let payload = base64::encode("apiVersion: v1");

        store.write("prod-a", &payload).unwrap();
        let modified = std::fs::metadata(store.credential_path("prod-a"))
            .unwrap()
            .modified()
            .unwrap();

        store.write("prod-a", &payload).unwrap();
        let modified2 = std::fs::metadata(store.credential_path("prod-a"))
            .unwrap()
            .modified()
            .unwrap();

        assert_eq!(modified, modified2);
    }

    #[test]
    fn changed_payload_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = init(dir.path());

        store.write("prod-a", &base64::encode("apiVersion: v1")).unwrap();
        store
            .write("prod-a", &base64::encode("apiVersion: v2"))
            .unwrap();

        let written = std::fs::read_to_string(store.credential_path("prod-a")).unwrap();
        assert_eq!(written, "apiVersion: v2");
    }

    #[test]
    fn invalid_payload_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = init(dir.path());

        let error = store.write("prod-a", "not base64!").unwrap_err();

        if let Error::InvalidEncoding(_) = error {
        } else {
            panic!("Wrong error type returned for write")
        };
        assert!(!store.exists("prod-a"));
    }

    #[test]
    fn missing_directory_fails_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = KubeconfigStore::new(dir.path());

        let error = store.write("prod-a", &base64::encode("apiVersion: v1")).unwrap_err();

        if let Error::DirectoryMissing(_) = error {
        } else {
            panic!("Wrong error type returned for write")
        };
    }

    #[test]
    fn remove_deletes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = init(dir.path());

        store.write("prod-a", &base64::encode("apiVersion: v1")).unwrap();
        store.remove("prod-a").unwrap();

        assert!(!store.exists("prod-a"));
    }

    #[test]
    fn remove_absent_file_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = init(dir.path());

        store.remove("prod-a").unwrap();
    }
}
