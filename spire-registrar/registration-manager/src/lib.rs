// Copyright (c) Microsoft. All rights reserved.

#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

//! Drives one registration or deregistration end to end: create or
//! delete the records on the SPIRE server, mirror the cluster into the
//! attestor configuration documents and kubeconfig files, and tell the
//! server to reload.
//!
//! A record that was created remotely is never rolled back when a later
//! step fails. A registered identity without attestor wiring is
//! recoverable by retrying, a deleted identity is not.

use std::sync::Arc;

use attestor_config::{ConfigStore, PsatCluster};
use core_objects::{Entry, RegistrationRecord};
use futures_util::lock::Mutex;
use kubeconfig_store::KubeconfigStore;
use log::{info, warn};
use registrar_config::Config;
use reload_notifier::ReloadNotifier;
use spire_client::SpireConnector;

mod error;

pub use error::Error;

pub struct RegistrationManager {
    connector: Arc<dyn SpireConnector>,
    notifier: Arc<dyn ReloadNotifier>,
    config_dir: String,
    service_account_allow_list: Vec<String>,
    sync_bundle_clusters: bool,
    fatal_reload_errors: bool,
    // Serializes the load-mutate-save cycles on the attestor documents.
    // Concurrent requests would otherwise lose updates to each other.
    document_lock: Mutex<()>,
}

impl RegistrationManager {
    #[must_use]
    pub fn new(
        config: &Config,
        connector: Arc<dyn SpireConnector>,
        notifier: Arc<dyn ReloadNotifier>,
    ) -> Self {
        let service_account_allow_list = config
            .sync_policy
            .service_account_allow_list
            .clone()
            .unwrap_or_else(identity_builder::default_service_account_allow_list);

        RegistrationManager {
            connector,
            notifier,
            config_dir: config.config_dir.clone(),
            service_account_allow_list,
            sync_bundle_clusters: config.sync_policy.sync_bundle_clusters,
            fatal_reload_errors: config.sync_policy.fatal_reload_errors,
            document_lock: Mutex::new(()),
        }
    }

    /// Register the identity on the SPIRE server and, when the entry
    /// carries a kubeconfig, wire the cluster into the attestor
    /// configuration. Returns the id of the created record.
    pub async fn register(&self, entry: &Entry) -> Result<String, Error> {
        let record = identity_builder::registration_record(entry);
        let spiffe_id = record.spiffe_id.clone();

        let record_id = self
            .connector
            .create_entry(record)
            .await
            .map_err(Error::Registration)?;

        info!("Registered {} as record {}", spiffe_id, record_id);

        if let Some(payload) = entry.credential_payload() {
            self.sync_attestor_config(entry, payload).await?;
            self.reload_server().await?;
        } else {
            info!(
                "Entry for {} carries no kubeconfig, leaving attestor configuration untouched",
                spiffe_id
            );
        }

        Ok(record_id)
    }

    /// Remove every record registered for the entry's identity. An
    /// identity with no records left deregisters successfully without
    /// touching anything. The attestor configuration is only unwired for
    /// the trust anchor identity, workload clusters stay configured.
    pub async fn deregister(&self, entry: &Entry) -> Result<(), Error> {
        let spiffe_id = identity_builder::spiffe_id(entry);

        let records = self
            .connector
            .get_entries_by_spiffe_id(&spiffe_id)
            .await
            .map_err(Error::Registration)?;

        if records.is_empty() {
            info!("No registration records for {}, nothing to do", spiffe_id);
            return Ok(());
        }

        let ids = records.into_iter().map(|record| record.id).collect();

        self.connector
            .delete_entries(ids)
            .await
            .map_err(Error::Registration)?;

        info!("Deregistered {}", spiffe_id);

        if identity_builder::is_trust_anchor(entry) {
            self.remove_attestor_config(entry).await?;
            self.reload_server().await?;
        }

        Ok(())
    }

    /// All records currently held by the SPIRE server.
    pub async fn list_records(&self) -> Result<Vec<RegistrationRecord>, Error> {
        self.connector
            .get_entries()
            .await
            .map_err(Error::Registration)
    }

    async fn sync_attestor_config(&self, entry: &Entry, payload: &str) -> Result<(), Error> {
        let root = self.resolve_root(entry);
        let kubeconfigs = KubeconfigStore::new(&root);
        let documents = ConfigStore::new(&root);

        let _guard = self.document_lock.lock().await;

        kubeconfigs
            .write(&entry.cluster, payload)
            .map_err(Error::Kubeconfig)?;

        let credential_path = kubeconfigs
            .credential_path(&entry.cluster)
            .display()
            .to_string();

        let mut psat = documents.load_psat().map_err(Error::AttestorConfig)?;
        psat.upsert_cluster(
            &entry.cluster,
            PsatCluster {
                service_account_allow_list: self.service_account_allow_list.clone(),
                kube_config_file: credential_path.clone(),
            },
        );
        documents.save_psat(&psat).map_err(Error::AttestorConfig)?;

        if self.sync_bundle_clusters {
            let mut bundle = documents.load_bundle().map_err(Error::AttestorConfig)?;
            bundle.upsert_cluster(&credential_path);
            documents.save_bundle(&bundle).map_err(Error::AttestorConfig)?;
        }

        Ok(())
    }

    async fn remove_attestor_config(&self, entry: &Entry) -> Result<(), Error> {
        let root = self.resolve_root(entry);
        let kubeconfigs = KubeconfigStore::new(&root);
        let documents = ConfigStore::new(&root);

        let _guard = self.document_lock.lock().await;

        let mut psat = documents.load_psat().map_err(Error::AttestorConfig)?;
        if psat.remove_cluster(&entry.cluster) {
            documents.save_psat(&psat).map_err(Error::AttestorConfig)?;
        } else {
            info!(
                "Cluster {} is not in the PSAT configuration, skipping removal",
                entry.cluster
            );
        }

        if self.sync_bundle_clusters {
            let credential_path = kubeconfigs
                .credential_path(&entry.cluster)
                .display()
                .to_string();

            let mut bundle = documents.load_bundle().map_err(Error::AttestorConfig)?;
            if bundle.remove_cluster(&credential_path) {
                documents.save_bundle(&bundle).map_err(Error::AttestorConfig)?;
            }
        }

        kubeconfigs
            .remove(&entry.cluster)
            .map_err(Error::Kubeconfig)?;

        Ok(())
    }

    async fn reload_server(&self) -> Result<(), Error> {
        if let Err(err) = self.notifier.notify().await {
            if self.fatal_reload_errors {
                return Err(Error::Reload(err));
            }

            warn!("Unable to signal identity server reload: {}", err);
        }

        Ok(())
    }

    // An entry may name its own configuration root, deployments with a
    // single identity server rely on the configured default.
    fn resolve_root(&self, entry: &Entry) -> String {
        entry
            .spire_dir
            .clone()
            .filter(|dir| !dir.is_empty())
            .unwrap_or_else(|| self.config_dir.clone())
    }
}
