// Copyright (c) Microsoft. All rights reserved.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Configuration of the PSAT node attestor plugin.
///
/// On disk the cluster map is wrapped in a one element sequence of maps.
/// Only the first element is ever consulted by the attestor, so this type
/// keeps a single real map and restores the wire shape on serialization.
/// Extra buckets found in a hand-edited file are carried along untouched
/// rather than silently dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PsatDocumentWire", into = "PsatDocumentWire")]
pub struct PsatDocument {
    clusters: BTreeMap<String, PsatCluster>,
    trailing: Vec<BTreeMap<String, PsatCluster>>,
}

/// One cluster the PSAT attestor accepts tokens from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PsatCluster {
    pub service_account_allow_list: Vec<String>,
    pub kube_config_file: String,
}

impl PsatDocument {
    #[must_use]
    pub fn cluster(&self, name: &str) -> Option<&PsatCluster> {
        self.clusters.get(name)
    }

    #[must_use]
    pub fn contains_cluster(&self, name: &str) -> bool {
        self.clusters.contains_key(name)
    }

    /// Insert the cluster, or replace its configuration in place when the
    /// name is already present. Repeating the call with identical
    /// arguments leaves the serialized document unchanged.
    pub fn upsert_cluster(&mut self, name: &str, cluster: PsatCluster) {
        self.clusters.insert(name.to_string(), cluster);
    }

    /// Remove the cluster. Returns false when the name was not present.
    pub fn remove_cluster(&mut self, name: &str) -> bool {
        self.clusters.remove(name).is_some()
    }
}

#[derive(Serialize, Deserialize)]
struct PsatDocumentWire {
    clusters: Vec<BTreeMap<String, PsatCluster>>,
}

impl From<PsatDocumentWire> for PsatDocument {
    fn from(wire: PsatDocumentWire) -> PsatDocument {
        let mut buckets = wire.clusters.into_iter();

        PsatDocument {
            clusters: buckets.next().unwrap_or_default(),
            trailing: buckets.collect(),
        }
    }
}

impl From<PsatDocument> for PsatDocumentWire {
    fn from(document: PsatDocument) -> PsatDocumentWire {
        let mut clusters = vec![document.clusters];
        clusters.extend(document.trailing);

        PsatDocumentWire { clusters }
    }
}
