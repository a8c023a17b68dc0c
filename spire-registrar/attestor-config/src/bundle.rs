// Copyright (c) Microsoft. All rights reserved.

use serde::{Deserialize, Serialize};

/// Configuration of the bundle publisher, a flat list of clusters keyed
/// by their kubeconfig path. The document has no cluster name field, so
/// membership is decided by a scan over the paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleDocument {
    clusters: Vec<BundleCluster>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BundleCluster {
    pub kube_config_file_path: String,
}

impl BundleDocument {
    #[must_use]
    pub fn contains(&self, kube_config_file_path: &str) -> bool {
        self.clusters
            .iter()
            .any(|cluster| cluster.kube_config_file_path == kube_config_file_path)
    }

    /// Append the cluster unless a cluster with the same kubeconfig path
    /// is already listed.
    pub fn upsert_cluster(&mut self, kube_config_file_path: &str) {
        if self.contains(kube_config_file_path) {
            return;
        }

        self.clusters.push(BundleCluster {
            kube_config_file_path: kube_config_file_path.to_string(),
        });
    }

    /// Remove every cluster with the given kubeconfig path. Returns false
    /// when none was listed.
    pub fn remove_cluster(&mut self, kube_config_file_path: &str) -> bool {
        let before = self.clusters.len();
        self.clusters
            .retain(|cluster| cluster.kube_config_file_path != kube_config_file_path);

        self.clusters.len() != before
    }
}
