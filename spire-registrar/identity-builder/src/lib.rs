// Copyright (c) Microsoft. All rights reserved.

#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_panics_doc)]

//! Derives SPIFFE identity paths, parent identities and attestation
//! selectors from a registration entry.
//!
//! Identities in the `spire` namespace under the `spire-agent` service
//! account are node identities: they attest straight to the server root
//! with projected service account token selectors. Every other identity
//! is a workload that attests through that agent identity with plain
//! Kubernetes selectors.

use core_objects::{Entry, RegistrationRecord, Selector, SPIFFEID};

pub const AGENT_NAMESPACE: &str = "spire";
pub const AGENT_SERVICE_ACCOUNT: &str = "spire-agent";

/// Parent of node identities, directly under the server.
pub const SERVER_ROOT_PATH: &str = "/spire/server";

/// Selector type understood by the PSAT node attestor plugin.
pub const PSAT_SELECTOR_TYPE: &str = "k8s_psat";
/// Selector type understood by the Kubernetes workload attestor plugin.
pub const K8S_SELECTOR_TYPE: &str = "k8s";

const NAMESPACE_KEY: &str = "ns";
const SERVICE_ACCOUNT_KEY: &str = "sa";
const AGENT_NAMESPACE_KEY: &str = "agent_ns";
const AGENT_SERVICE_ACCOUNT_KEY: &str = "agent_sa";
const CLUSTER_KEY: &str = "cluster";
const POD_LABEL_CLUSTER_KEY: &str = "pod-label:spiffe.io/cluster";

/// Path of the identity issued for a service account, `/ns/<ns>/sa/<sa>`.
/// Node and workload identities share the same formula.
#[must_use]
pub fn identity_path(namespace: &str, service_account: &str) -> String {
    format!("/ns/{}/sa/{}", namespace, service_account)
}

/// True when the entry describes the agent identity that anchors the
/// cluster to the server.
#[must_use]
pub fn is_trust_anchor(entry: &Entry) -> bool {
    entry.namespace == AGENT_NAMESPACE && entry.service_account == AGENT_SERVICE_ACCOUNT
}

/// SPIFFE ID issued for the entry.
#[must_use]
pub fn spiffe_id(entry: &Entry) -> SPIFFEID {
    SPIFFEID {
        trust_domain: entry.trust_domain.clone(),
        path: identity_path(&entry.namespace, &entry.service_account),
    }
}

/// Identity the entry attests through. `/spire/server` for the agent
/// identity, the agent identity for everything else.
#[must_use]
pub fn parent_id(entry: &Entry) -> SPIFFEID {
    let path = if is_trust_anchor(entry) {
        SERVER_ROOT_PATH.to_string()
    } else {
        identity_path(AGENT_NAMESPACE, AGENT_SERVICE_ACCOUNT)
    };

    SPIFFEID {
        trust_domain: entry.trust_domain.clone(),
        path,
    }
}

/// Attestation selectors for the entry, in the order the attestor
/// expects them: cluster, namespace, service account.
#[must_use]
pub fn selectors(entry: &Entry) -> Vec<Selector> {
    let (selector_type, cluster_key, namespace_key, service_account_key) = if is_trust_anchor(entry)
    {
        (
            PSAT_SELECTOR_TYPE,
            CLUSTER_KEY,
            AGENT_NAMESPACE_KEY,
            AGENT_SERVICE_ACCOUNT_KEY,
        )
    } else {
        (
            K8S_SELECTOR_TYPE,
            POD_LABEL_CLUSTER_KEY,
            NAMESPACE_KEY,
            SERVICE_ACCOUNT_KEY,
        )
    };

    vec![
        Selector {
            selector_type: selector_type.to_string(),
            value: format!("{}:{}", cluster_key, entry.cluster),
        },
        Selector {
            selector_type: selector_type.to_string(),
            value: format!("{}:{}", namespace_key, entry.namespace),
        },
        Selector {
            selector_type: selector_type.to_string(),
            value: format!("{}:{}", service_account_key, entry.service_account),
        },
    ]
}

/// Complete registration record for the entry. The record id is left
/// empty, it is assigned by the server on creation.
#[must_use]
pub fn registration_record(entry: &Entry) -> RegistrationRecord {
    RegistrationRecord {
        id: String::new(),
        spiffe_id: spiffe_id(entry),
        parent_id: parent_id(entry),
        selectors: selectors(entry),
    }
}

/// Service accounts allowed to deliver PSATs when no allow list is
/// configured.
#[must_use]
pub fn default_service_account_allow_list() -> Vec<String> {
    vec![format!("{}:{}", AGENT_NAMESPACE, AGENT_SERVICE_ACCOUNT)]
}
