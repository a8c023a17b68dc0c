// Copyright (c) Microsoft. All rights reserved.

#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::default_trait_access,
    clippy::let_unit_value,
    clippy::missing_errors_doc,
    clippy::similar_names,
    clippy::too_many_lines
)]

use serde::{Deserialize, Serialize};

#[derive(Debug, serde::Deserialize, serde::Serialize, Clone, PartialEq, Eq)]
pub struct SPIFFEID {
    pub trust_domain: String,
    pub path: String,
}

impl std::fmt::Display for SPIFFEID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "spiffe://{}{}", self.trust_domain, self.path)
    }
}

/// One attestation fact attached to a registration record. The type token
/// selects the attestor plugin, the value is `key:content`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Selector {
    #[serde(rename = "type")]
    pub selector_type: String,
    pub value: String,
}

/// The registration server's view of one issued identity. The id is assigned
/// server-side; records submitted for creation leave it empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistrationRecord {
    pub id: String,
    pub spiffe_id: SPIFFEID,
    pub parent_id: SPIFFEID,
    pub selectors: Vec<Selector>,
}

/// The inbound unit of work: one workload or agent identity to register or
/// deregister, plus the attestor wiring that goes with it.
///
/// Field names follow the original wire format of the registrar API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub trust_domain: String,
    pub service_account: String,
    pub namespace: String,
    pub cluster: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kube_config: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spire_dir: Option<String>,
}

impl Entry {
    /// Name of the first required field that is missing or empty, if any.
    #[must_use]
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.trust_domain.is_empty() {
            Some("trustDomain")
        } else if self.service_account.is_empty() {
            Some("serviceAccount")
        } else if self.namespace.is_empty() {
            Some("namespace")
        } else if self.cluster.is_empty() {
            Some("cluster")
        } else {
            None
        }
    }

    /// Credential payload, filtered to non-empty. An empty string on the wire
    /// means the same as an absent field.
    #[must_use]
    pub fn credential_payload(&self) -> Option<&str> {
        self.kube_config.as_deref().filter(|kc| !kc.is_empty())
    }
}

#[cfg(feature = "tests")]
pub const CONFIG_DEFAULT_PATH: &str = "../../spire-registrar/config/tests/Config.toml";
