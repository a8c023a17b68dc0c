// Copyright (c) Microsoft. All rights reserved.

#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use std::io;
use std::path::Path;

use serde::Deserialize;

/// Configuration of the SPIRE registrar.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Directory containing the attestor plugin configuration files
    /// (`k8s_psat.json`, `k8s_bundle.json`) and the `kubeconfigs/` folder.
    pub config_dir: String,
    /// Registration HTTP API endpoint.
    #[serde(alias = "registrar-api")]
    pub registrar_api: RegistrarApiConfig,
    /// SPIRE server gRPC endpoint.
    #[serde(alias = "spire-server")]
    pub spire_server: SpireServerConfig,
    /// Synchronization policy knobs.
    #[serde(default, alias = "sync-policy")]
    pub sync_policy: SyncPolicyConfig,
    /// How the SPIRE server process is told to reload its configuration.
    #[serde(default, alias = "server-reload")]
    pub server_reload: ServerReloadConfig,
}

/// Bind address of the registration HTTP API.
#[derive(Clone, Debug, Deserialize)]
pub struct RegistrarApiConfig {
    pub bind_address: String,
    pub bind_port: u16,
}

/// Address and credentials of the SPIRE server entry API.
#[derive(Clone, Debug, Deserialize)]
pub struct SpireServerConfig {
    /// Host name or IP of the SPIRE server.
    pub address: String,
    /// Port of the SPIRE server gRPC endpoint.
    pub port: u16,
    /// Overrides the name the server certificate is verified against.
    /// Defaults to `address` when unset.
    #[serde(default)]
    pub domain_name: Option<String>,
    pub tls: TlsConfig,
}

/// Paths to the PEM encoded client credentials used to authenticate
/// against the SPIRE server.
#[derive(Clone, Debug, Deserialize)]
pub struct TlsConfig {
    pub cert_path: String,
    pub key_path: String,
    pub ca_path: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SyncPolicyConfig {
    /// Mirror cluster entries into the bundle attestor document.
    #[serde(default)]
    pub sync_bundle_clusters: bool,
    /// Fail registration calls when the reload signal cannot be delivered.
    #[serde(default = "default_fatal_reload_errors")]
    pub fatal_reload_errors: bool,
    /// Service accounts allowed to deliver PSATs for a cluster.
    /// Defaults to the agent service account when unset.
    #[serde(default)]
    pub service_account_allow_list: Option<Vec<String>>,
}

impl Default for SyncPolicyConfig {
    fn default() -> Self {
        SyncPolicyConfig {
            sync_bundle_clusters: false,
            fatal_reload_errors: default_fatal_reload_errors(),
            service_account_allow_list: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerReloadConfig {
    /// Name the SPIRE server process is discovered by.
    #[serde(default = "default_process_name")]
    pub process_name: String,
    /// Signal delivered to trigger the reload, for example "SIGUSR1".
    #[serde(default = "default_signal")]
    pub signal: String,
}

impl Default for ServerReloadConfig {
    fn default() -> Self {
        ServerReloadConfig {
            process_name: default_process_name(),
            signal: default_signal(),
        }
    }
}

fn default_fatal_reload_errors() -> bool {
    true
}

fn default_process_name() -> String {
    "spire-server".to_string()
}

fn default_signal() -> String {
    "SIGUSR1".to_string()
}

impl Config {
    /// Load the configuration from the file system.
    pub fn load_config(filename: impl AsRef<Path>) -> Result<Config, io::Error> {
        let config = std::fs::read_to_string(filename)?;
        let config =
            toml::from_str(&config).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

        Ok(config)
    }
}
