// Copyright (c) Microsoft. All rights reserved.

use core_objects::{RegistrationRecord, Selector, SPIFFEID};
use log::{debug, info};
use registrar_config::SpireServerConfig;
use spire_entry_api::entry_client::EntryClient;
use spire_entry_api::{
    list_entries_request, BatchCreateEntryRequest, BatchDeleteEntryRequest, ListEntriesRequest,
};
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint, Identity};
use tonic::Code;

use crate::{Error, SpireConnector};

const PAGE_SIZE: i32 = 20;

/// Client of the SPIRE server entry API, authenticated with mutual TLS.
pub struct SpireGrpcClient {
    client: EntryClient<Channel>,
}

impl SpireGrpcClient {
    /// Connect to the configured SPIRE server. The client certificate,
    /// key and CA bundle are read from the PEM files named in the config.
    pub async fn new(config: &SpireServerConfig) -> Result<Self, Error> {
        let cert = tokio::fs::read(&config.tls.cert_path)
            .await
            .map_err(Error::ReadTlsCredentials)?;
        let key = tokio::fs::read(&config.tls.key_path)
            .await
            .map_err(Error::ReadTlsCredentials)?;
        let ca = tokio::fs::read(&config.tls.ca_path)
            .await
            .map_err(Error::ReadTlsCredentials)?;

        let domain_name = config
            .domain_name
            .clone()
            .unwrap_or_else(|| config.address.clone());

        let tls = ClientTlsConfig::new()
            .domain_name(domain_name)
            .ca_certificate(Certificate::from_pem(ca))
            .identity(Identity::from_pem(cert, key));

        let endpoint = Endpoint::from_shared(format!("https://{}:{}", config.address, config.port))
            .map_err(Error::Endpoint)?
            .tls_config(tls)
            .map_err(Error::TlsConfig)?;

        let channel = endpoint.connect().await.map_err(Error::Connect)?;

        info!(
            "Connected to SPIRE server at {}:{}",
            config.address, config.port
        );

        Ok(SpireGrpcClient {
            client: EntryClient::new(channel),
        })
    }

    async fn list(
        &self,
        filter: Option<list_entries_request::Filter>,
    ) -> Result<Vec<RegistrationRecord>, Error> {
        let mut client = self.client.clone();
        let mut records = Vec::new();
        let mut page_token = String::new();

        loop {
            let request = ListEntriesRequest {
                filter: filter.clone(),
                page_size: PAGE_SIZE,
                page_token: page_token.clone(),
            };

            let response = client
                .list_entries(request)
                .await
                .map_err(Error::ListEntries)?
                .into_inner();

            records.extend(response.entries.into_iter().map(record_from_proto));

            if response.next_page_token.is_empty() {
                break;
            }
            page_token = response.next_page_token;
        }

        debug!("Listed {} entries", records.len());

        Ok(records)
    }
}

#[async_trait::async_trait]
impl SpireConnector for SpireGrpcClient {
    async fn get_entries(&self) -> Result<Vec<RegistrationRecord>, Error> {
        self.list(None).await
    }

    async fn get_entries_by_spiffe_id(
        &self,
        spiffe_id: &SPIFFEID,
    ) -> Result<Vec<RegistrationRecord>, Error> {
        let filter = list_entries_request::Filter {
            by_spiffe_id: Some(spiffe_id_to_proto(spiffe_id)),
            by_parent_id: None,
        };

        self.list(Some(filter)).await
    }

    async fn create_entry(&self, record: RegistrationRecord) -> Result<String, Error> {
        let mut client = self.client.clone();

        let request = BatchCreateEntryRequest {
            entries: vec![record_to_proto(record)],
        };

        let response = client
            .batch_create_entry(request)
            .await
            .map_err(Error::CreateEntry)?
            .into_inner();

        let result = response
            .results
            .into_iter()
            .next()
            .ok_or(Error::CreateResponseMissingEntry)?;

        if let Some(status) = &result.status {
            match Code::from_i32(status.code) {
                // The server attaches the existing entry when it already
                // has an identical one, which makes retries idempotent.
                Code::Ok | Code::AlreadyExists => (),
                _ => return Err(Error::CreateEntryRejected(status.message.clone())),
            }
        }

        let entry = result.entry.ok_or(Error::CreateResponseMissingEntry)?;

        info!("Created registration entry {}", entry.id);

        Ok(entry.id)
    }

    async fn delete_entries(&self, ids: Vec<String>) -> Result<(), Error> {
        if ids.is_empty() {
            return Ok(());
        }

        let mut client = self.client.clone();

        let response = client
            .batch_delete_entry(BatchDeleteEntryRequest { ids })
            .await
            .map_err(Error::DeleteEntries)?
            .into_inner();

        for result in response.results {
            if let Some(status) = &result.status {
                match Code::from_i32(status.code) {
                    Code::Ok | Code::NotFound => (),
                    _ => {
                        return Err(Error::DeleteEntryRejected(
                            result.id.clone(),
                            status.message.clone(),
                        ))
                    }
                }
            }

            info!("Deleted registration entry {}", result.id);
        }

        Ok(())
    }
}

fn spiffe_id_to_proto(spiffe_id: &SPIFFEID) -> spire_entry_api::SpiffeId {
    spire_entry_api::SpiffeId {
        trust_domain: spiffe_id.trust_domain.clone(),
        path: spiffe_id.path.clone(),
    }
}

fn spiffe_id_from_proto(spiffe_id: Option<spire_entry_api::SpiffeId>) -> SPIFFEID {
    spiffe_id.map_or_else(
        || SPIFFEID {
            trust_domain: String::new(),
            path: String::new(),
        },
        |id| SPIFFEID {
            trust_domain: id.trust_domain,
            path: id.path,
        },
    )
}

fn record_to_proto(record: RegistrationRecord) -> spire_entry_api::Entry {
    spire_entry_api::Entry {
        id: record.id,
        spiffe_id: Some(spiffe_id_to_proto(&record.spiffe_id)),
        parent_id: Some(spiffe_id_to_proto(&record.parent_id)),
        selectors: record
            .selectors
            .into_iter()
            .map(|selector| spire_entry_api::Selector {
                r#type: selector.selector_type,
                value: selector.value,
            })
            .collect(),
    }
}

fn record_from_proto(entry: spire_entry_api::Entry) -> RegistrationRecord {
    RegistrationRecord {
        id: entry.id,
        spiffe_id: spiffe_id_from_proto(entry.spiffe_id),
        parent_id: spiffe_id_from_proto(entry.parent_id),
        selectors: entry
            .selectors
            .into_iter()
            .map(|selector| Selector {
                selector_type: selector.r#type,
                value: selector.value,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_round_trips_through_proto() {
        let record = RegistrationRecord {
            id: "b2ac91a0".to_string(),
            spiffe_id: SPIFFEID {
                trust_domain: "example.org".to_string(),
                path: "/ns/app/sa/web".to_string(),
            },
            parent_id: SPIFFEID {
                trust_domain: "example.org".to_string(),
                path: "/ns/spire/sa/spire-agent".to_string(),
            },
            selectors: vec![Selector {
                selector_type: "k8s".to_string(),
                value: "ns:app".to_string(),
            }],
        };

        let round_tripped = record_from_proto(record_to_proto(record.clone()));

        assert_eq!(round_tripped, record);
    }

    #[test]
    fn missing_proto_ids_become_empty() {
        let record = record_from_proto(spire_entry_api::Entry {
            id: "b2ac91a0".to_string(),
            spiffe_id: None,
            parent_id: None,
            selectors: Vec::new(),
        });

        assert_eq!(record.spiffe_id.trust_domain, "");
        assert_eq!(record.spiffe_id.path, "");
        assert_eq!(record.parent_id.path, "");
    }
}
