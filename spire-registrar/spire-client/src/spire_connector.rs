// Copyright (c) Microsoft. All rights reserved.

use core_objects::{RegistrationRecord, SPIFFEID};

use crate::Error;

/// Access to the registration entries held by the SPIRE server.
#[async_trait::async_trait]
pub trait SpireConnector: Sync + Send {
    /// All registration records the server knows about.
    async fn get_entries(&self) -> Result<Vec<RegistrationRecord>, Error>;

    /// Registration records whose SPIFFE ID matches exactly. An empty
    /// result is not an error.
    async fn get_entries_by_spiffe_id(
        &self,
        spiffe_id: &SPIFFEID,
    ) -> Result<Vec<RegistrationRecord>, Error>;

    /// Create one registration record and return the id the server
    /// assigned to it.
    async fn create_entry(&self, record: RegistrationRecord) -> Result<String, Error>;

    /// Delete the records with the given ids. Ids that are already gone
    /// server-side do not fail the call.
    async fn delete_entries(&self, ids: Vec<String>) -> Result<(), Error>;
}
