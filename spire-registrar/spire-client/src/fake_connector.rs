// Copyright (c) Microsoft. All rights reserved.

use std::sync::Mutex;

use core_objects::{RegistrationRecord, SPIFFEID};

use crate::{Error, SpireConnector};

/// In-memory stand-in for the SPIRE server, for tests.
#[derive(Default)]
pub struct SpireFakeConnector {
    pub current_records: Mutex<Vec<RegistrationRecord>>,
    pub created_records: Mutex<Vec<RegistrationRecord>>,
    pub deleted_ids: Mutex<Vec<String>>,
    /// When set, every call fails as if the server were unreachable.
    pub fail_requests: Mutex<bool>,
    next_id: Mutex<u64>,
}

impl SpireFakeConnector {
    fn check_reachable(&self, error: fn(tonic::Status) -> Error) -> Result<(), Error> {
        if *self.fail_requests.lock().unwrap() {
            return Err(error(tonic::Status::unavailable("connector down")));
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl SpireConnector for SpireFakeConnector {
    async fn get_entries(&self) -> Result<Vec<RegistrationRecord>, Error> {
        self.check_reachable(Error::ListEntries)?;

        let current_records = self.current_records.lock().unwrap();
        Ok(current_records.clone())
    }

    async fn get_entries_by_spiffe_id(
        &self,
        spiffe_id: &SPIFFEID,
    ) -> Result<Vec<RegistrationRecord>, Error> {
        self.check_reachable(Error::ListEntries)?;

        let current_records = self.current_records.lock().unwrap();
        Ok(current_records
            .iter()
            .filter(|record| &record.spiffe_id == spiffe_id)
            .cloned()
            .collect())
    }

    async fn create_entry(&self, record: RegistrationRecord) -> Result<String, Error> {
        self.check_reachable(Error::CreateEntry)?;

        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let id = format!("fake-{}", next_id);

        let record = RegistrationRecord {
            id: id.clone(),
            ..record
        };

        self.current_records.lock().unwrap().push(record.clone());
        self.created_records.lock().unwrap().push(record);

        Ok(id)
    }

    async fn delete_entries(&self, ids: Vec<String>) -> Result<(), Error> {
        self.check_reachable(Error::DeleteEntries)?;

        let mut current_records = self.current_records.lock().unwrap();
        let mut deleted_ids = self.deleted_ids.lock().unwrap();

        for id in ids {
            current_records.retain(|record| record.id != id);
            deleted_ids.push(id);
        }

        Ok(())
    }
}
