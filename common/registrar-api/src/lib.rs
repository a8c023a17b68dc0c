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

//! Request and response bodies of the registrar HTTP API.

pub mod uri {
    pub const LIST_ENTRIES: &str = "/v1/entries";
    pub const ADD_ENTRY: &str = "/v1/entries/add";
    pub const DELETE_ENTRY: &str = "/v1/entries/delete";
}

pub mod add_entry {
    use core_objects::Entry;

    pub type Request = Entry;

    #[derive(Debug, serde::Deserialize, serde::Serialize)]
    pub struct Response {
        pub message: String,
        pub entry_id: String,
    }
}

pub mod delete_entry {
    use core_objects::Entry;

    pub type Request = Entry;

    #[derive(Debug, serde::Deserialize, serde::Serialize)]
    pub struct Response {
        pub message: String,
    }
}

pub mod list_entries {
    use core_objects::RegistrationRecord;

    pub type Response = Vec<RegistrationRecord>;
}

/// Failure envelope for every endpoint.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_shape() {
        let body = serde_json::to_string(&ErrorBody {
            error: "boom".to_string(),
        })
        .unwrap();

        assert_eq!(body, r#"{"error":"boom"}"#);
    }

    #[test]
    fn add_entry_response_shape() {
        let body = serde_json::to_string(&add_entry::Response {
            message: "Entry created".to_string(),
            entry_id: "id-1".to_string(),
        })
        .unwrap();

        assert_eq!(body, r#"{"message":"Entry created","entry_id":"id-1"}"#);
    }
}
