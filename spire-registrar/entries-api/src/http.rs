// Copyright (c) Microsoft. All rights reserved.

use std::sync::Arc;

use core_objects::Entry;
use hyper::{Body, Method, Request, Response, StatusCode};
use log::warn;
use registrar_api::{add_entry, delete_entry, uri, ErrorBody};
use registration_manager::RegistrationManager;
use serde::Serialize;

#[derive(Clone)]
pub struct Service {
    manager: Arc<RegistrationManager>,
}

impl Service {
    #[must_use]
    pub fn new(manager: Arc<RegistrationManager>) -> Self {
        Service { manager }
    }

    pub async fn handle(&self, request: Request<Body>) -> Response<Body> {
        match (request.method(), request.uri().path()) {
            (&Method::GET, uri::LIST_ENTRIES) => self.list_entries().await,
            (&Method::POST, uri::ADD_ENTRY) => self.add_entry(request).await,
            (&Method::POST, uri::DELETE_ENTRY) => self.delete_entry(request).await,
            (_, uri::LIST_ENTRIES | uri::ADD_ENTRY | uri::DELETE_ENTRY) => error_response(
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
            ),
            _ => error_response(StatusCode::NOT_FOUND, "Not found".to_string()),
        }
    }

    async fn list_entries(&self) -> Response<Body> {
        match self.manager.list_records().await {
            Ok(records) => json_response(StatusCode::OK, &records),
            Err(err) => internal_error(&err),
        }
    }

    async fn add_entry(&self, request: Request<Body>) -> Response<Body> {
        let entry = match bind_entry(request).await {
            Ok(entry) => entry,
            Err(response) => return response,
        };

        match self.manager.register(&entry).await {
            Ok(entry_id) => json_response(
                StatusCode::OK,
                &add_entry::Response {
                    message: "Entry created".to_string(),
                    entry_id,
                },
            ),
            Err(err) => internal_error(&err),
        }
    }

    async fn delete_entry(&self, request: Request<Body>) -> Response<Body> {
        let entry = match bind_entry(request).await {
            Ok(entry) => entry,
            Err(response) => return response,
        };

        match self.manager.deregister(&entry).await {
            Ok(()) => json_response(
                StatusCode::OK,
                &delete_entry::Response {
                    message: "Entry deleted".to_string(),
                },
            ),
            Err(err) => internal_error(&err),
        }
    }
}

async fn bind_entry(request: Request<Body>) -> Result<Entry, Response<Body>> {
    let body = hyper::body::to_bytes(request.into_body())
        .await
        .map_err(|err| {
            error_response(
                StatusCode::BAD_REQUEST,
                format!("Unable to read request body: {}", err),
            )
        })?;

    let entry: Entry = serde_json::from_slice(&body)
        .map_err(|err| error_response(StatusCode::BAD_REQUEST, format!("Invalid entry: {}", err)))?;

    if let Some(field) = entry.missing_field() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            format!("Missing or empty required field {}", field),
        ));
    }

    Ok(entry)
}

fn internal_error(err: &registration_manager::Error) -> Response<Body> {
    warn!("Request failed: {}", err);

    error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

fn error_response(status: StatusCode, error: String) -> Response<Body> {
    json_response(status, &ErrorBody { error })
}

fn json_response(status: StatusCode, body: &impl Serialize) -> Response<Body> {
    let body = match serde_json::to_vec(body) {
        Ok(body) => Body::from(body),
        Err(_) => Body::empty(),
    };

    let mut response = Response::new(body);
    *response.status_mut() = status;
    response.headers_mut().insert(
        hyper::header::CONTENT_TYPE,
        hyper::header::HeaderValue::from_static("application/json"),
    );

    response
}
