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

// Committed output of tonic-build for the subset of the SPIRE server entry v1
// API this workspace consumes (ListEntries, BatchCreateEntry,
// BatchDeleteEntry), clients only.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SpiffeId {
    /// Trust domain portion the SPIFFE ID belongs to (e.g. "example.org")
    #[prost(string, tag = "1")]
    pub trust_domain: ::prost::alloc::string::String,
    /// The path component of the SPIFFE ID (e.g. "/foo/bar/baz"). The path
    /// SHOULD have a leading slash. Consumers MUST normalize the path before
    /// making any sort of comparison between IDs.
    #[prost(string, tag = "2")]
    pub path: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Selector {
    /// The type of the selector. This is typically the name of the plugin that
    /// produces the selector.
    #[prost(string, tag = "1")]
    pub r#type: ::prost::alloc::string::String,
    /// The value of the selector.
    #[prost(string, tag = "2")]
    pub value: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Entry {
    /// Globally unique ID for the entry.
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    /// The SPIFFE ID of the identity described by this entry.
    #[prost(message, optional, tag = "2")]
    pub spiffe_id: ::core::option::Option<SpiffeId>,
    /// Who the entry is delegated to. If the entry describes a node, this is
    /// set to the SPIFFE ID of the SPIRE server of the trust domain (e.g.
    /// spiffe://example.org/spire/server). Otherwise, it may be set to a SPIFFE
    /// ID of a workload (e.g. spiffe://example.org/ns/spire/sa/spire-agent).
    #[prost(message, optional, tag = "3")]
    pub parent_id: ::core::option::Option<SpiffeId>,
    /// The selectors which identify which entities match this entry. If an
    /// entity matches multiple entries, all the matching entries will be
    /// issued identities.
    #[prost(message, repeated, tag = "4")]
    pub selectors: ::prost::alloc::vec::Vec<Selector>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Status {
    /// The status code, which should be an enum value of google.rpc.Code.
    #[prost(int32, tag = "1")]
    pub code: i32,
    /// A developer-facing error message.
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListEntriesRequest {
    /// Filters the entries returned in the response.
    #[prost(message, optional, tag = "1")]
    pub filter: ::core::option::Option<list_entries_request::Filter>,
    /// The maximum number of results to return. The server may further
    /// constrain this value, or if zero, choose its own.
    #[prost(int32, tag = "3")]
    pub page_size: i32,
    /// The next_page_token value returned from a previous request, if any.
    #[prost(string, tag = "4")]
    pub page_token: ::prost::alloc::string::String,
}
/// Nested message and enum types in `ListEntriesRequest`.
pub mod list_entries_request {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Filter {
        #[prost(message, optional, tag = "1")]
        pub by_spiffe_id: ::core::option::Option<super::SpiffeId>,
        #[prost(message, optional, tag = "2")]
        pub by_parent_id: ::core::option::Option<super::SpiffeId>,
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListEntriesResponse {
    /// The list of entries.
    #[prost(message, repeated, tag = "1")]
    pub entries: ::prost::alloc::vec::Vec<Entry>,
    /// The page token for the next request. Empty if there are no more results.
    /// This field should be checked by clients even when a page_size was not
    /// requested, since the server may choose its own (see page_size).
    #[prost(string, tag = "2")]
    pub next_page_token: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BatchCreateEntryRequest {
    /// The entries to be created. The entry ID field is output only, and will
    /// be ignored here.
    #[prost(message, repeated, tag = "1")]
    pub entries: ::prost::alloc::vec::Vec<Entry>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BatchCreateEntryResponse {
    /// Result for each entry in the request (order is maintained).
    #[prost(message, repeated, tag = "1")]
    pub results: ::prost::alloc::vec::Vec<batch_create_entry_response::Result>,
}
/// Nested message and enum types in `BatchCreateEntryResponse`.
pub mod batch_create_entry_response {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Result {
        /// The status of creating the entry.
        #[prost(message, optional, tag = "1")]
        pub status: ::core::option::Option<super::Status>,
        /// The entry that was created (.e.g status code is OK).
        #[prost(message, optional, tag = "2")]
        pub entry: ::core::option::Option<super::Entry>,
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BatchDeleteEntryRequest {
    /// IDs of the entries to delete.
    #[prost(string, repeated, tag = "1")]
    pub ids: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BatchDeleteEntryResponse {
    /// Result for each entry ID in the request (order is maintained).
    #[prost(message, repeated, tag = "1")]
    pub results: ::prost::alloc::vec::Vec<batch_delete_entry_response::Result>,
}
/// Nested message and enum types in `BatchDeleteEntryResponse`.
pub mod batch_delete_entry_response {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Result {
        /// The status of deleting the entry.
        #[prost(message, optional, tag = "1")]
        pub status: ::core::option::Option<super::Status>,
        /// The ID of the entry that was deleted.
        #[prost(string, tag = "2")]
        pub id: ::prost::alloc::string::String,
    }
}
#[doc = r" Generated client implementations."]
pub mod entry_client {
    #![allow(unused_variables, dead_code, missing_docs, clippy::let_unit_value)]
    use tonic::codegen::*;
    #[doc = " Manages registration entries stored by the SPIRE Server."]
    #[derive(Debug, Clone)]
    pub struct EntryClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl EntryClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> EntryClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as Body>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor<F>(
            inner: T,
            interceptor: F,
        ) -> EntryClient<InterceptedService<T, F>>
        where
            F: tonic::service::Interceptor,
            T: tonic::codegen::Service<
                http::Request<tonic::body::BoxBody>,
                Response = http::Response<
                    <T as tonic::client::GrpcService<tonic::body::BoxBody>>::ResponseBody,
                >,
            >,
            <T as tonic::codegen::Service<http::Request<tonic::body::BoxBody>>>::Error:
                Into<StdError> + Send + Sync,
        {
            EntryClient::new(InterceptedService::new(inner, interceptor))
        }
        #[doc = " Lists entries."]
        #[doc = ""]
        #[doc = " The caller must present an active agent X509-SVID. See the Agent"]
        #[doc = " AttestAgent RPC."]
        pub async fn list_entries(
            &mut self,
            request: impl tonic::IntoRequest<super::ListEntriesRequest>,
        ) -> Result<tonic::Response<super::ListEntriesResponse>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path =
                http::uri::PathAndQuery::from_static("/spire.api.server.entry.v1.Entry/ListEntries");
            self.inner.unary(request.into_request(), path, codec).await
        }
        #[doc = " Batch creates one or more entries."]
        pub async fn batch_create_entry(
            &mut self,
            request: impl tonic::IntoRequest<super::BatchCreateEntryRequest>,
        ) -> Result<tonic::Response<super::BatchCreateEntryResponse>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/spire.api.server.entry.v1.Entry/BatchCreateEntry",
            );
            self.inner.unary(request.into_request(), path, codec).await
        }
        #[doc = " Batch deletes one or more entries."]
        pub async fn batch_delete_entry(
            &mut self,
            request: impl tonic::IntoRequest<super::BatchDeleteEntryRequest>,
        ) -> Result<tonic::Response<super::BatchDeleteEntryResponse>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static(
                "/spire.api.server.entry.v1.Entry/BatchDeleteEntry",
            );
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
}
