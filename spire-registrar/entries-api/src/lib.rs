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

mod error;
mod http;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use hyper::service::{make_service_fn, service_fn};
use log::info;
use registrar_config::RegistrarApiConfig;
use registration_manager::RegistrationManager;

pub use crate::error::Error;
pub use crate::http::Service;

pub async fn start_entries_api(
    config: &RegistrarApiConfig,
    manager: Arc<RegistrationManager>,
) -> Result<(), Error> {
    let address: IpAddr = config
        .bind_address
        .parse()
        .map_err(|err| Error::BindAddress(config.bind_address.clone(), err))?;
    let socket_addr = SocketAddr::new(address, config.bind_port);

    let service = Service::new(manager);

    let make_service = make_service_fn(move |_| {
        let service = service.clone();

        async move {
            Ok::<_, std::convert::Infallible>(service_fn(move |request| {
                let service = service.clone();

                async move { Ok::<_, std::convert::Infallible>(service.handle(request).await) }
            }))
        }
    });

    let server = hyper::Server::try_bind(&socket_addr)
        .map_err(Error::Bind)?
        .serve(make_service);

    info!("Entries API listening on {}", socket_addr);

    server.await.map_err(Error::Serve)
}
