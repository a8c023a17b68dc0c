// Copyright (c) Microsoft. All rights reserved.

#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::default_trait_access,
    clippy::let_and_return,
    clippy::let_unit_value,
    clippy::missing_errors_doc,
    clippy::similar_names,
    clippy::too_many_lines
)]

use std::error::Error as StdError;
use std::sync::Arc;

use error::Error;
use registrar_config::Config;
use registration_manager::RegistrationManager;
use reload_notifier::SignalNotifier;
use spire_client::SpireGrpcClient;

const CONFIG_DEFAULT_PATH: &str = "/mnt/config/Config.toml";

mod error;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init()
        .expect("cannot fail to initialize global logger from the process entrypoint");

    log::info!("Starting SPIRE registrar");
    if let Err(err) = main_inner().await {
        log::error!("{}", err);

        let mut source = std::error::Error::source(&*err);
        while let Some(err) = source {
            log::error!("caused by: {}", err);
            source = std::error::Error::source(err);
        }

        std::process::exit(1);
    }
}

async fn main_inner() -> Result<(), Box<dyn StdError>> {
    let path = if let Ok(path) = std::env::var("CONFIG_PATH") {
        path
    } else {
        CONFIG_DEFAULT_PATH.to_string()
    };

    log::info!("Reading config from {}", path);
    let config = Config::load_config(path).map_err(Error::ErrorParsingConfig)?;

    let connector = Arc::new(SpireGrpcClient::new(&config.spire_server).await?);
    let notifier = Arc::new(SignalNotifier::new(&config.server_reload)?);
    let manager = Arc::new(RegistrationManager::new(&config, connector, notifier));

    entries_api::start_entries_api(&config.registrar_api, manager).await?;

    Ok(())
}
