// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use futures::TryStreamExt;
use kube::api::WatchEvent;
use kube::{Client, CustomResourceExt, ResourceExt};
use tracing::{debug, info, warn};

use ranchervm_client::config::Config;
use ranchervm_client::kubernetes::wait_for_credential_crd;
use ranchervm_client::{Credential, CredentialInterface, Credentials, VmV1alpha1Client};

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().nth(1).as_deref() == Some("crd") {
        print!("{}", serde_yaml::to_string(&Credential::crd())?);
        return Ok(());
    }

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: label_selector={:?} field_selector={:?}",
        config.label_selector, config.field_selector
    );

    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    info!("Waiting for Credential CRD to become available...");
    wait_for_credential_crd(&client).await?;

    let credentials = VmV1alpha1Client::new(client).credentials();
    watch_credentials(&credentials, &config).await
}

/// List the matching credentials, then follow changes from the list's resource version.
/// Restarts from a fresh list when the server reports the version as expired.
async fn watch_credentials(credentials: &Credentials, config: &Config) -> Result<()> {
    loop {
        let list = credentials.list(&config.list_params()).await?;
        info!("Found {} credentials", list.items.len());
        for cred in &list.items {
            info!("Credential {}", cred.name_any());
        }

        let mut resource_version = list.metadata.resource_version.unwrap_or_default();

        'watch: loop {
            let lp = config.list_params().at(&resource_version);
            let mut events = match credentials.watch(&lp).await {
                Ok(events) => events,
                Err(e) if e.is_gone() => {
                    warn!("Resource version {} expired, relisting", resource_version);
                    break 'watch;
                }
                Err(e) => return Err(e.into()),
            };

            loop {
                let event = match events.try_next().await {
                    Ok(Some(event)) => event,
                    Ok(None) => break,
                    // An expired version is reported as a Status line in the body
                    Err(e) if e.is_gone() => {
                        warn!("Resource version {} expired, relisting", resource_version);
                        break 'watch;
                    }
                    Err(e) => return Err(e.into()),
                };

                match event {
                    WatchEvent::Added(cred) | WatchEvent::Modified(cred) => {
                        info!("Credential {} applied", cred.name_any());
                        resource_version = cred.resource_version().unwrap_or(resource_version);
                    }
                    WatchEvent::Deleted(cred) => {
                        info!("Credential {} deleted", cred.name_any());
                        resource_version = cred.resource_version().unwrap_or(resource_version);
                    }
                    WatchEvent::Bookmark(bookmark) => {
                        resource_version = bookmark.metadata.resource_version;
                    }
                    WatchEvent::Error(err) if err.code == 410 => {
                        warn!("Watch expired: {}, relisting", err.message);
                        break 'watch;
                    }
                    WatchEvent::Error(err) => {
                        warn!("Watch error: {}", err);
                    }
                }
            }

            debug!("Watch closed by server, resuming at {}", resource_version);
        }
    }
}
