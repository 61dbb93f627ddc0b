// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client creation from kubeconfig documents

use crate::error::{RancherVmError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Client;
use tracing::{debug, instrument};

/// Create a Kubernetes client from a kubeconfig string, using its current context
#[instrument(skip(kubeconfig))]
pub async fn client_from_kubeconfig(kubeconfig: &str) -> Result<Client> {
    let kubeconfig_parsed: Kubeconfig = serde_yaml::from_str(kubeconfig)
        .map_err(|e| RancherVmError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e)))?;

    debug!(
        "Using kubeconfig context {:?}",
        kubeconfig_parsed.current_context
    );

    let client_config =
        kube::Config::from_custom_kubeconfig(kubeconfig_parsed, &KubeConfigOptions::default())
            .await
            .map_err(|e| {
                RancherVmError::KubeconfigError(format!("Failed to create config: {}", e))
            })?;

    Client::try_from(client_config)
        .map_err(|e| RancherVmError::KubeconfigError(format!("Failed to create client: {}", e)))
}
