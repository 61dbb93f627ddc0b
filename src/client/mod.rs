// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed clients for the vm.rancher.io/v1alpha1 API group.

pub mod credential;
pub mod rest;

pub use credential::{CredentialInterface, Credentials};
pub use rest::{EventStream, PatchType, RestClient};

use crate::constants::{GROUP, VERSION};
use crate::error::Result;
use crate::kubernetes::client_from_kubeconfig;
use kube::Client;

/// Entry point for the resources of the vm.rancher.io/v1alpha1 group
#[derive(Clone)]
pub struct VmV1alpha1Client {
    rest: RestClient,
}

impl VmV1alpha1Client {
    pub fn new(client: Client) -> Self {
        Self {
            rest: RestClient::new(client, GROUP, VERSION),
        }
    }

    /// Connect using the inferred configuration (in-cluster or `KUBECONFIG`)
    pub async fn try_default() -> Result<Self> {
        Ok(Self::new(Client::try_default().await?))
    }

    /// Connect using the current context of a kubeconfig document
    pub async fn from_kubeconfig(kubeconfig: &str) -> Result<Self> {
        Ok(Self::new(client_from_kubeconfig(kubeconfig).await?))
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.rest.clone())
    }

    pub fn rest_client(&self) -> &RestClient {
        &self.rest
    }
}
