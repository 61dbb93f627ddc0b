// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::core::ObjectList;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// An SSH public key that RancherVM injects into virtual machines.
///
/// Credentials are cluster-scoped. `public_key` keeps the snake_case wire
/// name used by the RancherVM API.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(
    group = "vm.rancher.io",
    version = "v1alpha1",
    kind = "Credential",
    plural = "credentials"
)]
pub struct CredentialSpec {
    pub public_key: String,
}

/// A page of credentials as returned by a List call, in server order
pub type CredentialList = ObjectList<Credential>;
