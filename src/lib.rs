// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod kubernetes;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use client::{CredentialInterface, Credentials, PatchType, VmV1alpha1Client};
pub use error::{RancherVmError, Result};
pub use types::{Credential, CredentialList, CredentialSpec};
