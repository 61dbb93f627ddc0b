// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource types of the vm.rancher.io API group.

pub mod credential;

pub use credential::{Credential, CredentialList, CredentialSpec};
