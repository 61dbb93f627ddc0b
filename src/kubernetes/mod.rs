// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for CRD discovery and client creation.

pub mod client;
pub mod crd;

pub use client::client_from_kubeconfig;
pub use crd::{credential_crd_exists, wait_for_credential_crd};
