// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::core::ErrorResponse;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RancherVmError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Invalid resource name: {0}")]
    InvalidName(String),

    #[error("Failed to parse kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Failed to serialize request body: {0}")]
    SerializeError(#[from] serde_json::Error),
}

impl RancherVmError {
    /// The structured status returned by the API server, if the request was rejected
    pub fn api_error(&self) -> Option<&ErrorResponse> {
        match self {
            RancherVmError::KubeError(kube::Error::Api(err)) => Some(err),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.api_error().is_some_and(|e| e.code == 404)
    }

    pub fn is_conflict(&self) -> bool {
        self.api_error().is_some_and(|e| e.code == 409)
    }

    /// The requested resource version is older than the server still keeps
    pub fn is_gone(&self) -> bool {
        self.api_error().is_some_and(|e| e.code == 410)
    }
}

pub type Result<T> = std::result::Result<T, RancherVmError>;
