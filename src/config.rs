// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::watch::{DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS};
use anyhow::{bail, Context, Result};
use kube::api::ListParams;
use std::env;

/// Configuration of the credentials watcher, loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub label_selector: Option<String>,
    pub field_selector: Option<String>,
    /// Server-side timeout of each watch request
    pub watch_timeout_secs: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let watch_timeout_secs = match non_empty("CREDENTIAL_WATCH_TIMEOUT_SECS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("CREDENTIAL_WATCH_TIMEOUT_SECS is not a number: {}", v))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if watch_timeout_secs >= MAX_TIMEOUT_SECS {
            bail!(
                "CREDENTIAL_WATCH_TIMEOUT_SECS must be below {}, got {}",
                MAX_TIMEOUT_SECS,
                watch_timeout_secs
            );
        }

        Ok(Config {
            label_selector: non_empty("CREDENTIAL_LABEL_SELECTOR"),
            field_selector: non_empty("CREDENTIAL_FIELD_SELECTOR"),
            watch_timeout_secs,
        })
    }

    /// List/watch parameters for the configured selectors
    pub fn list_params(&self) -> ListParams {
        let mut lp = ListParams::default().timeout(self.watch_timeout_secs);
        if let Some(labels) = &self.label_selector {
            lp = lp.labels(labels);
        }
        if let Some(fields) = &self.field_selector {
            lp = lp.fields(fields);
        }
        lp
    }
}
