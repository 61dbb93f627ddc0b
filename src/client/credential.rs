// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed accessor for `credentials.vm.rancher.io`.

use crate::client::rest::{EventStream, PatchType, RestClient};
use crate::constants::{credentials::PLURAL, watch::DEFAULT_RESOURCE_VERSION};
use crate::error::{RancherVmError, Result};
use crate::types::{Credential, CredentialList};
use async_trait::async_trait;
use kube::api::{DeleteParams, GetParams, ListParams, PostParams};
use kube::core::request::Request as RequestBuilder;
use kube::ResourceExt;
use tracing::instrument;

/// Operations on Credential resources
#[async_trait]
pub trait CredentialInterface: Send + Sync {
    /// Fetch a single credential by name
    async fn get(&self, name: &str, gp: &GetParams) -> Result<Credential>;

    /// List credentials matching the label and field selectors in `lp`
    async fn list(&self, lp: &ListParams) -> Result<CredentialList>;

    /// Watch credentials matching the selectors in `lp`.
    ///
    /// The query is built from `lp` as given, plus the watch flag. Starts from
    /// `lp.resource_version` when given, otherwise from `"0"`.
    async fn watch(&self, lp: &ListParams) -> Result<EventStream<'_, Credential>>;

    /// Create a credential and return the server's representation of it
    async fn create(&self, pp: &PostParams, credential: &Credential) -> Result<Credential>;

    /// Replace the credential with the same name
    async fn update(&self, pp: &PostParams, credential: &Credential) -> Result<Credential>;

    /// Delete the named credential
    async fn delete(&self, name: &str, dp: &DeleteParams) -> Result<()>;

    /// Delete every credential matched by the selectors in `lp`
    async fn delete_collection(&self, dp: &DeleteParams, lp: &ListParams) -> Result<()>;

    /// Apply a raw patch, optionally to a subresource of the named credential
    async fn patch(
        &self,
        name: &str,
        patch_type: PatchType,
        data: &[u8],
        subresources: &[&str],
    ) -> Result<Credential>;
}

/// [`CredentialInterface`] over a group/version [`RestClient`]
#[derive(Clone)]
pub struct Credentials {
    rest: RestClient,
}

impl Credentials {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    fn request(&self) -> RequestBuilder {
        self.rest.resource(PLURAL)
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(RancherVmError::InvalidName(
            "credential name must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl CredentialInterface for Credentials {
    #[instrument(skip(self, gp))]
    async fn get(&self, name: &str, gp: &GetParams) -> Result<Credential> {
        validate_name(name)?;
        let mut req = self
            .request()
            .get(name, gp)
            .map_err(kube::Error::BuildRequest)?;
        req.extensions_mut().insert("get");
        self.rest.call(req).await
    }

    #[instrument(skip(self, lp), fields(labels = ?lp.label_selector, fields = ?lp.field_selector))]
    async fn list(&self, lp: &ListParams) -> Result<CredentialList> {
        let mut req = self.request().list(lp).map_err(kube::Error::BuildRequest)?;
        req.extensions_mut().insert("list");
        self.rest.call(req).await
    }

    #[instrument(skip(self, lp), fields(labels = ?lp.label_selector, fields = ?lp.field_selector))]
    async fn watch(&self, lp: &ListParams) -> Result<EventStream<'_, Credential>> {
        let mut lp = lp.clone();
        if lp.resource_version.is_none() {
            lp = lp.at(DEFAULT_RESOURCE_VERSION);
        }
        let req = self.request().list(&lp).map_err(kube::Error::BuildRequest)?;
        let mut req = RestClient::watch_request(req)?;
        req.extensions_mut().insert("watch");
        self.rest.call_watch(req).await
    }

    #[instrument(skip(self, pp, credential), fields(name = %credential.name_any()))]
    async fn create(&self, pp: &PostParams, credential: &Credential) -> Result<Credential> {
        let body = serde_json::to_vec(credential)?;
        let mut req = self
            .request()
            .create(pp, body)
            .map_err(kube::Error::BuildRequest)?;
        req.extensions_mut().insert("create");
        self.rest.call(req).await
    }

    #[instrument(skip(self, pp, credential), fields(name = %credential.name_any()))]
    async fn update(&self, pp: &PostParams, credential: &Credential) -> Result<Credential> {
        let name = credential.metadata.name.as_deref().unwrap_or_default();
        validate_name(name)?;
        let body = serde_json::to_vec(credential)?;
        let mut req = self
            .request()
            .replace(name, pp, body)
            .map_err(kube::Error::BuildRequest)?;
        req.extensions_mut().insert("replace");
        self.rest.call(req).await
    }

    #[instrument(skip(self, dp))]
    async fn delete(&self, name: &str, dp: &DeleteParams) -> Result<()> {
        validate_name(name)?;
        let mut req = self
            .request()
            .delete(name, dp)
            .map_err(kube::Error::BuildRequest)?;
        req.extensions_mut().insert("delete");
        self.rest.call_status::<Credential>(req).await
    }

    #[instrument(skip(self, dp, lp), fields(labels = ?lp.label_selector, fields = ?lp.field_selector))]
    async fn delete_collection(&self, dp: &DeleteParams, lp: &ListParams) -> Result<()> {
        let mut req = self
            .request()
            .delete_collection(dp, lp)
            .map_err(kube::Error::BuildRequest)?;
        req.extensions_mut().insert("delete_collection");
        self.rest.call_status::<CredentialList>(req).await
    }

    #[instrument(skip(self, patch_type, data), fields(patch_type = %patch_type))]
    async fn patch(
        &self,
        name: &str,
        patch_type: PatchType,
        data: &[u8],
        subresources: &[&str],
    ) -> Result<Credential> {
        validate_name(name)?;
        let mut req = self
            .rest
            .patch_request(PLURAL, name, patch_type, data, subresources)?;
        req.extensions_mut().insert("patch");
        self.rest.call(req).await
    }
}
