// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Group/version scoped REST helpers shared by the typed resource accessors.
//!
//! Typed accessors build an [`http::Request`] (usually through kube's request
//! builder), then hand it to one of the `call*` helpers here which send it over
//! the [`Client`] and decode the response.

use crate::error::{RancherVmError, Result};
use futures::{stream::BoxStream, StreamExt};
use http::{header::CONTENT_TYPE, Request};
use kube::core::{request::Request as RequestBuilder, WatchEvent};
use kube::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::debug;

/// Wire semantics of a patch body. The server interprets the body, the client
/// only picks the content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchType {
    /// RFC 6902 list of operations
    Json,
    /// RFC 7386 merge patch
    Merge,
    /// Kubernetes strategic merge patch
    StrategicMerge,
}

impl PatchType {
    pub fn content_type(&self) -> &'static str {
        match self {
            PatchType::Json => "application/json-patch+json",
            PatchType::Merge => "application/merge-patch+json",
            PatchType::StrategicMerge => "application/strategic-merge-patch+json",
        }
    }
}

impl fmt::Display for PatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.content_type())
    }
}

/// A stream of watch events. Dropping it closes the underlying connection.
pub type EventStream<'a, K> = BoxStream<'a, Result<WatchEvent<K>>>;

/// Handle on a [`Client`] bound to a single `/apis/{group}/{version}` prefix
#[derive(Clone)]
pub struct RestClient {
    client: Client,
    base_path: String,
}

impl RestClient {
    pub fn new(client: Client, group: &str, version: &str) -> Self {
        Self {
            client,
            base_path: format!("/apis/{}/{}", group, version),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Path of a resource collection under this group/version
    pub fn resource_path(&self, resource: &str) -> String {
        format!("{}/{}", self.base_path, resource)
    }

    /// kube request builder for a resource collection under this group/version
    pub fn resource(&self, resource: &str) -> RequestBuilder {
        RequestBuilder::new(self.resource_path(resource))
    }

    /// Build a PATCH request carrying `data` unmodified.
    ///
    /// Subresources are appended after the name as extra path segments, in order.
    pub fn patch_request(
        &self,
        resource: &str,
        name: &str,
        patch_type: PatchType,
        data: &[u8],
        subresources: &[&str],
    ) -> Result<Request<Vec<u8>>> {
        let mut path = format!("{}/{}", self.resource_path(resource), name);
        for subresource in subresources {
            if subresource.is_empty() {
                return Err(RancherVmError::InvalidName(format!(
                    "empty subresource segment when patching {}/{}",
                    resource, name
                )));
            }
            path.push('/');
            path.push_str(subresource);
        }

        Request::patch(path)
            .header(CONTENT_TYPE, patch_type.content_type())
            .body(data.to_vec())
            .map_err(|e| kube::Error::BuildRequest(kube::core::request::Error::BuildRequest(e)).into())
    }

    /// Turn a collection GET into a watch by adding `watch=true` to its query.
    ///
    /// Every other query parameter is left as the caller built it.
    pub fn watch_request(request: Request<Vec<u8>>) -> Result<Request<Vec<u8>>> {
        let (mut parts, body) = request.into_parts();
        let uri = match parts.uri.query().filter(|q| !q.is_empty()) {
            Some(query) => format!("{}?{}&watch=true", parts.uri.path(), query),
            None => format!("{}?watch=true", parts.uri.path()),
        };
        parts.uri = uri.parse().map_err(|e: http::uri::InvalidUri| {
            kube::Error::BuildRequest(kube::core::request::Error::BuildRequest(e.into()))
        })?;
        Ok(Request::from_parts(parts, body))
    }

    /// Send a request and decode the response body into `T`
    pub async fn call<T>(&self, request: Request<Vec<u8>>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        debug!("{} {}", request.method(), request.uri());
        Ok(self.client.request::<T>(request).await?)
    }

    /// Send a request whose response may be either `T` or a `Status`, discarding both.
    ///
    /// Deletes answer with the object while finalizers are pending, and with a
    /// `Status` once it is gone.
    pub async fn call_status<T>(&self, request: Request<Vec<u8>>) -> Result<()>
    where
        T: DeserializeOwned,
    {
        debug!("{} {}", request.method(), request.uri());
        self.client.request_status::<T>(request).await?;
        Ok(())
    }

    /// Open a watch and stream decoded events until the server closes it
    pub async fn call_watch<K>(&self, request: Request<Vec<u8>>) -> Result<EventStream<'_, K>>
    where
        K: Clone + DeserializeOwned + Send + 'static,
    {
        debug!("{} {} (watch)", request.method(), request.uri());
        let events = self.client.request_events::<K>(request).await?;
        Ok(events
            .map(|event| event.map_err(RancherVmError::from))
            .boxed())
    }
}
