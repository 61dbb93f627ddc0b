// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use crate::types::Credential;
use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt};
use http::{header::CONTENT_TYPE, Method, Request, Response};
use http_body::Frame;
use http_body_util::{BodyExt, StreamBody};
use kube::client::Body;
use kube::{Client, Resource};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tower::Service;
use tower_test::mock::{self, Handle, SendResponse};

type BoxFuture<T> = std::pin::Pin<Box<dyn std::future::Future<Output = T> + Send>>;

/// A request as seen by the mocked API server
#[derive(Debug)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    async fn read(req: Request<Body>) -> Self {
        let (parts, body) = req.into_parts();
        let body: Bytes = body.collect().await.unwrap().to_bytes();
        let query = parts
            .uri
            .query()
            .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();

        Self {
            method: parts.method,
            path: parts.uri.path().to_string(),
            query,
            content_type: parts
                .headers
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body: body.to_vec(),
        }
    }

    pub fn json_body(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// Answers a single recorded request
pub struct Responder(SendResponse<Response<Body>>);

impl Responder {
    pub fn json(self, status: u16, body: &Value) {
        self.raw(status, body.to_string().into_bytes());
    }

    pub fn raw(self, status: u16, body: Vec<u8>) {
        self.0.send_response(
            Response::builder()
                .status(status)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        );
    }

    /// Fail the request below HTTP, as a broken connection would
    pub fn fail(self, message: &str) {
        self.0.send_error(message.to_string());
    }
}

/// Drives a tower-test mock so tests can inspect each request before answering it
pub struct ApiServerVerifier(Handle<Request<Body>, Response<Body>>);

impl ApiServerVerifier {
    pub fn new() -> (Client, Self) {
        let (service, handle) = mock::pair::<Request<Body>, Response<Body>>();
        (Client::new(service, "default"), Self(handle))
    }

    pub async fn next_request(&mut self) -> (RecordedRequest, Responder) {
        let (req, send) = self
            .0
            .next_request()
            .await
            .expect("client did not send a request");
        (RecordedRequest::read(req).await, Responder(send))
    }

    /// Wait for the client to be dropped and fail on any request sent meanwhile
    pub async fn assert_no_more_requests(&mut self) {
        if let Some((req, _)) = self.0.next_request().await {
            panic!("unexpected request: {} {}", req.method(), req.uri());
        }
    }
}

type StreamingBody = StreamBody<BoxStream<'static, Result<Frame<Bytes>, Infallible>>>;

/// Like [`ApiServerVerifier`], but answers with a body that stays open until
/// the test stops feeding it or the client hangs up.
pub struct WatchServerVerifier(Handle<Request<Body>, Response<StreamingBody>>);

impl WatchServerVerifier {
    pub fn new() -> (Client, Self) {
        let (service, handle) = mock::pair::<Request<Body>, Response<StreamingBody>>();
        (Client::new(service, "default"), Self(handle))
    }

    /// Accept the next request with a 200 and hand back the open body
    pub async fn accept(&mut self) -> (RecordedRequest, EventFeed) {
        let (req, send) = self
            .0
            .next_request()
            .await
            .expect("client did not send a request");
        let (tx, rx) = mpsc::channel::<Bytes>(16);
        let frames = stream::unfold(rx, |mut rx| async move {
            rx.recv()
                .await
                .map(|chunk| (Ok::<_, Infallible>(Frame::data(chunk)), rx))
        })
        .boxed();
        send.send_response(
            Response::builder()
                .status(200)
                .header(CONTENT_TYPE, "application/json")
                .body(StreamBody::new(frames))
                .unwrap(),
        );
        (RecordedRequest::read(req).await, EventFeed(tx))
    }
}

/// Write side of an open watch response
pub struct EventFeed(mpsc::Sender<Bytes>);

impl EventFeed {
    /// Send one `{"type": ..., "object": ...}` line
    pub async fn send(&self, event_type: &str, object: Value) {
        let line = format!("{}\n", json!({ "type": event_type, "object": object }));
        self.0
            .send(Bytes::from(line))
            .await
            .expect("client closed the watch body");
    }

    /// Resolves once the client has dropped the response body
    pub async fn closed(&self) {
        self.0.closed().await;
    }
}

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone, Default)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(("GET".to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        self.responses
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .cloned()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = BoxFuture<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let (status, body) = self
            .find_response(req.method().as_str(), req.uri().path())
            .unwrap_or_else(|| {
                (
                    404,
                    status_json(404, "NotFound", "the server could not find the requested resource")
                        .to_string(),
                )
            });

        Box::pin(async move { json_response(status, body.into_bytes()) })
    }
}

/// In-memory stand-in for the credentials endpoints of an API server
#[derive(Clone, Default)]
pub struct FakeApiServer {
    state: Arc<Mutex<FakeState>>,
}

#[derive(Default)]
struct FakeState {
    objects: BTreeMap<String, Value>,
    resource_version: u64,
    requests: usize,
}

impl FakeApiServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests
    }

    fn handle(&self, method: &Method, path: &str, body: &[u8]) -> (u16, Value) {
        let collection = Credential::url_path(&(), None);
        let mut state = self.state.lock().unwrap();
        state.requests += 1;

        let Some(name) = path
            .strip_prefix(collection.as_str())
            .map(|rest| rest.trim_start_matches('/'))
        else {
            return (404, status_json(404, "NotFound", "the server could not find the requested resource"));
        };

        match name {
            "" if *method == Method::GET => {
                let items: Vec<Value> = state.objects.values().cloned().collect();
                let list = json!({
                    "apiVersion": "vm.rancher.io/v1alpha1",
                    "kind": "CredentialList",
                    "metadata": { "resourceVersion": state.resource_version.to_string() },
                    "items": items
                });
                (200, list)
            }
            "" if *method == Method::POST => {
                let mut object: Value = match serde_json::from_slice(body) {
                    Ok(v) => v,
                    Err(e) => return (400, status_json(400, "BadRequest", &e.to_string())),
                };
                let Some(name) = object["metadata"]["name"].as_str().map(str::to_string) else {
                    return (422, status_json(422, "Invalid", "metadata.name: Required value"));
                };
                if state.objects.contains_key(&name) {
                    return (409, status_json(409, "AlreadyExists", &format!("credentials \"{}\" already exists", name)));
                }
                state.resource_version += 1;
                object["metadata"]["resourceVersion"] = json!(state.resource_version.to_string());
                object["metadata"]["uid"] = json!(format!("uid-{}", name));
                state.objects.insert(name, object.clone());
                (201, object)
            }
            name if *method == Method::GET => match state.objects.get(name) {
                Some(object) => (200, object.clone()),
                None => (404, not_found(name)),
            },
            name if *method == Method::PUT => {
                if !state.objects.contains_key(name) {
                    return (404, not_found(name));
                }
                let mut object: Value = match serde_json::from_slice(body) {
                    Ok(v) => v,
                    Err(e) => return (400, status_json(400, "BadRequest", &e.to_string())),
                };
                state.resource_version += 1;
                object["metadata"]["resourceVersion"] = json!(state.resource_version.to_string());
                state.objects.insert(name.to_string(), object.clone());
                (200, object)
            }
            name if *method == Method::DELETE => match state.objects.remove(name) {
                Some(_) => (200, status_json(200, "", "")),
                None => (404, not_found(name)),
            },
            _ => (405, status_json(405, "MethodNotAllowed", "method not allowed")),
        }
    }
}

impl Service<Request<Body>> for FakeApiServer {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = BoxFuture<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let server = self.clone();
        Box::pin(async move {
            let (parts, body) = req.into_parts();
            let body = body.collect().await?.to_bytes();
            let (status, value) = server.handle(&parts.method, parts.uri.path(), &body);
            json_response(status, value.to_string().into_bytes())
        })
    }
}

fn json_response(status: u16, body: Vec<u8>) -> Result<Response<Body>, tower::BoxError> {
    Ok(Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))?)
}

fn not_found(name: &str) -> Value {
    status_json(404, "NotFound", &format!("credentials.vm.rancher.io \"{}\" not found", name))
}

/// Create a mock credential JSON object
pub fn credential_json(name: &str, resource_version: &str) -> Value {
    json!({
        "apiVersion": "vm.rancher.io/v1alpha1",
        "kind": "Credential",
        "metadata": {
            "name": name,
            "resourceVersion": resource_version,
            "uid": format!("uid-{}", name)
        },
        "spec": {
            "public_key": format!("ssh-ed25519 AAAAC3Nza {}@example", name)
        }
    })
}

/// Create a `Status` response body
pub fn status_json(code: u16, reason: &str, message: &str) -> Value {
    json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": if code < 400 { "Success" } else { "Failure" },
        "message": message,
        "reason": reason,
        "code": code
    })
}
