//! Scripted transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use super::api::ApiClient;
use super::error::TransportError;
use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::config::ApiConfig;
use crate::util::token_store::MemoryTokenStore;

pub const BASE_URL: &str = "http://api.test";

type Hook = Arc<dyn Fn(&HttpRequest) + Send + Sync>;

#[derive(Default)]
struct Script {
    responses: VecDeque<Result<HttpResponse, TransportError>>,
    requests: Vec<HttpRequest>,
}

/// Replays queued responses in order and records every request it sees.
#[derive(Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<Script>>,
    hook: Option<Hook>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `hook` on each request at send time, before the response resolves.
    pub fn with_hook(mut self, hook: impl Fn(&HttpRequest) + Send + Sync + 'static) -> Self {
        self.hook = Some(Arc::new(hook));
        self
    }

    pub fn respond(&self, status: u16, body: &Value) -> &Self {
        self.push(Ok(HttpResponse { status, body: body.to_string() }))
    }

    pub fn respond_ok(&self, data: Value) -> &Self {
        self.respond(200, &json!({ "success": true, "message": "ok", "data": data }))
    }

    pub fn respond_err(&self, status: u16, message: &str) -> &Self {
        self.respond(status, &json!({ "success": false, "message": message, "data": null }))
    }

    pub fn respond_raw(&self, status: u16, body: &str) -> &Self {
        self.push(Ok(HttpResponse { status, body: body.to_owned() }))
    }

    pub fn fail(&self, reason: &str) -> &Self {
        self.push(Err(TransportError(reason.to_owned())))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.script.lock().unwrap().requests.clone()
    }

    pub fn call_count(&self) -> usize {
        self.script.lock().unwrap().requests.len()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("at least one request")
    }

    fn push(&self, response: Result<HttpResponse, TransportError>) -> &Self {
        self.script.lock().unwrap().responses.push_back(response);
        self
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        if let Some(hook) = &self.hook {
            hook(&request);
        }
        let mut script = self.script.lock().unwrap();
        script.requests.push(request);
        script
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted response".to_owned())))
    }
}

/// Client against [`BASE_URL`] sharing `transport` and `tokens` with the caller.
pub fn test_client(transport: &MockTransport, tokens: &MemoryTokenStore) -> ApiClient<MockTransport, MemoryTokenStore> {
    let config = ApiConfig::new(BASE_URL).unwrap();
    ApiClient::new(config, transport.clone(), tokens.clone())
}
