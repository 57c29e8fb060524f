use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hrdesk_core::{
    ApiRequest, ApiResponse, AuthClient, MemorySessionStore, Result, Session, TokenPair, Transport,
};

type Handler = dyn Fn(&ApiRequest) -> Result<ApiResponse> + Send + Sync;

/// Transport answering from a closure and recording every request it sees.
#[derive(Clone)]
pub struct FnTransport {
    handler: Arc<Handler>,
    sent: Arc<Mutex<Vec<ApiRequest>>>,
}

impl FnTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&ApiRequest) -> Result<ApiResponse> + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All requests sent so far.
    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().unwrap().clone()
    }

    /// Requests sent to `path`.
    pub fn sent_to(&self, path: &str) -> Vec<ApiRequest> {
        self.sent().into_iter().filter(|r| r.path == path).collect()
    }
}

#[async_trait]
impl Transport for FnTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.sent.lock().unwrap().push(request.clone());
        // Give other tasks a chance to interleave, as real I/O would.
        tokio::task::yield_now().await;
        (self.handler)(request)
    }
}

/// Counts login redirects.
#[derive(Clone, Default)]
pub struct RedirectCounter(Arc<AtomicUsize>);

impl RedirectCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    pub fn navigator(&self) -> impl Fn() + Send + Sync + 'static {
        let counter = Arc::clone(&self.0);
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }
}

pub fn session(access: &str, refresh: &str) -> Session {
    Session::new(TokenPair::new(access, refresh))
}

pub type TestClient = AuthClient<MemorySessionStore, FnTransport, Box<dyn Fn() + Send + Sync>>;

pub fn client(
    store: MemorySessionStore,
    transport: FnTransport,
    redirects: &RedirectCounter,
) -> TestClient {
    let navigator: Box<dyn Fn() + Send + Sync> = Box::new(redirects.navigator());
    AuthClient::new(store, transport, navigator)
}

pub fn json_body(request: &ApiRequest) -> serde_json::Value {
    match &request.body {
        Some(hrdesk_core::RequestBody::Json(value)) => value.clone(),
        other => panic!("expected JSON body, got {:?}", other),
    }
}
