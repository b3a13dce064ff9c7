//! In-process fakes of the external services, shared by the module tests.

use crate::backend::{BackendReply, DiagnosticSink, SearchBackend, SearchCall};
use crate::content::{ContentApi, MetadataError, ModuleRecord, NamespaceRecord};

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

type Handler = Box<dyn Fn(&SearchCall) -> Result<BackendReply> + Send + Sync>;

pub fn ok_reply(body: Value) -> BackendReply {
    BackendReply {
        status: 200,
        body: body.to_string(),
    }
}

/// Search backend answering from a closure and recording every call.
pub struct FakeBackend {
    handler: Handler,
    /// `None` makes pings fail at the transport level.
    ping_status: Option<u16>,
    calls: Mutex<Vec<SearchCall>>,
}

impl FakeBackend {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&SearchCall) -> Result<BackendReply> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            ping_status: Some(200),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(reply: BackendReply) -> Self {
        Self::new(move |_| Ok(reply.clone()))
    }

    pub fn failing(message: &'static str) -> Self {
        let mut backend = Self::new(move |_| Err(anyhow::anyhow!(message)));
        backend.ping_status = None;
        backend
    }

    pub fn with_ping_status(mut self, status: Option<u16>) -> Self {
        self.ping_status = status;
        self
    }

    pub fn calls(&self) -> Vec<SearchCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchBackend for FakeBackend {
    async fn search(&self, call: &SearchCall) -> Result<BackendReply> {
        self.calls.lock().unwrap().push(call.clone());
        (self.handler)(call)
    }

    async fn ping(&self) -> Result<BackendReply> {
        match self.ping_status {
            Some(status) => Ok(BackendReply {
                status,
                body: String::new(),
            }),
            None => Err(anyhow::anyhow!("connection refused")),
        }
    }
}

/// Diagnostic sink keeping every emitted body.
#[derive(Default)]
pub struct CollectingSink {
    bodies: Mutex<Vec<String>>,
}

impl CollectingSink {
    pub fn bodies(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&self, body: &str) {
        self.bodies.lock().unwrap().push(body.to_string());
    }
}

/// Content API serving canned listings.
pub struct FakeContentApi {
    namespaces: Result<Vec<NamespaceRecord>, MetadataError>,
    modules: HashMap<u64, Result<Vec<ModuleRecord>, MetadataError>>,
    callers: Mutex<Vec<Option<String>>>,
}

impl FakeContentApi {
    pub fn new(namespaces: Vec<NamespaceRecord>) -> Self {
        Self {
            namespaces: Ok(namespaces),
            modules: HashMap::new(),
            callers: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn failing(error: MetadataError) -> Self {
        Self {
            namespaces: Err(error),
            modules: HashMap::new(),
            callers: Mutex::new(Vec::new()),
        }
    }

    pub fn with_modules(mut self, namespace_id: u64, modules: Vec<ModuleRecord>) -> Self {
        self.modules.insert(namespace_id, Ok(modules));
        self
    }

    pub fn with_module_error(mut self, namespace_id: u64, error: MetadataError) -> Self {
        self.modules.insert(namespace_id, Err(error));
        self
    }

    /// Caller tokens seen by the namespace listing, in call order.
    pub fn callers(&self) -> Vec<Option<String>> {
        self.callers.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentApi for FakeContentApi {
    async fn namespaces(
        &self,
        caller: Option<&str>,
    ) -> Result<Vec<NamespaceRecord>, MetadataError> {
        self.callers
            .lock()
            .unwrap()
            .push(caller.map(str::to_string));
        self.namespaces.clone()
    }

    async fn modules(
        &self,
        namespace_id: u64,
        _caller: Option<&str>,
    ) -> Result<Vec<ModuleRecord>, MetadataError> {
        self.modules
            .get(&namespace_id)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub fn namespace(id: u64, name: &str, slug: &str) -> NamespaceRecord {
    NamespaceRecord {
        namespace_id: id,
        slug: slug.to_string(),
        name: name.to_string(),
    }
}

pub fn module(id: u64, namespace_id: u64, name: &str, handle: &str, meta: Value) -> ModuleRecord {
    ModuleRecord {
        module_id: id,
        namespace_id,
        handle: handle.to_string(),
        name: name.to_string(),
        meta,
    }
}
