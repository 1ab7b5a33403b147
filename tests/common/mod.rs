//! Test doubles and helpers for driving the update API in-process.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::header::{AUTHORIZATION, USER_AGENT};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose;
use base64::Engine;
use route53_dyndns::error::Error;
use route53_dyndns::{Config, DynRecordProvider, Record, RecordProvider, SharedConfig};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret";
pub const HOSTNAME: &str = "home.example.com";
pub const CURRENT_VALUE: &str = "10.1.10.1";
pub const USER_AGENT_VALUE: &str = "ddclient/3.10.0";
pub const PEER_ADDR: &str = "203.0.113.7:49152";

pub fn config(bad_user_agents: &[&str]) -> SharedConfig {
    let json = serde_json::json!({
        "USERNAME": USERNAME,
        "PASSWORD": PASSWORD,
        "BAD_USER_AGENTS": bad_user_agents,
        "PROVIDER": "memory",
    });
    Arc::new(Config::try_from_json(&json.to_string()).expect("valid test config"))
}

pub fn app(provider: DynRecordProvider) -> Router {
    route53_dyndns::api::router(config(&["foobar"]), provider)
}

pub fn basic_auth(username: &str, password: &str) -> String {
    let encoded = general_purpose::STANDARD.encode(format!("{username}:{password}"));
    format!("Basic {encoded}")
}

/// A response as a router client sees it.
pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

pub async fn send(
    app: Router,
    uri: &str,
    credentials: Option<(&str, &str)>,
    user_agent: Option<&str>,
) -> Reply {
    let mut builder = Request::builder().uri(uri);
    if let Some((username, password)) = credentials {
        builder = builder.header(AUTHORIZATION, basic_auth(username, password));
    }
    if let Some(user_agent) = user_agent {
        builder = builder.header(USER_AGENT, user_agent);
    }
    let mut request = builder.body(Body::empty()).expect("valid request");
    let peer: SocketAddr = PEER_ADDR.parse().expect("valid peer address");
    request.extensions_mut().insert(ConnectInfo(peer));

    let response = app.oneshot(request).await.expect("infallible router");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = hyper::body::to_bytes(response.into_body())
        .await
        .expect("readable body");
    Reply {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
    }
}

/// An authenticated request from a well-behaved router client.
pub async fn update(app: Router, uri: &str) -> Reply {
    send(app, uri, Some((USERNAME, PASSWORD)), Some(USER_AGENT_VALUE)).await
}

pub fn record(name: &str, value: &str) -> Record {
    Record {
        name: format!("{name}."),
        record_type: "A".to_string(),
        set_identifier: Some("home".to_string()),
        ttl: Some(60),
        weight: Some(10),
        value: value.to_string(),
    }
}

/// What a [`ScriptedProvider`] does when asked to look up or update a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeed,
    Decline,
    Fail,
    Panic,
}

/// A provider holding one record whose lookup and update behaviour is fixed up front.
pub struct ScriptedProvider {
    record: Option<Record>,
    lookup: Outcome,
    update: Outcome,
    lookup_calls: AtomicUsize,
    update_calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(record: Option<Record>, lookup: Outcome, update: Outcome) -> Arc<Self> {
        Arc::new(Self {
            record,
            lookup,
            update,
            lookup_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
        })
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl RecordProvider for ScriptedProvider {
    async fn find_record(&self, hostname: &str) -> Result<Option<Record>, Error> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        if hostname.is_empty() {
            return Err(Error::InvalidHostname);
        }
        match self.lookup {
            Outcome::Succeed => Ok(self.record.clone()),
            Outcome::Decline => Err(Error::RecordCount {
                hostname: hostname.to_string(),
                count: 2,
            }),
            Outcome::Fail => Err(Error::Provider("connection reset".to_string())),
            Outcome::Panic => panic!("lookup blew up"),
        }
    }

    async fn update_record(&self, _record: &Record, _value: &str) -> Result<bool, Error> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        match self.update {
            Outcome::Succeed => Ok(true),
            Outcome::Decline => Ok(false),
            Outcome::Fail => Err(Error::Provider("throttled".to_string())),
            Outcome::Panic => panic!("update blew up"),
        }
    }
}
