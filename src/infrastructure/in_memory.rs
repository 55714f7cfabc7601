use crate::domain::ports::{PendingRequestStore, SwitchGateway};
use crate::domain::switch::{
    HostContext, ReturnPayload, SwitchOptions, SwitchPendingRequest, SwitchRequest, SwitchResult,
    SwitchStatus,
};
use crate::error::{Result, SwitchError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// A switch gateway that simulates the platform without opening anything.
///
/// Launched urls are recorded instead of being handed to a browser. In
/// single-use mode each started request matches a return payload once.
/// Requests are told apart by their contents only: two launches that produce
/// identical tokens share one slot, so the second return reads as absent.
/// Vary the url or metadata per launch to keep them apart.
#[derive(Default, Clone)]
pub struct InMemorySwitchGateway {
    launched: Arc<RwLock<Vec<String>>>,
    consumed: Option<Arc<RwLock<HashSet<String>>>>,
}

impl InMemorySwitchGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single_use() -> Self {
        Self {
            consumed: Some(Arc::default()),
            ..Self::default()
        }
    }

    /// Urls the gateway has "opened", oldest first.
    pub async fn launched_urls(&self) -> Vec<String> {
        self.launched.read().await.clone()
    }
}

fn validate<'a>(ctx: &HostContext, options: &'a SwitchOptions) -> Result<(i32, &'a str, &'a str)> {
    let request_code = options
        .request_code
        .ok_or_else(|| SwitchError::Switch("A request code is required".to_string()))?;
    let url = options
        .url
        .as_deref()
        .ok_or_else(|| SwitchError::Switch("A destination url is required".to_string()))?;
    let scheme = options
        .return_url_scheme
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SwitchError::Switch("A returnUrlScheme is required".to_string()))?;

    if !ctx.is_scheme_declared(scheme) {
        return Err(SwitchError::Switch(format!(
            "No activity in {} handles the return url scheme {}",
            ctx.package_name, scheme
        )));
    }
    Ok((request_code, url, scheme))
}

#[async_trait]
impl SwitchGateway for InMemorySwitchGateway {
    async fn assert_can_perform_switch(&self, ctx: &HostContext, options: &SwitchOptions) -> Result<()> {
        validate(ctx, options).map(|_| ())
    }

    async fn start(&self, ctx: &HostContext, options: &SwitchOptions) -> SwitchPendingRequest {
        let (request_code, url, scheme) = match validate(ctx, options) {
            Ok(checked) => checked,
            Err(e) => return SwitchPendingRequest::Failure(Arc::new(e)),
        };

        if !ctx.browser_available {
            return SwitchPendingRequest::Failure(Arc::new(SwitchError::Switch(format!(
                "No installed activities can open this URL: {}",
                url
            ))));
        }

        self.launched.write().await.push(url.to_string());
        debug!(url, "Opened browser");

        let metadata = options
            .metadata
            .clone()
            .unwrap_or_else(|| Value::Object(Default::default()));
        SwitchPendingRequest::Started(SwitchRequest::new(request_code, url, metadata, scheme, true))
    }

    async fn parse_result(&self, request: &SwitchRequest, payload: &ReturnPayload) -> Result<Option<SwitchResult>> {
        let Some(data) = payload.data.as_deref() else {
            return Ok(None);
        };
        let scheme = payload
            .scheme()
            .ok_or_else(|| SwitchError::MalformedReturn(data.to_string()))?;

        if !scheme.eq_ignore_ascii_case(&request.return_url_scheme) {
            return Ok(None);
        }

        if let Some(consumed) = &self.consumed {
            // Keyed on the serialized token; see the type docs.
            if !consumed.write().await.insert(request.to_json()?) {
                return Ok(None);
            }
        }

        let path = data.split(['?', '#']).next().unwrap_or(data);
        let status = if path.trim_end_matches('/').ends_with("cancel") {
            SwitchStatus::Canceled
        } else {
            SwitchStatus::Success
        };
        Ok(Some(SwitchResult::for_request(request, status, Some(data.to_string()))))
    }
}

/// A thread-safe in-memory store for started tokens.
#[derive(Default, Clone)]
pub struct InMemoryPendingStore {
    requests: Arc<RwLock<HashMap<String, SwitchRequest>>>,
}

impl InMemoryPendingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PendingRequestStore for InMemoryPendingStore {
    async fn save(&self, session: &str, request: &SwitchRequest) -> Result<()> {
        let mut requests = self.requests.write().await;
        requests.insert(session.to_string(), request.clone());
        Ok(())
    }

    async fn take(&self, session: &str) -> Result<Option<SwitchRequest>> {
        let mut requests = self.requests.write().await;
        Ok(requests.remove(session))
    }

    async fn peek(&self, session: &str) -> Result<Option<SwitchRequest>> {
        let requests = self.requests.read().await;
        Ok(requests.get(session).cloned())
    }
}
