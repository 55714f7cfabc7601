use super::switch::{HostContext, ReturnPayload, SwitchOptions, SwitchPendingRequest, SwitchRequest, SwitchResult};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// The platform side of a browser switch.
#[async_trait]
pub trait SwitchGateway: Send + Sync {
    /// Fails with a descriptive error if the host cannot receive the return.
    async fn assert_can_perform_switch(&self, ctx: &HostContext, options: &SwitchOptions) -> Result<()>;

    /// Opens the browser. Ordinary failures come back as `SwitchPendingRequest::Failure`.
    async fn start(&self, ctx: &HostContext, options: &SwitchOptions) -> SwitchPendingRequest;

    /// Matches an inbound payload against a started switch. `None` means no match yet.
    async fn parse_result(&self, request: &SwitchRequest, payload: &ReturnPayload) -> Result<Option<SwitchResult>>;
}

/// Keeps started tokens while the browser is in the foreground.
#[async_trait]
pub trait PendingRequestStore: Send + Sync {
    async fn save(&self, session: &str, request: &SwitchRequest) -> Result<()>;
    /// Removes and returns the token, so each one is consumed at most once.
    async fn take(&self, session: &str) -> Result<Option<SwitchRequest>>;
    async fn peek(&self, session: &str) -> Result<Option<SwitchRequest>>;
}

pub type SwitchGatewayRef = Arc<dyn SwitchGateway>;
pub type PendingRequestStoreBox = Box<dyn PendingRequestStore>;
