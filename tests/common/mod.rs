#![allow(dead_code)]

use async_trait::async_trait;
use payswitch::domain::payment::AuthRequestParams;
use payswitch::domain::ports::SwitchGateway;
use payswitch::domain::switch::{
    HostContext, ReturnPayload, SwitchOptions, SwitchPendingRequest, SwitchRequest, SwitchResult,
};
use payswitch::error::{Result, SwitchError};
use serde_json::json;
use std::sync::Mutex;

/// A gateway whose answers are fixed up front.
pub struct ScriptedGateway {
    pub capability_error: Option<String>,
    pub start_outcome: SwitchPendingRequest,
    pub parse_outcome: Option<SwitchResult>,
    pub started_with: Mutex<Vec<SwitchOptions>>,
    pub parsed: Mutex<Vec<(SwitchRequest, ReturnPayload)>>,
}

impl ScriptedGateway {
    pub fn starting(outcome: SwitchPendingRequest) -> Self {
        Self {
            capability_error: None,
            start_outcome: outcome,
            parse_outcome: None,
            started_with: Mutex::new(Vec::new()),
            parsed: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting(message: &str) -> Self {
        Self {
            capability_error: Some(message.to_string()),
            ..Self::starting(SwitchPendingRequest::Started(switch_request()))
        }
    }

    pub fn parsing(outcome: Option<SwitchResult>) -> Self {
        Self {
            parse_outcome: outcome,
            ..Self::starting(SwitchPendingRequest::Started(switch_request()))
        }
    }
}

#[async_trait]
impl SwitchGateway for ScriptedGateway {
    async fn assert_can_perform_switch(&self, _ctx: &HostContext, _options: &SwitchOptions) -> Result<()> {
        match &self.capability_error {
            Some(message) => Err(SwitchError::Switch(message.clone())),
            None => Ok(()),
        }
    }

    async fn start(&self, _ctx: &HostContext, options: &SwitchOptions) -> SwitchPendingRequest {
        self.started_with.lock().unwrap().push(options.clone());
        self.start_outcome.clone()
    }

    async fn parse_result(&self, request: &SwitchRequest, payload: &ReturnPayload) -> Result<Option<SwitchResult>> {
        self.parsed.lock().unwrap().push((request.clone(), payload.clone()));
        Ok(self.parse_outcome.clone())
    }
}

pub fn switch_request() -> SwitchRequest {
    SwitchRequest::new(
        1,
        "http://",
        json!({"test_key": "test_value"}),
        "return-url-scheme",
        false,
    )
}

pub fn host_context() -> HostContext {
    HostContext::new("com.example.app").declare_scheme("return-url-scheme")
}

pub fn auth_params() -> AuthRequestParams {
    AuthRequestParams::new(
        "https://example.com/approval/url",
        "https://example.com/success/url",
        "return-url-scheme",
    )
}
