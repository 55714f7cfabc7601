use super::switch::{SwitchOptions, SwitchRequest, SwitchResult, SwitchStatus};
use crate::error::{Result, SwitchError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentType {
    #[default]
    #[serde(rename = "single-payment")]
    OneTime,
    BillingAgreement,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::OneTime => "single-payment",
            PaymentType::BillingAgreement => "billing-agreement",
        }
    }

    /// Analytics event name reported once the browser is open.
    pub fn switch_started_event(&self) -> String {
        format!("paypal.{}.browser-switch.started", self.as_str())
    }
}

/// Parameters handed over once the payment order has been created.
///
/// Everything needed to start the browser switch lives here; the caller owns
/// the value until it is passed to the launcher.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthRequestParams {
    pub approval_url: String,
    pub success_url: String,
    pub payment_type: PaymentType,
    pub return_url_scheme: String,
    pub client_metadata_id: Option<String>,
    pub merchant_account_id: Option<String>,
    pub intent: Option<String>,
    /// Caller supplied options. When absent they are derived from the fields above.
    pub switch_options: Option<SwitchOptions>,
}

impl AuthRequestParams {
    pub fn new(
        approval_url: impl Into<String>,
        success_url: impl Into<String>,
        return_url_scheme: impl Into<String>,
    ) -> Self {
        Self {
            approval_url: approval_url.into(),
            success_url: success_url.into(),
            payment_type: PaymentType::default(),
            return_url_scheme: return_url_scheme.into(),
            client_metadata_id: None,
            merchant_account_id: None,
            intent: None,
            switch_options: None,
        }
    }

    pub fn payment_type(mut self, payment_type: PaymentType) -> Self {
        self.payment_type = payment_type;
        self
    }

    pub fn client_metadata_id(mut self, id: impl Into<String>) -> Self {
        self.client_metadata_id = Some(id.into());
        self
    }

    pub fn merchant_account_id(mut self, id: impl Into<String>) -> Self {
        self.merchant_account_id = Some(id.into());
        self
    }

    pub fn intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = Some(intent.into());
        self
    }

    pub fn with_switch_options(mut self, options: SwitchOptions) -> Self {
        self.switch_options = Some(options);
        self
    }
}

/// A payment authorization that is waiting on the browser, or why it could not start.
#[derive(Debug, Clone)]
pub enum PaymentPendingRequest {
    Started(SwitchRequest),
    Failure(Arc<SwitchError>),
}

impl PaymentPendingRequest {
    pub fn started(&self) -> Option<&SwitchRequest> {
        match self {
            PaymentPendingRequest::Started(request) => Some(request),
            PaymentPendingRequest::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&Arc<SwitchError>> {
        match self {
            PaymentPendingRequest::Started(_) => None,
            PaymentPendingRequest::Failure(error) => Some(error),
        }
    }

    /// Serializes the started token. Failures carry nothing worth persisting.
    pub fn to_json(&self) -> Result<String> {
        match self {
            PaymentPendingRequest::Started(request) => request.to_json(),
            PaymentPendingRequest::Failure(error) => {
                Err(SwitchError::NotStarted(error.to_string()))
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        SwitchRequest::from_json(json).map(PaymentPendingRequest::Started)
    }
}

/// The reconciled result of a payment authorization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentAuthResult {
    switch_result: SwitchResult,
}

impl PaymentAuthResult {
    pub fn new(switch_result: SwitchResult) -> Self {
        Self { switch_result }
    }

    pub fn switch_result(&self) -> &SwitchResult {
        &self.switch_result
    }

    pub fn is_canceled(&self) -> bool {
        self.switch_result.status == SwitchStatus::Canceled
    }

    pub fn return_url(&self) -> Option<&str> {
        self.switch_result.return_url.as_deref()
    }
}
