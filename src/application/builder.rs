use crate::domain::payment::AuthRequestParams;
use crate::domain::switch::SwitchOptions;
use serde_json::{Map, Value};

/// Request code identifying PayPal browser switches.
pub const PAYPAL_REQUEST_CODE: i32 = 13591;

const SOURCE: &str = "paypal-browser";

/// Returns the switch options for `params`.
///
/// Options supplied by the caller win; otherwise they are derived from the
/// approval details.
pub fn switch_options(params: &AuthRequestParams) -> SwitchOptions {
    if let Some(options) = &params.switch_options {
        return options.clone();
    }

    SwitchOptions::new()
        .request_code(PAYPAL_REQUEST_CODE)
        .url(params.approval_url.clone())
        .return_url_scheme(params.return_url_scheme.clone())
        .metadata(metadata(params))
}

fn metadata(params: &AuthRequestParams) -> Value {
    let mut metadata = Map::new();
    metadata.insert("approval-url".into(), params.approval_url.clone().into());
    metadata.insert("success-url".into(), params.success_url.clone().into());
    metadata.insert("payment-type".into(), params.payment_type.as_str().into());
    if let Some(id) = &params.client_metadata_id {
        metadata.insert("client-metadata-id".into(), id.clone().into());
    }
    if let Some(id) = &params.merchant_account_id {
        metadata.insert("merchant-account-id".into(), id.clone().into());
    }
    metadata.insert("source".into(), SOURCE.into());
    if let Some(intent) = &params.intent {
        metadata.insert("intent".into(), intent.clone().into());
    }
    Value::Object(metadata)
}
