mod common;

use common::{ScriptedGateway, auth_params, host_context, switch_request};
use payswitch::application::builder::PAYPAL_REQUEST_CODE;
use payswitch::application::launcher::PaymentLauncher;
use payswitch::application::reconciler::ReturnReconciler;
use payswitch::domain::payment::PaymentPendingRequest;
use payswitch::domain::switch::{ReturnPayload, SwitchPendingRequest, SwitchResult, SwitchStatus};
use payswitch::error::SwitchError;
use std::sync::Arc;

#[tokio::test]
async fn test_launch_starts_browser_switch_and_returns_pending_request() {
    let gateway = Arc::new(ScriptedGateway::starting(SwitchPendingRequest::Started(switch_request())));
    let launcher = PaymentLauncher::new(gateway.clone());

    let pending = launcher.launch(&host_context(), &auth_params()).await;

    let PaymentPendingRequest::Started(request) = pending else {
        panic!("expected a started pending request");
    };
    assert_eq!(request, switch_request());

    let started_with = gateway.started_with.lock().unwrap();
    assert_eq!(started_with.len(), 1);
    assert_eq!(started_with[0].request_code, Some(PAYPAL_REQUEST_CODE));
    assert_eq!(started_with[0].url.as_deref(), Some("https://example.com/approval/url"));
}

#[tokio::test]
async fn test_launch_on_error_returns_pending_request_failure() {
    let error = Arc::new(SwitchError::Switch("error".to_string()));
    let gateway = Arc::new(ScriptedGateway::starting(SwitchPendingRequest::Failure(error.clone())));
    let launcher = PaymentLauncher::new(gateway);

    let pending = launcher.launch(&host_context(), &auth_params()).await;

    let PaymentPendingRequest::Failure(returned) = pending else {
        panic!("expected a failed pending request");
    };
    assert!(Arc::ptr_eq(&error, &returned));
}

#[tokio::test]
async fn test_launch_when_host_cant_perform_switch_returns_pending_request_failure() {
    let gateway = Arc::new(ScriptedGateway::rejecting("browser switch error"));
    let launcher = PaymentLauncher::new(gateway.clone());

    let pending = launcher.launch(&host_context(), &auth_params()).await;

    let PaymentPendingRequest::Failure(error) = pending else {
        panic!("expected a failed pending request");
    };
    assert_eq!(
        error.to_string(),
        "AndroidManifest.xml is incorrectly configured or another app \
         defines the same browser switch url as this app. See \
         https://developer.paypal.com/braintree/docs/guides/client-sdk/setup/\
         android/v4#browser-switch-setup \
         for the correct configuration: browser switch error"
    );
    // The browser is never opened when the check fails.
    assert!(gateway.started_with.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_reconcile_when_result_exists_returns_result() {
    let result = SwitchResult::for_request(
        &switch_request(),
        SwitchStatus::Success,
        Some("return-url-scheme://onetouch/v1/success".to_string()),
    );
    let gateway = Arc::new(ScriptedGateway::parsing(Some(result.clone())));
    let reconciler = ReturnReconciler::new(gateway.clone());
    let payload = ReturnPayload::with_data("return-url-scheme://onetouch/v1/success");

    let auth_result = reconciler
        .reconcile(&PaymentPendingRequest::Started(switch_request()), &payload)
        .await
        .unwrap();

    assert_eq!(auth_result.unwrap().switch_result(), &result);
    let parsed = gateway.parsed.lock().unwrap();
    assert_eq!(parsed[0], (switch_request(), payload));
}

#[tokio::test]
async fn test_reconcile_when_result_does_not_exist_returns_none() {
    let gateway = Arc::new(ScriptedGateway::parsing(None));
    let reconciler = ReturnReconciler::new(gateway);

    let auth_result = reconciler
        .reconcile(&PaymentPendingRequest::Started(switch_request()), &ReturnPayload::empty())
        .await
        .unwrap();

    assert!(auth_result.is_none());
}

#[tokio::test]
async fn test_reconcile_failure_does_not_reach_gateway() {
    let gateway = Arc::new(ScriptedGateway::parsing(None));
    let reconciler = ReturnReconciler::new(gateway.clone());
    let failed = PaymentPendingRequest::Failure(Arc::new(SwitchError::Switch("error".to_string())));

    let result = reconciler.reconcile(&failed, &ReturnPayload::empty()).await;

    assert!(matches!(result, Err(SwitchError::NotStarted(_))));
    assert!(gateway.parsed.lock().unwrap().is_empty());
}
