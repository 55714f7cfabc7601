use super::builder;
use crate::domain::payment::{AuthRequestParams, PaymentPendingRequest};
use crate::domain::ports::SwitchGatewayRef;
use crate::domain::switch::{HostContext, SwitchPendingRequest};
use crate::error::SwitchError;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Starts the browser switch for a payment authorization.
///
/// `launch` never returns an error: every way the handoff can fail is folded
/// into `PaymentPendingRequest::Failure`.
pub struct PaymentLauncher {
    gateway: SwitchGatewayRef,
}

impl PaymentLauncher {
    pub fn new(gateway: SwitchGatewayRef) -> Self {
        Self { gateway }
    }

    /// Launches the browser for `params` and returns the token to hold on to.
    ///
    /// Opening the browser cannot be undone. A caller that changes its mind
    /// simply never reconciles the returned token.
    pub async fn launch(&self, ctx: &HostContext, params: &AuthRequestParams) -> PaymentPendingRequest {
        let options = builder::switch_options(params);
        debug!(package = %ctx.package_name, url = ?options.url, "Launching browser switch");

        if let Err(e) = self.gateway.assert_can_perform_switch(ctx, &options).await {
            warn!(error = %e, "Host cannot perform browser switch");
            return PaymentPendingRequest::Failure(Arc::new(SwitchError::configuration(&e)));
        }

        match self.gateway.start(ctx, &options).await {
            SwitchPendingRequest::Started(request) => {
                info!(
                    request_code = request.request_code,
                    event = %params.payment_type.switch_started_event(),
                    "Browser switch started"
                );
                PaymentPendingRequest::Started(request)
            }
            SwitchPendingRequest::Failure(error) => {
                warn!(error = %error, "Browser switch failed to start");
                PaymentPendingRequest::Failure(error)
            }
        }
    }
}
