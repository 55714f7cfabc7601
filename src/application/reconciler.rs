use crate::domain::payment::{PaymentAuthResult, PaymentPendingRequest};
use crate::domain::ports::SwitchGatewayRef;
use crate::domain::switch::ReturnPayload;
use crate::error::{Result, SwitchError};
use tracing::{debug, info};

/// Turns the payload delivered on return to the app into a payment result.
///
/// Three outcomes: `Ok(Some(_))` when the payload matches the token,
/// `Ok(None)` when there is nothing to report yet, and `Err(_)` when the
/// gateway could not make sense of the payload.
pub struct ReturnReconciler {
    gateway: SwitchGatewayRef,
}

impl ReturnReconciler {
    pub fn new(gateway: SwitchGatewayRef) -> Self {
        Self { gateway }
    }

    pub async fn reconcile(
        &self,
        pending: &PaymentPendingRequest,
        payload: &ReturnPayload,
    ) -> Result<Option<PaymentAuthResult>> {
        let request = match pending {
            PaymentPendingRequest::Started(request) => request,
            PaymentPendingRequest::Failure(error) => {
                return Err(SwitchError::NotStarted(error.to_string()));
            }
        };

        match self.gateway.parse_result(request, payload).await? {
            Some(result) => {
                info!(status = ?result.status, "Browser switch result received");
                Ok(Some(PaymentAuthResult::new(result)))
            }
            None => {
                debug!(request_code = request.request_code, "No browser switch result yet");
                Ok(None)
            }
        }
    }
}
