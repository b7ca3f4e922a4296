//! Translation of request outcomes into errors.

use crate::error::TransportError;

use super::messages::HttpResponse;

/// Check a response and return an error if the request did not succeed.
///
/// A transport failure takes precedence over the status code; a status
/// outside `200..=299` is reported with its reason phrase.
pub fn check_response(response: &HttpResponse) -> Result<(), TransportError> {
    if let Some(failure) = &response.error {
        tracing::warn!(code = failure.code, message = %failure.message, "request error");
        return Err(TransportError::Request {
            code: failure.code,
            message: failure.message.clone(),
        });
    }

    if !is_success(response.status) {
        tracing::warn!(status = response.status, reason = %response.reason, "request failed");
        return Err(TransportError::RequestFailed {
            status: response.status,
            reason: response.reason.clone(),
        });
    }

    Ok(())
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
