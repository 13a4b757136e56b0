use serde::Deserialize;

use crate::ports::ClientError;

/// Status the service uses when it is overloaded. Not a registered HTTP code.
const STATUS_OVERLOADED: u16 = 529;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiError {
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorDetail {
    field: String,
    message: String,
}

/// Maps an HTTP status to the matching [`ClientError`], `Ok` for 200.
///
/// `body` is only inspected for 400 responses, where the service explains
/// which parameter it rejected.
pub(crate) fn check(status: u16, body: &[u8]) -> Result<(), ClientError> {
    match status {
        200 => Ok(()),
        400 => Err(ClientError::InvalidRequest(invalid_request_reason(body))),
        429 => Err(ClientError::RateLimited),
        500 => Err(ClientError::ServerError),
        503 => Err(ClientError::Unavailable),
        STATUS_OVERLOADED => Err(ClientError::Overloaded),
        other => Err(ClientError::UnexpectedStatus(other)),
    }
}

fn invalid_request_reason(body: &[u8]) -> String {
    serde_json::from_slice::<ApiError>(body)
        .ok()
        .and_then(|api_error| api_error.errors.into_iter().next())
        .map(|detail| format!("{} - {}", detail.field, detail.message))
        .unwrap_or_else(|| "invalid parameters".to_string())
}
