use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;

/// Body of a successful backend response.
///
/// ```json
/// { "success": true, "message": "Schedule saved", "data": { ... } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSuccess<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

/// Body of a rejected request.
///
/// ```json
/// { "success": false, "message": "Validation failed", "errors": [...], "statusCode": 422 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFailure {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<Value>,
    #[serde(default)]
    pub status_code: u16,
}

impl From<ApiFailure> for ClientError {
    fn from(failure: ApiFailure) -> Self {
        ClientError::Rejected {
            status_code: failure.status_code,
            message: failure.message,
            errors: failure.errors,
        }
    }
}

/// Decodes a response body into the success envelope, or the matching error.
///
/// `http_status` is used when a failure body omits `statusCode` or the body is not
/// an envelope at all.
pub fn decode_envelope<T: DeserializeOwned>(
    http_status: u16,
    body: &str,
) -> Result<ApiSuccess<T>, ClientError> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(err) if (200..300).contains(&http_status) => return Err(err.into()),
        Err(_) => {
            return Err(ClientError::Rejected {
                status_code: http_status,
                message: body.trim().to_string(),
                errors: Vec::new(),
            })
        }
    };

    let success = value.get("success").and_then(Value::as_bool).unwrap_or(false);
    if success && (200..300).contains(&http_status) {
        return Ok(serde_json::from_value(value)?);
    }

    let mut failure: ApiFailure = serde_json::from_value(value)?;
    if failure.status_code == 0 {
        failure.status_code = http_status;
    }
    Err(failure.into())
}
