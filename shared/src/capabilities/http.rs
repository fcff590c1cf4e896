use crux_http::{HttpError, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{AppError, AppResult, ErrorKind};

/// What every request callback receives: the raw body, decoded later so a
/// malformed document becomes an [`AppError`] rather than a transport error.
pub type HttpResult = crux_http::Result<Response<Vec<u8>>>;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Splits a finished exchange into a 2xx body or a classified error.
///
/// Transport failures carry no server message; non-2xx responses keep the
/// status and whatever `error`/`message` the body holds. crux_http reports
/// 4xx/5xx as `HttpError::Http` with the body attached.
pub fn into_body(result: HttpResult) -> AppResult<Vec<u8>> {
    match result {
        Ok(mut response) => {
            let status = response.status();
            let body = response.take_body().unwrap_or_default();
            if status.is_success() {
                Ok(body)
            } else {
                Err(AppError::from_http_status(u16::from(status), Some(&body)))
            }
        }
        Err(HttpError::Http { code, body, .. }) => {
            Err(AppError::from_http_status(u16::from(code), body.as_deref()))
        }
        Err(e) => Err(AppError::network(e)),
    }
}

pub fn decode_json<T: DeserializeOwned>(result: HttpResult) -> AppResult<T> {
    let body = into_body(result)?;
    serde_json::from_slice(&body).map_err(AppError::decode)
}

/// Like [`into_body`] but for calls whose response body is irrelevant.
pub fn expect_success(result: HttpResult) -> AppResult<()> {
    into_body(result).map(|_| ())
}

pub fn encode_json<T: Serialize>(payload: &T) -> AppResult<Vec<u8>> {
    serde_json::to_vec(payload)
        .map_err(|e| AppError::new(ErrorKind::Serialization).with_internal(e.to_string()))
}
