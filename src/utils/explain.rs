//! Human-readable explanations for the status codes the Zenodo API returns.
//!
//! Descriptions follow <https://developers.zenodo.org/#http-status-codes>.

use http::StatusCode;

use crate::error::{Result, ZenodoError};
use crate::models::ResponseInfo;

/// What to explain: a bare status code or a captured response
#[derive(Debug, Clone, Copy)]
pub enum StatusInput<'a> {
    Code(u16),
    Response(&'a ResponseInfo),
}

impl From<u16> for StatusInput<'_> {
    fn from(code: u16) -> Self {
        StatusInput::Code(code)
    }
}

impl From<StatusCode> for StatusInput<'_> {
    fn from(status: StatusCode) -> Self {
        StatusInput::Code(status.as_u16())
    }
}

impl<'a> From<&'a ResponseInfo> for StatusInput<'a> {
    fn from(response: &'a ResponseInfo) -> Self {
        StatusInput::Response(response)
    }
}

/// Reason phrase for a documented status code
pub fn reason_phrase(code: u16) -> Option<&'static str> {
    let reason = match code {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        415 => "Unsupported Media Type",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => return None,
    };
    Some(reason)
}

/// Longer description of a documented status code
pub fn description(code: u16) -> Option<&'static str> {
    let text = match code {
        200 => "Request succeeded. Response included. Usually sent for GET/PUT/PATCH requests.",
        201 => "Request succeeded. Response included. Usually sent for POST requests.",
        202 => {
            "Request succeeded. Response included. Usually sent for POST requests, where \
             background processing is needed to fulfill the request."
        }
        204 => "Request succeeded. No response included. Usually sent for DELETE requests.",
        400 => "Request failed. Error response included.",
        401 => "Request failed, due to an invalid access token. Error response included.",
        403 => {
            "Request failed, due to missing authorization (e.g. deleting an already submitted \
             upload or missing scopes for your access token). Error response included."
        }
        404 => "Request failed, due to the resource not being found. Error response included.",
        405 => "Request failed, due to unsupported HTTP method. Error response included.",
        409 => {
            "Request failed, due to the current state of the resource (e.g. edit a deposition \
             which is not fully integrated). Error response included."
        }
        415 => {
            "Request failed, due to missing or invalid request header Content-Type. Error \
             response included."
        }
        429 => "Request failed, due to rate limiting. Error response included.",
        500 => {
            "Request failed, due to an internal server error. Error response NOT included. \
             Don’t worry, Zenodo admins have been notified and will be dealing with the \
             problem ASAP."
        }
        _ => return None,
    };
    Some(text)
}

/// Format `"<code>: <reason>: <description>"` for a status code or response
///
/// Fails with [`ZenodoError::LookupFailure`] for codes the API does not
/// document.
pub fn explain_response<'a>(input: impl Into<StatusInput<'a>>) -> Result<String> {
    let (code, reason) = match input.into() {
        StatusInput::Code(code) => (code, reason_phrase(code)),
        StatusInput::Response(response) => (
            response.status,
            response.reason().or_else(|| reason_phrase(response.status)),
        ),
    };

    let reason = reason.ok_or(ZenodoError::LookupFailure(code))?;
    let text = description(code).ok_or(ZenodoError::LookupFailure(code))?;
    Ok(format!("{}: {}: {}", code, reason, text))
}
