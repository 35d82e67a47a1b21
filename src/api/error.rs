//! Error types for the management API client

use reqwest::StatusCode;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Result type using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Parsed error payload returned by the API.
///
/// The service answers failed requests with an envelope such as
/// `{"sys": {"type": "Error", "id": "NotFound"}, "message": "...", "requestId": "..."}`.
/// `status` is `None` when the error was detected on the client side
/// (for example an operation on a handle that was already deleted).
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDetails {
    pub status: Option<u16>,
    pub status_text: String,
    /// `sys.id` of the error envelope, e.g. `NotFound` or `VersionMismatch`
    pub error_id: Option<String>,
    pub message: String,
    pub request_id: Option<String>,
    pub details: Option<Value>,
}

impl ErrorDetails {
    /// Parse an error body received with `status`.
    ///
    /// Bodies that are not JSON keep the (truncated) raw text as the message.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();
        let parsed: Option<Value> = serde_json::from_str(body).ok();

        let Some(payload) = parsed.filter(|v| v.is_object()) else {
            return Self {
                status: Some(status.as_u16()),
                status_text: status_text.clone(),
                error_id: None,
                message: if body.trim().is_empty() {
                    status_text
                } else {
                    sanitize_for_log(body)
                },
                request_id: None,
                details: None,
            };
        };

        let error_id = payload
            .get("sys")
            .and_then(|sys| sys.get("id"))
            .and_then(|v| v.as_str())
            .map(str::to_string);

        Self {
            status: Some(status.as_u16()),
            message: payload
                .get("message")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| status_text.clone()),
            status_text,
            error_id,
            request_id: payload
                .get("requestId")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            details: payload.get("details").cloned(),
        }
    }

    /// Details for an error raised without a server round-trip.
    pub fn client_side(error_id: &str, message: impl Into<String>) -> Self {
        Self {
            status: None,
            status_text: String::new(),
            error_id: Some(error_id.to_string()),
            message: message.into(),
            request_id: None,
            details: None,
        }
    }
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(status) = self.status {
            write!(f, "[{} {}] ", status, self.status_text)?;
        }
        f.write_str(&self.message)?;
        if let Some(request_id) = &self.request_id {
            write!(f, " (request id: {})", request_id)?;
        }
        Ok(())
    }
}

/// Errors surfaced by the client.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested entity does not exist (or the local handle was deleted).
    #[error("not found: {0}")]
    NotFound(ErrorDetails),

    /// The `sys.version` sent with a mutation is stale.
    #[error("version mismatch: {0}")]
    VersionMismatch(ErrorDetails),

    /// A required attribute is missing or invalid.
    #[error("validation error: {0}")]
    ValidationError(ErrorDetails),

    /// The server payload lacks the required envelope fields.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The access token is invalid or expired.
    #[error("unauthorized: {0}")]
    Unauthorized(ErrorDetails),

    /// The access token is valid but lacks permission.
    #[error("access denied: {0}")]
    AccessDenied(ErrorDetails),

    /// Too many requests; `reset` is the number of seconds until the limit resets.
    #[error("rate limited: {details}")]
    RateLimited {
        details: ErrorDetails,
        reset: Option<u64>,
    },

    /// Any other non-success response.
    #[error("api error: {0}")]
    Api(ErrorDetails),

    /// The request could not be sent or the response could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Invalid client configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Request body could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Map a non-success response to an error kind.
    pub fn from_response(status: StatusCode, body: &str, rate_limit_reset: Option<u64>) -> Self {
        let details = ErrorDetails::from_response(status, body);

        match status {
            StatusCode::UNAUTHORIZED => Error::Unauthorized(details),
            StatusCode::FORBIDDEN => Error::AccessDenied(details),
            StatusCode::NOT_FOUND => Error::NotFound(details),
            StatusCode::CONFLICT => Error::VersionMismatch(details),
            StatusCode::UNPROCESSABLE_ENTITY => Error::ValidationError(details),
            StatusCode::BAD_REQUEST
                if matches!(
                    details.error_id.as_deref(),
                    Some("ValidationFailed") | Some("InvalidEntry")
                ) =>
            {
                Error::ValidationError(details)
            }
            StatusCode::TOO_MANY_REQUESTS => Error::RateLimited {
                details,
                reset: rate_limit_reset,
            },
            _ => Error::Api(details),
        }
    }

    pub(crate) fn not_found_locally(message: impl Into<String>) -> Self {
        Error::NotFound(ErrorDetails::client_side("NotFound", message))
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::ValidationError(ErrorDetails::client_side("ValidationFailed", message))
    }

    /// Parsed error payload, when the error came from (or mimics) an API response.
    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            Error::NotFound(d)
            | Error::VersionMismatch(d)
            | Error::ValidationError(d)
            | Error::Unauthorized(d)
            | Error::AccessDenied(d)
            | Error::Api(d) => Some(d),
            Error::RateLimited { details, .. } => Some(details),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if any.
    pub fn status(&self) -> Option<u16> {
        self.details().and_then(|d| d.status)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    pub fn is_version_mismatch(&self) -> bool {
        matches!(self, Error::VersionMismatch(_))
    }
}

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Format an error for display to a user
/// Security: Avoids echoing raw payloads; request ids are kept for support tickets
pub fn format_error(error: &Error) -> String {
    match error {
        Error::NotFound(_) => "Resource not found.".to_string(),
        Error::VersionMismatch(_) => {
            "Resource was modified by someone else. Fetch it again and retry.".to_string()
        }
        Error::ValidationError(d) => format!("Invalid request: {}", d.message),
        Error::MalformedResponse(_) => "Unexpected response from the server.".to_string(),
        Error::Unauthorized(_) => {
            "Authentication failed. Check your access token.".to_string()
        }
        Error::AccessDenied(_) => {
            "Permission denied. Your token cannot access this resource.".to_string()
        }
        Error::RateLimited { reset: Some(s), .. } => {
            format!("Rate limit exceeded. Try again in {} seconds.", s)
        }
        Error::RateLimited { .. } => "Rate limit exceeded. Please try again later.".to_string(),
        Error::Api(d) => match (d.status, &d.request_id) {
            (Some(status), Some(id)) if status >= 500 => {
                format!("Service temporarily unavailable (request id: {}).", id)
            }
            (Some(status), _) if status >= 500 => {
                "Service temporarily unavailable. Please try again.".to_string()
            }
            _ => "Request failed.".to_string(),
        },
        Error::Transport(_) => {
            "Request failed. Check your network connection and try again.".to_string()
        }
        Error::Config(msg) => format!("Configuration error: {}", msg),
        Error::Serialization(_) => "Could not encode the request.".to_string(),
    }
}
