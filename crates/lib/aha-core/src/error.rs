use std::{error::Error, fmt};

use reqwest::StatusCode;

/// Failure raised by the remote client facade.
#[derive(Debug)]
pub enum ClientError {
    Http(reqwest::Error),
    Status { status: StatusCode, body: String },
    GraphQl(Vec<String>),
    MissingData,
    Decode(serde_json::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(err) => write!(f, "{err}"),
            Self::Status { status, body } => {
                write!(f, "Aha! API error ({}): {body}", status.as_u16())
            }
            Self::GraphQl(messages) => write!(f, "GraphQL errors: {}", messages.join("; ")),
            Self::MissingData => write!(f, "response did not include data"),
            Self::Decode(err) => write!(f, "unexpected response shape: {err}"),
        }
    }
}

impl Error for ClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            Self::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Classified failure returned by a tool handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    InvalidParams(String),
    Internal(String),
}

impl ControlError {
    #[must_use]
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidParams(message) | Self::Internal(message) => message,
        }
    }
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams(message) => write!(f, "invalid params: {message}"),
            Self::Internal(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl Error for ControlError {}

pub type ControlResult<T> = Result<T, ControlError>;

/// Wraps an unclassified remote failure at the handler boundary.
///
/// The underlying message is logged before it is folded into an
/// [`ControlError::Internal`] prefixed with `context`.
#[must_use]
pub fn wrap_remote(context: &str, err: &ClientError) -> ControlError {
    tracing::error!(error = %err, "API Error: {context}");
    ControlError::Internal(format!("{context}: {err}"))
}

/// Boundary for REST-backed calls: non-2xx responses are already classified
/// and pass through unchanged, everything else is wrapped.
#[must_use]
pub fn wrap_rest(context: &str, err: &ClientError) -> ControlError {
    match err {
        ClientError::Status { .. } => {
            tracing::error!(error = %err, "API Error: {context}");
            ControlError::Internal(err.to_string())
        }
        _ => wrap_remote(context, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_embeds_code_and_body() {
        let err = ClientError::Status {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: "{\"errors\":\"bad release\"}".to_string(),
        };
        assert_eq!(
            wrap_rest("Failed to create feature", &err),
            ControlError::Internal("Aha! API error (422): {\"errors\":\"bad release\"}".to_string())
        );
    }

    #[test]
    fn unclassified_errors_carry_operation_context() {
        let err = ClientError::GraphQl(vec!["Record not visible".to_string()]);
        let wrapped = wrap_remote("Failed to fetch page", &err);
        assert_eq!(
            wrapped.message(),
            "Failed to fetch page: GraphQL errors: Record not visible"
        );
    }
}
