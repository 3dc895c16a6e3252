use std::borrow::Cow;

use http::StatusCode;

use crate::gate::GateResponse;

const DEFAULT_MESSAGE: &str = "This action is unauthorized.";

/// A denied authorization check.
///
/// Carries the gate's message, an optional application specific code and an optional HTTP status hint.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", .message.as_deref().unwrap_or(DEFAULT_MESSAGE))]
pub struct AuthorizationError {
    message: Option<Cow<'static, str>>,
    code: Option<Cow<'static, str>>,
    status: Option<StatusCode>,
}

impl AuthorizationError {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: Some(message.into()),
            code: None,
            status: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or(DEFAULT_MESSAGE)
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }
}

impl From<GateResponse> for AuthorizationError {
    fn from(value: GateResponse) -> Self {
        let (message, code, status) = value.into_parts();

        Self {
            message,
            code,
            status,
        }
    }
}

#[cfg(feature = "axum")]
mod axum {
    use axum::response::{IntoResponse, Response};
    use http::StatusCode;

    use super::AuthorizationError;

    impl IntoResponse for AuthorizationError {
        fn into_response(self) -> Response {
            tracing::warn!(err = %self, code = ?self.code, "Forbidden");

            let status = self.status.unwrap_or(StatusCode::FORBIDDEN);

            (status, self.message().to_owned()).into_response()
        }
    }

    impl From<AuthorizationError> for Response {
        fn from(value: AuthorizationError) -> Self {
            value.into_response()
        }
    }
}
