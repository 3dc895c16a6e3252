use std::borrow::Cow;

use http::StatusCode;

use crate::error::AuthorizationError;

/// The outcome of a gate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateResponse {
    allowed: bool,
    message: Option<Cow<'static, str>>,
    code: Option<Cow<'static, str>>,
    status: Option<StatusCode>,
}

impl GateResponse {
    const fn new(allowed: bool) -> Self {
        Self {
            allowed,
            message: None,
            code: None,
            status: None,
        }
    }

    pub const fn allow() -> Self {
        Self::new(true)
    }

    pub const fn deny() -> Self {
        Self::new(false)
    }

    pub fn deny_with_status(status: StatusCode) -> Self {
        Self::deny().with_status(status)
    }

    pub fn deny_as_not_found() -> Self {
        Self::deny_with_status(StatusCode::NOT_FOUND)
    }

    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn allowed(&self) -> bool {
        self.allowed
    }

    pub fn denied(&self) -> bool {
        !self.allowed
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Returns the response if it allows the action, otherwise the matching [`AuthorizationError`].
    pub fn authorize(self) -> Result<Self, AuthorizationError> {
        if self.allowed {
            return Ok(self);
        }

        Err(AuthorizationError::from(self))
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        Option<Cow<'static, str>>,
        Option<Cow<'static, str>>,
        Option<StatusCode>,
    ) {
        (self.message, self.code, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_response_authorizes() {
        let response = GateResponse::allow().with_message("welcome");

        let authorized = response.clone().authorize().expect("allowed");

        assert_eq!(authorized, response);
    }

    #[test]
    fn denied_response_carries_message_code_and_status() {
        let err = GateResponse::deny_as_not_found()
            .with_message("No such post")
            .with_code("post.missing")
            .authorize()
            .expect_err("denied");

        assert_eq!(err.to_string(), "No such post");
        assert_eq!(err.code(), Some("post.missing"));
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn denied_response_without_message_uses_the_default() {
        let err = GateResponse::deny().authorize().expect_err("denied");

        assert_eq!(err.to_string(), "This action is unauthorized.");
        assert_eq!(err.status(), None);
    }
}
