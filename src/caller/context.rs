use std::{borrow::Cow, fmt};

use super::layer::CallerLayer;

/// The resource action method a check originates from, e.g. `edit`.
///
/// Abilities for subjects are guessed from this name. Routes record it with [`CallerLayer`] and
/// handlers extract it again, so nothing has to inspect the call stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Caller {
    method: Cow<'static, str>,
}

impl Caller {
    pub fn new(method: impl Into<Cow<'static, str>>) -> Self {
        Self {
            method: method.into(),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn layer(self) -> CallerLayer {
        CallerLayer::new(self)
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.method)
    }
}

impl From<&'static str> for Caller {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Caller {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(feature = "axum")]
mod axum {
    use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
    use http::StatusCode;

    use super::Caller;

    #[async_trait]
    impl<S> FromRequestParts<S> for Caller
    where
        S: Send + Sync,
    {
        type Rejection = StatusCode;

        #[tracing::instrument(skip_all)]
        async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
            match parts.extensions.get::<Caller>() {
                Some(caller) => Ok(caller.clone()),
                None => {
                    tracing::error!(
                        "Requested caller extension was not found. Did you add a `CallerLayer` to the route?"
                    );

                    Err(StatusCode::INTERNAL_SERVER_ERROR)
                }
            }
        }
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use ::axum::{
        body::{to_bytes, Body},
        routing::get,
        Router,
    };
    use http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::test::init_tracing;

    use super::Caller;

    async fn caller_method(caller: Caller) -> String {
        caller.method().to_owned()
    }

    fn request() -> Request<Body> {
        Request::builder()
            .uri("/")
            .body(Body::empty())
            .expect("request is valid")
    }

    #[tokio::test]
    async fn missing_caller_layer_is_an_internal_error() {
        init_tracing();

        let app = Router::new().route("/", get(caller_method));

        let response = app.oneshot(request()).await.expect("router is infallible");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn caller_layer_provides_the_caller_to_handlers() {
        init_tracing();

        let app = Router::new()
            .route("/", get(caller_method))
            .layer(Caller::new("edit").layer());

        let response = app.oneshot(request()).await.expect("router is infallible");

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body is readable");

        assert_eq!(&body[..], b"edit");
    }
}
