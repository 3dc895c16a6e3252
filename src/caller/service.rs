use std::task::{Context, Poll};

use http::Request;
use tower::Service;

use super::context::Caller;

/// Records a fixed [`Caller`] in the extensions of every request before passing it on.
#[derive(Debug, Clone)]
pub struct CallerService<S> {
    service: S,
    caller: Caller,
}

impl<S> CallerService<S> {
    pub const fn new(service: S, caller: Caller) -> Self {
        Self { service, caller }
    }
}

impl<S, B> Service<Request<B>> for CallerService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<B>) -> Self::Future {
        request.extensions_mut().insert(self.caller.clone());

        self.service.call(request)
    }
}
