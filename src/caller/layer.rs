use tower::Layer;

use super::{context::Caller, service::CallerService};

#[derive(Debug, Clone)]
pub struct CallerLayer {
    caller: Caller,
}

impl CallerLayer {
    pub fn new(caller: impl Into<Caller>) -> Self {
        Self {
            caller: caller.into(),
        }
    }
}

impl From<Caller> for CallerLayer {
    fn from(value: Caller) -> Self {
        Self::new(value)
    }
}

impl<S> Layer<S> for CallerLayer {
    type Service = CallerService<S>;

    fn layer(&self, service: S) -> Self::Service {
        CallerService::new(service, self.caller.clone())
    }
}
