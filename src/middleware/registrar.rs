use super::options::MiddlewareOptions;

/// Receives controller middleware registrations.
#[cfg_attr(test, mockall::automock)]
pub trait MiddlewareRegistrar {
    fn register(&mut self, middleware: String, options: MiddlewareOptions);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredMiddleware {
    pub middleware: String,
    pub options: MiddlewareOptions,
}

/// Keeps controller middleware registrations in registration order.
#[derive(Debug, Clone, Default)]
pub struct MiddlewareRegistry {
    registered: Vec<RegisteredMiddleware>,
}

impl MiddlewareRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registered(&self) -> &[RegisteredMiddleware] {
        &self.registered
    }

    /// Names of the middleware that apply to the controller method `method`.
    pub fn middleware_for<'a>(&'a self, method: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.registered
            .iter()
            .filter(move |registered| registered.options.applies_to(method))
            .map(|registered| registered.middleware.as_str())
    }
}

impl MiddlewareRegistrar for MiddlewareRegistry {
    fn register(&mut self, middleware: String, options: MiddlewareOptions) {
        self.registered.push(RegisteredMiddleware {
            middleware,
            options,
        });
    }
}
