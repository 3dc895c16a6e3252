use std::borrow::Cow;

use crate::ability::ResourceMethods;

/// Restricts a controller middleware to some of the controller's methods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MiddlewareOptions {
    only: Option<ResourceMethods>,
    except: ResourceMethods,
}

impl MiddlewareOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the middleware only to `methods`, replacing any earlier restriction.
    pub fn only(mut self, methods: impl IntoIterator<Item = impl Into<Cow<'static, str>>>) -> Self {
        self.only = Some(methods.into_iter().collect());
        self
    }

    pub fn except(mut self, methods: impl IntoIterator<Item = impl Into<Cow<'static, str>>>) -> Self {
        self.except = methods.into_iter().collect();
        self
    }

    pub fn only_methods(&self) -> Option<&ResourceMethods> {
        self.only.as_ref()
    }

    pub fn except_methods(&self) -> &ResourceMethods {
        &self.except
    }

    /// `false` if `method` is left out by `only` or listed in `except`.
    pub fn applies_to(&self, method: &str) -> bool {
        if let Some(only) = &self.only {
            if !only.contains(method) {
                return false;
            }
        }

        !self.except.contains(method)
    }
}
