mod binding;
mod builder;
mod options;
mod registrar;

pub use binding::MiddlewareBinding;
pub use builder::ResourceBindingBuilder;
pub use options::MiddlewareOptions;
pub use registrar::{MiddlewareRegistrar, MiddlewareRegistry, RegisteredMiddleware};

#[cfg(test)]
pub use registrar::MockMiddlewareRegistrar;
