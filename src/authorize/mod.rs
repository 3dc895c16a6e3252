mod config;
mod resource_authorizer;

pub use config::AuthorizerConfig;
pub use resource_authorizer::{ResourceAuthorizer, ResourceAuthorizerInner};
