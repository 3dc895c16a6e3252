mod context;
mod layer;
mod service;

pub use context::Caller;
pub use layer::CallerLayer;
pub use service::CallerService;
